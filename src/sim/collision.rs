//! Collision resolution
//!
//! Every test is a squared-distance check against a fixed radius, run once
//! per tick after everything has moved. Order matters for tie-breaks:
//! enemies (vs player, then vs bullets), boss bullets vs player, then player
//! bullets vs boss. Within each scan the lowest slot wins.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, HitOutcome, World};
use crate::dist2;

pub const ENEMY_PLAYER_RADIUS: f32 = 20.0;
pub const ENEMY_BULLET_RADIUS: f32 = 16.0;
pub const BOSS_BULLET_PLAYER_RADIUS: f32 = 12.0;
pub const BULLET_BOSS_RADIUS: f32 = 48.0;

/// Particles for the various impacts
const PLAYER_HIT_PARTICLES: usize = 18;
const BOSS_HIT_PARTICLES: usize = 6;
const BOSS_DEATH_PARTICLES: usize = 80;

/// Strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    dist2(a, b) < radius * radius
}

/// Resolve all pairwise interactions for this tick
pub fn resolve(world: &mut World) {
    enemies_vs_player_and_bullets(world);
    boss_bullets_vs_player(world);
    bullets_vs_boss(world);
}

/// Apply one hit to the player and record what happened
fn hit_player(world: &mut World) {
    let outcome = world.player.take_hit(&mut world.run);
    world.events.push(GameEvent::PlayerHit {
        hp: world.player.hp,
    });
    match outcome {
        HitOutcome::Damaged => {}
        HitOutcome::LifeLost => world.events.push(GameEvent::LifeLost {
            lives: world.run.lives,
        }),
        HitOutcome::GameOver => world.events.push(GameEvent::GameOver {
            score: world.run.score,
        }),
    }
}

fn enemies_vs_player_and_bullets(world: &mut World) {
    for enemy_id in world.enemies.pool().ids() {
        let Some(enemy_pos) = world.enemies.pool().get(enemy_id).map(|e| e.pos) else {
            continue;
        };

        // A finished run takes no more damage
        if !world.run.game_over && within(enemy_pos, world.player.pos, ENEMY_PLAYER_RADIUS) {
            world.enemies.pool_mut().release(enemy_id);
            let at = world.player.pos;
            world.particles.emit(&mut world.rng, at, PLAYER_HIT_PARTICLES);
            hit_player(world);
            continue;
        }

        // First bullet in slot order wins; the enemy can only die once
        let hit = world
            .bullets
            .pool()
            .find(|b| within(enemy_pos, b.pos, ENEMY_BULLET_RADIUS));
        if let Some(bullet_id) = hit {
            world.bullets.pool_mut().release(bullet_id);
            world.enemies.pool_mut().release(enemy_id);
            let count = world.rng.random_range(12..20);
            world.particles.emit(&mut world.rng, enemy_pos, count);
            world.run.add_score(world.tuning.enemy_score);
            world.events.push(GameEvent::EnemyKilled { pos: enemy_pos });
        }
    }
}

fn boss_bullets_vs_player(world: &mut World) {
    for bullet_id in world.boss_bullets.pool().ids() {
        if world.run.game_over {
            return;
        }
        let Some(pos) = world.boss_bullets.pool().get(bullet_id).map(|b| b.pos) else {
            continue;
        };
        if !within(pos, world.player.pos, BOSS_BULLET_PLAYER_RADIUS) {
            continue;
        }

        world.boss_bullets.pool_mut().release(bullet_id);
        let at = world.player.pos;
        world.particles.emit(&mut world.rng, at, PLAYER_HIT_PARTICLES);
        hit_player(world);
    }
}

fn bullets_vs_boss(world: &mut World) {
    // Invulnerable while entering
    let Some(boss_pos) = world.boss.as_ref().filter(|b| b.is_active()).map(|b| b.pos) else {
        return;
    };

    let mut destroyed = false;
    for bullet_id in world.bullets.pool().ids() {
        let Some(pos) = world.bullets.pool().get(bullet_id).map(|b| b.pos) else {
            continue;
        };
        if !within(pos, boss_pos, BULLET_BOSS_RADIUS) {
            continue;
        }

        world.bullets.pool_mut().release(bullet_id);
        world.particles.emit(&mut world.rng, pos, BOSS_HIT_PARTICLES);
        let damage = world.tuning.boss_damage_per_hit;
        if world.boss.as_mut().is_some_and(|b| b.take_damage(damage)) {
            destroyed = true;
            break;
        }
    }

    if destroyed {
        defeat_boss(world, boss_pos);
    }
}

/// Remove the boss, pay out, and schedule the next one
fn defeat_boss(world: &mut World, pos: Vec2) {
    world.boss = None;
    world.run.add_score(world.tuning.boss_score);
    world.particles.emit(&mut world.rng, pos, BOSS_DEATH_PARTICLES);

    world.run.stage += 1;
    world.run.next_boss_at = world.run.stage_timer + world.tuning.boss_respawn_delay;
    world.events.push(GameEvent::BossDefeated { pos });
    log::info!(
        "Boss defeated: score {}, entering stage {}",
        world.run.score,
        world.run.stage
    );
}
