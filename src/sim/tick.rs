//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the whole world by exactly one step:
//! input -> firing -> bullets -> enemies -> boss -> particles -> boss bullets
//! -> collisions -> stage escalation.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{GameEvent, World};
use crate::consts::PLAYER_SPAWN;
use crate::dist2;

/// Held keys and edge-triggered commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire button held
    pub fire: bool,
    /// Restart pressed (only honored after game over)
    pub restart: bool,
    /// Quit pressed
    pub quit: bool,
    /// Idle/demo mode - the engine plays itself
    pub autopilot: bool,
}

/// What a call to [`tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The world advanced one step
    Advanced,
    /// Game over; nothing moved
    Frozen,
    /// Game over was cleared by a restart
    Reset,
    /// Quit requested; nothing moved
    Quit,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickOutcome {
    world.events.clear();

    if input.quit {
        return TickOutcome::Quit;
    }

    if world.run.game_over {
        if input.restart && world.request_reset() {
            return TickOutcome::Reset;
        }
        return TickOutcome::Frozen;
    }

    let input = if input.autopilot {
        autopilot(world, input)
    } else {
        *input
    };

    steer_player(world, &input);
    fire(world, &input);

    world.bullets.step();
    world.enemies.step();
    update_boss(world);
    world.particles.step();
    world.boss_bullets.step();

    collision::resolve(world);

    escalate(world);

    TickOutcome::Advanced
}

/// Axis-aligned movement; opposing keys cancel out
fn steer_player(world: &mut World, input: &TickInput) {
    let speed = world.tuning.player_speed;
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= speed;
    }
    if input.right {
        delta.x += speed;
    }
    if input.up {
        delta.y -= speed;
    }
    if input.down {
        delta.y += speed;
    }
    world.player.move_by(delta);
}

/// Fire a volley on a fresh press (or while held, with auto fire) once the
/// cooldown has run out
fn fire(world: &mut World, input: &TickInput) {
    let player = &mut world.player;
    let pressed = if world.tuning.auto_fire {
        input.fire
    } else {
        input.fire && !player.fire_held
    };

    if pressed && player.fire_cooldown == 0 {
        world.bullets.fire_volley(player.pos);
        player.fire_cooldown = world.tuning.fire_cooldown;
        world.events.push(GameEvent::VolleyFired);
    }

    player.fire_held = input.fire;
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
}

fn update_boss(world: &mut World) {
    let player = world.player.pos;
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    if let Some(phase) = boss.update(&mut world.rng, player, &mut world.boss_bullets) {
        log::debug!("Boss phase -> {:?}", phase);
        world.events.push(GameEvent::BossPhaseChanged { phase });
    }
}

/// Stage timer, boss arrival and enemy spawn cadence
fn escalate(world: &mut World) {
    world.run.stage_timer += 1;

    if world.boss.is_none() && world.run.stage_timer > world.run.next_boss_at {
        log::debug!("Stage {} escalates at tick {}", world.run.stage, world.run.stage_timer);
        world.spawn_boss();
    }

    // Cadence keeps counting while the boss is up; only the spawns are held back
    let roll = world.cadence.roll.tick();
    let burst = world.cadence.burst.tick();
    if world.boss.is_some() {
        return;
    }

    if roll && world.rng.random_bool(world.tuning.enemy_spawn_chance) {
        world.spawn_enemy();
    }
    if burst {
        for _ in 0..world.tuning.burst_size {
            world.spawn_enemy();
        }
    }
}

/// Anything this close gets dodged instead of chased
const DODGE_RADIUS: f32 = 60.0;
/// Dead zone so the ship doesn't jitter around its target
const STEER_SLACK: f32 = 4.0;

/// Synthesize held keys for demo mode. Goes through the same movement and
/// firing rules as a human would.
fn autopilot(world: &World, input: &TickInput) -> TickInput {
    let me = world.player.pos;
    let closest = |a: &Vec2, b: &Vec2| dist2(*a, me).total_cmp(&dist2(*b, me));

    let threat = world
        .boss_bullets
        .pool()
        .positions()
        .chain(world.enemies.pool().positions())
        .filter(|p| dist2(*p, me) < DODGE_RADIUS * DODGE_RADIUS)
        .min_by(closest);

    let target_x = world
        .boss
        .as_ref()
        .map(|b| b.pos.x)
        .or_else(|| world.enemies.pool().positions().min_by(closest).map(|p| p.x))
        .unwrap_or(PLAYER_SPAWN.x);

    let mut out = TickInput {
        // Tap the trigger unless holding it is enough
        fire: world.tuning.auto_fire || !world.player.fire_held,
        restart: input.restart,
        quit: input.quit,
        autopilot: true,
        ..Default::default()
    };

    match threat {
        Some(t) if t.x < me.x => out.right = true,
        Some(_) => out.left = true,
        None if target_x < me.x - STEER_SLACK => out.left = true,
        None if target_x > me.x + STEER_SLACK => out.right = true,
        None => {}
    }

    if me.y < PLAYER_SPAWN.y - STEER_SLACK {
        out.down = true;
    } else if me.y > PLAYER_SPAWN.y + STEER_SLACK {
        out.up = true;
    }

    out
}
