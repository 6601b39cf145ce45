//! Read-only view of the world for a renderer
//!
//! Built after each tick by copying out positions, so the renderer never
//! holds a borrow of the simulation.

use glam::Vec2;
use serde::Serialize;

use super::boss::BossPhase;
use super::state::World;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub hp: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub phase: BossPhase,
    /// Remaining HP for the health bar, in [0, 1]
    pub hp_fraction: f32,
    pub entering: bool,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: PlayerView,
    pub bullets: Vec<Vec2>,
    pub enemies: Vec<Vec2>,
    pub particles: Vec<Vec2>,
    pub boss_bullets: Vec<Vec2>,
    pub boss: Option<BossView>,
    pub score: u64,
    pub lives: u8,
    pub stage: u32,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            player: PlayerView {
                pos: world.player.pos,
                hp: world.player.hp,
            },
            bullets: world.bullets.pool().positions().collect(),
            enemies: world.enemies.pool().positions().collect(),
            particles: world.particles.pool().positions().collect(),
            boss_bullets: world.boss_bullets.pool().positions().collect(),
            boss: world.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                phase: b.phase,
                hp_fraction: b.hp_fraction(),
                entering: b.is_entering(),
            }),
            score: world.run.score,
            lives: world.run.lives,
            stage: world.run.stage,
            game_over: world.run.game_over,
        }
    }
}
