//! Enemy waves
//!
//! Enemies drop in from above the screen, bounce off the side walls and are
//! culled once they slip past the bottom edge. Spawn cadence is driven by
//! the tick loop, not here.

use glam::Vec2;
use rand::Rng;

use super::pool::{Body, Pool, SlotId};
use crate::consts::{MAX_ENEMIES, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Horizontal spawn inset from each side
pub const SPAWN_INSET: u32 = 40;
/// Walls enemies bounce between
pub const WALL_LEFT: f32 = 10.0;
pub const WALL_RIGHT: f32 = SCREEN_WIDTH - 10.0;
/// Enemies below this line are gone
pub const CULL_Y: f32 = SCREEN_HEIGHT + 30.0;

/// Enemy pool
#[derive(Debug, Clone)]
pub struct Enemies {
    pool: Pool,
}

impl Default for Enemies {
    fn default() -> Self {
        Self::new()
    }
}

impl Enemies {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(MAX_ENEMIES),
        }
    }

    /// Spawn one enemy at a random spot above the screen
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SlotId> {
        let x = (SPAWN_INSET + rng.random_range(0..SCREEN_WIDTH as u32 - 2 * SPAWN_INSET)) as f32;
        let y = -10.0 - rng.random_range(0..200u32) as f32;
        let vx = (rng.random::<f32>() - 0.5) * 1.2;
        let vy = 1.0 + rng.random::<f32>() * 1.2;
        self.spawn_at(Vec2::new(x, y), Vec2::new(vx, vy))
    }

    /// Spawn one enemy with explicit kinematics
    pub fn spawn_at(&mut self, pos: Vec2, vel: Vec2) -> Option<SlotId> {
        self.pool.acquire(Body::new(pos, vel))
    }

    /// Move, bounce off the side walls, cull past the bottom
    pub fn step(&mut self) {
        self.pool.retain_mut(|e| {
            e.integrate();
            if e.pos.x < WALL_LEFT || e.pos.x > WALL_RIGHT {
                e.vel.x = -e.vel.x;
            }
            e.pos.y <= CULL_Y
        });
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }
}
