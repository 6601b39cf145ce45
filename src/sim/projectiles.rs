//! Player bullets and boss bullets
//!
//! Both are plain pooled bodies; boss bullets additionally sag downward a
//! little every tick so their patterns arc instead of flying straight.

use glam::Vec2;

use super::pool::{Body, Pool, SlotId};
use crate::consts::{MAX_BOSS_BULLETS, MAX_BULLETS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::outside_screen;

/// Player bullets die this far past any screen edge
pub const BULLET_MARGIN: f32 = 20.0;
/// Boss bullets: horizontal and vertical cull margins
pub const BOSS_BULLET_MARGIN_X: f32 = 20.0;
pub const BOSS_BULLET_MARGIN_Y: f32 = 40.0;

/// Volley offset above the ship's nose
pub const VOLLEY_OFFSET: Vec2 = Vec2::new(0.0, -16.0);
/// Fixed 3-way spread (left, center, right)
pub const VOLLEY_VELOCITIES: [Vec2; 3] = [
    Vec2::new(-0.6, -6.0),
    Vec2::new(0.0, -6.6),
    Vec2::new(0.6, -6.0),
];

/// Bullets fired by the player
#[derive(Debug, Clone)]
pub struct PlayerBullets {
    pool: Pool,
}

impl Default for PlayerBullets {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBullets {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(MAX_BULLETS),
        }
    }

    /// Spawn one bullet (dropped when the pool is full)
    pub fn fire(&mut self, pos: Vec2, vel: Vec2) -> Option<SlotId> {
        self.pool.acquire(Body::new(pos, vel))
    }

    /// Fire the 3-way spread from the ship at `ship`; returns bullets spawned
    pub fn fire_volley(&mut self, ship: Vec2) -> usize {
        let origin = ship + VOLLEY_OFFSET;
        VOLLEY_VELOCITIES
            .iter()
            .filter_map(|&vel| self.fire(origin, vel))
            .count()
    }

    pub fn step(&mut self) {
        self.pool.retain_mut(|b| {
            b.integrate();
            !outside_screen(b.pos, BULLET_MARGIN)
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

/// Bullets fired by the boss
#[derive(Debug, Clone)]
pub struct BossBullets {
    pool: Pool,
    gravity: f32,
}

impl BossBullets {
    pub fn new(gravity: f32) -> Self {
        Self {
            pool: Pool::with_capacity(MAX_BOSS_BULLETS),
            gravity,
        }
    }

    pub fn fire(&mut self, pos: Vec2, vel: Vec2) -> Option<SlotId> {
        self.pool.acquire(Body::new(pos, vel))
    }

    pub fn step(&mut self) {
        let gravity = self.gravity;
        self.pool.retain_mut(|b| {
            b.integrate();
            b.vel.y += gravity;
            !(b.pos.x < -BOSS_BULLET_MARGIN_X
                || b.pos.x > SCREEN_WIDTH + BOSS_BULLET_MARGIN_X
                || b.pos.y < -BOSS_BULLET_MARGIN_Y
                || b.pos.y > SCREEN_HEIGHT + BOSS_BULLET_MARGIN_Y)
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
