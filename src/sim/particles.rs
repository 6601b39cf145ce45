//! Cosmetic particle bursts
//!
//! Particles never collide and never touch run state; they only give the
//! renderer something to draw when things get hit.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::pool::{Body, Pool};
use crate::consts::MAX_PARTICLES;
use crate::{outside_screen, polar_to_cartesian};

/// Particles die once they drift this far past any screen edge
pub const PARTICLE_MARGIN: f32 = 30.0;

/// Particle pool
#[derive(Debug, Clone)]
pub struct Particles {
    pool: Pool,
    damping: f32,
}

impl Particles {
    pub fn new(damping: f32) -> Self {
        Self {
            pool: Pool::with_capacity(MAX_PARTICLES),
            damping,
        }
    }

    /// Spray up to `count` particles from `at` in random directions.
    ///
    /// Returns how many were actually emitted (fewer when the pool is full).
    pub fn emit<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2, count: usize) -> usize {
        let mut emitted = 0;
        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random_range(1.0..3.5);
            let body = Body::new(at, polar_to_cartesian(speed, angle));
            if self.pool.acquire(body).is_none() {
                break;
            }
            emitted += 1;
        }
        emitted
    }

    /// Drift, damp, and cull particles that left the screen
    pub fn step(&mut self) {
        let damping = self.damping;
        self.pool.retain_mut(|p| {
            p.integrate();
            p.vel *= damping;
            !outside_screen(p.pos, PARTICLE_MARGIN)
        });
    }

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}
