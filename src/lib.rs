//! Shmup Arcade - a fixed-timestep vertical shoot 'em up
//!
//! Core modules:
//! - `sim`: Simulation engine (pools, boss AI, collisions, run state)
//! - `tuning`: Data-driven game balance
//!
//! Windowing, drawing and frame pacing are left to the embedder: it feeds a
//! [`sim::TickInput`] per tick and reads back a [`sim::Snapshot`].

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Logical ticks per second the balance numbers are written for
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions (y grows downward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Pool capacities
    pub const MAX_BULLETS: usize = 128;
    pub const MAX_ENEMIES: usize = 64;
    pub const MAX_PARTICLES: usize = 200;
    pub const MAX_BOSS_BULLETS: usize = 256;

    /// Where the player starts and respawns
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 80.0);
    /// Safe rectangle the player is clamped into
    pub const PLAYER_MIN: Vec2 = Vec2::new(16.0, 60.0);
    pub const PLAYER_MAX: Vec2 = Vec2::new(SCREEN_WIDTH - 16.0, SCREEN_HEIGHT - 20.0);
    pub const PLAYER_MAX_HP: u8 = 3;
    pub const STARTING_LIVES: u8 = 3;

    /// Boss entry point (above the top edge, horizontally centered)
    pub const BOSS_SPAWN: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, -120.0);
}

/// Squared distance between two points
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// True when `pos` lies outside the screen grown by `margin` on every side
#[inline]
pub fn outside_screen(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > consts::SCREEN_WIDTH + margin
        || pos.y < -margin
        || pos.y > consts::SCREEN_HEIGHT + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist2() {
        assert_eq!(dist2(Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0)), 25.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 0.0001);
        assert!((p.y - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_outside_screen() {
        assert!(!outside_screen(Vec2::new(-29.0, 10.0), 30.0));
        assert!(outside_screen(Vec2::new(-31.0, 10.0), 30.0));
        assert!(outside_screen(Vec2::new(10.0, 631.0), 30.0));
        assert!(!outside_screen(Vec2::new(820.0, 300.0), 20.0));
    }
}
