//! Boss entrance, phase state machine and bullet patterns
//!
//! Lifecycle: absent -> entering -> Spread -> AimedBurst -> Spiral -> absent.
//! The entrance is a slow invulnerable descent. Once active, the boss steers
//! toward the player with inertia and fires the pattern of its current phase.
//! Phase is selected from the remaining HP and only ever advances.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::projectiles::BossBullets;
use super::schedule::Every;
use crate::consts::{BOSS_SPAWN, SCREEN_WIDTH};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// HP the phase thresholds are measured against
pub const PHASE_HP_REFERENCE: f32 = 400.0;
/// HP the render bar is scaled against
pub const HP_BAR_REFERENCE: f32 = 450.0;

/// Steering gain toward the player's x
pub const STEER_GAIN: f32 = 0.0025;
pub const MAX_VX: f32 = 3.0;
/// Horizontal limits the boss bounces between
pub const ARENA_LEFT: f32 = 60.0;
pub const ARENA_RIGHT: f32 = SCREEN_WIDTH - 60.0;
/// Bullets leave from under the hull
pub const MUZZLE_OFFSET: Vec2 = Vec2::new(0.0, 30.0);

/// Combat phase (ordinal 0/1/2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BossPhase {
    /// Downward fan every 40 ticks
    Spread,
    /// Aimed bursts every 28 ticks, erratic dives every 300
    AimedBurst,
    /// Rotating spiral every 6 ticks, radial ring every 120
    Spiral,
}

impl BossPhase {
    pub fn index(self) -> u8 {
        match self {
            BossPhase::Spread => 0,
            BossPhase::AimedBurst => 1,
            BossPhase::Spiral => 2,
        }
    }
}

/// Phase implied by an HP ratio (HP / 400)
pub fn phase_for(hp_ratio: f32) -> BossPhase {
    if hp_ratio < 0.35 {
        BossPhase::Spiral
    } else if hp_ratio < 0.6 {
        BossPhase::AimedBurst
    } else {
        BossPhase::Spread
    }
}

/// Per-pattern countdowns; all of them advance on every active tick
#[derive(Debug, Clone)]
struct Patterns {
    fan: Every,
    aimed: Every,
    dive: Every,
    spiral: Every,
    ring: Every,
}

impl Patterns {
    fn new() -> Self {
        Self {
            fan: Every::new(40),
            aimed: Every::new(28),
            dive: Every::new(300),
            spiral: Every::new(6),
            ring: Every::new(120),
        }
    }
}

/// The boss while it is present
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub vx: f32,
    pub hp: f32,
    pub phase: BossPhase,
    /// Entrance ticks still to run (0 = active and vulnerable)
    entrance_left: u32,
    entrance_speed: f32,
    /// Active ticks elapsed; drives the spiral angle
    shoot_timer: u32,
    patterns: Patterns,
}

impl Boss {
    /// Spawn at the top center with random HP
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let hp = rng.random_range(tuning.boss_hp_min..tuning.boss_hp_max);
        Self::new(BOSS_SPAWN, hp, tuning)
    }

    pub fn new(pos: Vec2, hp: f32, tuning: &Tuning) -> Self {
        Self {
            pos,
            vx: 0.0,
            hp,
            phase: BossPhase::Spread,
            entrance_left: tuning.boss_entrance_ticks,
            entrance_speed: tuning.boss_entrance_speed,
            shoot_timer: 0,
            patterns: Patterns::new(),
        }
    }

    /// Still descending (invulnerable, not shooting)
    pub fn is_entering(&self) -> bool {
        self.entrance_left > 0
    }

    pub fn is_active(&self) -> bool {
        !self.is_entering()
    }

    /// Skip the rest of the entrance
    pub fn finish_entrance(&mut self) {
        self.entrance_left = 0;
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp / PHASE_HP_REFERENCE
    }

    /// HP scaled for a health bar, clamped to [0, 1]
    pub fn hp_fraction(&self) -> f32 {
        (self.hp / HP_BAR_REFERENCE).clamp(0.0, 1.0)
    }

    pub fn shoot_timer(&self) -> u32 {
        self.shoot_timer
    }

    /// Apply one hit; true when this hit destroyed the boss
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp -= amount;
        self.hp <= 0.0
    }

    /// Advance one tick. Returns the new phase when it changed this tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player: Vec2,
        bullets: &mut BossBullets,
    ) -> Option<BossPhase> {
        if self.entrance_left > 0 {
            self.entrance_left -= 1;
            if self.entrance_left > 0 {
                self.pos.y += self.entrance_speed;
                return None;
            }
        }

        self.steer(player);

        let previous = self.phase;
        self.phase = self.phase.max(phase_for(self.hp_ratio()));

        self.shoot_timer += 1;
        let fan = self.patterns.fan.tick();
        let aimed = self.patterns.aimed.tick();
        let dive = self.patterns.dive.tick();
        let spiral = self.patterns.spiral.tick();
        let ring = self.patterns.ring.tick();

        match self.phase {
            BossPhase::Spread => {
                if fan {
                    self.fire_fan(bullets);
                }
            }
            BossPhase::AimedBurst => {
                if aimed {
                    self.fire_aimed(player, bullets);
                }
                if dive {
                    self.dive(rng);
                }
            }
            BossPhase::Spiral => {
                if spiral {
                    self.fire_spiral(rng, bullets);
                }
                if ring {
                    self.fire_ring(rng, bullets);
                }
            }
        }

        (self.phase != previous).then_some(self.phase)
    }

    /// Inertial pursuit of the player's x, bounced between the arena walls
    fn steer(&mut self, player: Vec2) {
        self.pos.x += self.vx;
        self.vx += (player.x - self.pos.x) * STEER_GAIN;
        self.vx = self.vx.clamp(-MAX_VX, MAX_VX);
        if self.pos.x < ARENA_LEFT {
            self.pos.x = ARENA_LEFT;
            self.vx = -self.vx;
        }
        if self.pos.x > ARENA_RIGHT {
            self.pos.x = ARENA_RIGHT;
            self.vx = -self.vx;
        }
    }

    fn muzzle(&self) -> Vec2 {
        self.pos + MUZZLE_OFFSET
    }

    /// Five shots fanned around straight down
    pub fn fire_fan(&self, bullets: &mut BossBullets) {
        for step in -2..=2 {
            let angle = FRAC_PI_2 + step as f32 * 0.2;
            bullets.fire(self.muzzle(), polar_to_cartesian(2.5, angle));
        }
    }

    /// Seven shots centered on the player's current position
    pub fn fire_aimed(&self, player: Vec2, bullets: &mut BossBullets) {
        let to_player = player - self.pos;
        let base = to_player.y.atan2(to_player.x);
        for step in -3..=3 {
            let angle = base + step as f32 * 0.12;
            bullets.fire(self.muzzle(), polar_to_cartesian(3.2, angle));
        }
    }

    /// Random sideways kick and vertical nudge
    fn dive<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.vx += (rng.random::<f32>() - 0.5) * 6.0;
        self.pos.y += 20.0 * (rng.random::<f32>() - 0.5);
    }

    /// One shot along the rotating spiral angle, from an orbit point
    pub fn fire_spiral<R: Rng + ?Sized>(&self, rng: &mut R, bullets: &mut BossBullets) {
        let angle = (self.shoot_timer % 360) as f32 * 0.06;
        let origin = self.pos + Vec2::new(angle.cos() * 30.0, angle.sin() * 20.0);
        let speed = rng.random_range(2.0..3.6);
        bullets.fire(origin, polar_to_cartesian(speed, angle));
    }

    /// Sixteen evenly spaced shots, each jittered slightly
    pub fn fire_ring<R: Rng + ?Sized>(&self, rng: &mut R, bullets: &mut BossBullets) {
        for i in 0..16 {
            let angle = i as f32 * (TAU / 16.0) + rng.random::<f32>() * 0.2;
            bullets.fire(self.muzzle(), polar_to_cartesian(2.8, angle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active_boss(hp: f32) -> Boss {
        let mut boss = Boss::new(Vec2::new(400.0, 100.0), hp, &Tuning::default());
        boss.finish_entrance();
        boss
    }

    #[test]
    fn test_phase_for_thresholds() {
        assert_eq!(phase_for(1.0), BossPhase::Spread);
        assert_eq!(phase_for(0.6), BossPhase::Spread);
        assert_eq!(phase_for(0.59), BossPhase::AimedBurst);
        assert_eq!(phase_for(0.35), BossPhase::AimedBurst);
        assert_eq!(phase_for(0.34), BossPhase::Spiral);
        assert_eq!(phase_for(-1.0), BossPhase::Spiral);
        assert_eq!(BossPhase::Spiral.index(), 2);
    }

    #[test]
    fn test_spawn_hp_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tuning = Tuning::default();
        for _ in 0..200 {
            let boss = Boss::spawn(&mut rng, &tuning);
            assert!(boss.hp >= 300.0 && boss.hp < 450.0);
            assert_eq!(boss.pos, BOSS_SPAWN);
            assert!(boss.is_entering());
            assert_eq!(boss.phase, BossPhase::Spread);
        }
    }

    #[test]
    fn test_entrance_descends_then_activates() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = Boss::new(BOSS_SPAWN, 400.0, &Tuning::default());

        for _ in 0..119 {
            boss.update(&mut rng, Vec2::new(100.0, 500.0), &mut bullets);
            assert!(boss.is_entering());
        }
        assert!((boss.pos.y - (BOSS_SPAWN.y + 119.0 * 1.5)).abs() < 0.01);
        assert_eq!(boss.pos.x, BOSS_SPAWN.x);

        boss.update(&mut rng, Vec2::new(100.0, 500.0), &mut bullets);
        assert!(boss.is_active());
        assert_eq!(bullets.live_count(), 0);
        // Steering has started pulling toward the player on the left
        assert!(boss.vx < 0.0);
    }

    #[test]
    fn test_steering_clamped_and_bounced() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(400.0);
        boss.pos.x = ARENA_LEFT + 1.0;
        boss.vx = -3.0;

        boss.update(&mut rng, Vec2::new(ARENA_LEFT, 500.0), &mut bullets);
        assert_eq!(boss.pos.x, ARENA_LEFT);
        assert!(boss.vx > 0.0 && boss.vx <= MAX_VX);
    }

    #[test]
    fn test_spread_fires_every_40_ticks() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(400.0);

        for _ in 0..39 {
            boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        }
        assert_eq!(bullets.live_count(), 0);
        boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        assert_eq!(bullets.live_count(), 5);
    }

    #[test]
    fn test_fan_is_centered_downward() {
        let boss = active_boss(400.0);
        let mut bullets = BossBullets::new(0.0);
        boss.fire_fan(&mut bullets);

        let vels: Vec<Vec2> = bullets.pool().iter().map(|(_, b)| b.vel).collect();
        assert_eq!(vels.len(), 5);
        let sum_x: f32 = vels.iter().map(|v| v.x).sum();
        assert!(sum_x.abs() < 0.001);
        assert!(vels.iter().all(|v| v.y > 0.0 && (v.length() - 2.5).abs() < 0.001));
        assert!(vels[2].x.abs() < 0.001);
    }

    #[test]
    fn test_aimed_burst_centered_on_player() {
        let boss = active_boss(200.0);
        let mut bullets = BossBullets::new(0.0);
        let player = Vec2::new(250.0, 500.0);
        boss.fire_aimed(player, &mut bullets);

        let vels: Vec<Vec2> = bullets.pool().iter().map(|(_, b)| b.vel).collect();
        assert_eq!(vels.len(), 7);
        let center = vels[3].normalize();
        let expected = (player - boss.pos).normalize();
        assert!((center - expected).length() < 0.001);
        assert!(vels.iter().all(|v| (v.length() - 3.2).abs() < 0.001));
    }

    #[test]
    fn test_ring_has_sixteen_bullets() {
        let mut rng = Pcg32::seed_from_u64(9);
        let boss = active_boss(100.0);
        let mut bullets = BossBullets::new(0.0);
        boss.fire_ring(&mut rng, &mut bullets);
        assert_eq!(bullets.live_count(), 16);
        assert!(
            bullets
                .pool()
                .iter()
                .all(|(_, b)| (b.vel.length() - 2.8).abs() < 0.001)
        );
    }

    #[test]
    fn test_spiral_cadence() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(100.0);

        for _ in 0..60 {
            boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        }
        assert_eq!(boss.phase, BossPhase::Spiral);
        // One spiral shot every 6 ticks, no ring yet
        assert_eq!(bullets.live_count(), 10);

        for _ in 0..60 {
            boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        }
        // Bullets are never stepped here, so nothing is culled:
        // 20 spiral shots plus one 16-bullet ring at tick 120
        assert_eq!(bullets.live_count(), 36);
    }

    #[test]
    fn test_dive_on_300th_aimed_tick() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(200.0);
        // Player straight below: steering alone never moves the boss
        let player = Vec2::new(400.0, 500.0);

        for _ in 0..299 {
            boss.update(&mut rng, player, &mut bullets);
            assert_eq!(boss.phase, BossPhase::AimedBurst);
            assert_eq!(boss.pos, Vec2::new(400.0, 100.0));
            assert_eq!(boss.vx, 0.0);
        }

        boss.update(&mut rng, player, &mut bullets);
        assert_eq!(boss.pos.x, 400.0);
        assert!((boss.pos.y - 100.0).abs() <= 10.0);
        assert!(boss.vx.abs() <= 3.0);
        assert!(boss.vx != 0.0 || boss.pos.y != 100.0);
    }

    #[test]
    fn test_spiral_shot_angle_and_orbit() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(100.0);
        let player = Vec2::new(400.0, 500.0);

        for _ in 0..6 {
            boss.update(&mut rng, player, &mut bullets);
        }
        assert_eq!(boss.shoot_timer(), 6);
        assert_eq!(bullets.live_count(), 1);

        let check = |shot: &crate::sim::pool::Body, timer: u32| {
            let angle = timer as f32 * 0.06;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let origin = Vec2::new(400.0, 100.0) + Vec2::new(dir.x * 30.0, dir.y * 20.0);
            assert!((shot.pos - origin).length() < 0.001);
            assert!((shot.vel.normalize() - dir).length() < 0.001);
            let speed = shot.vel.length();
            assert!((2.0..3.6).contains(&speed));
        };

        let (_, first) = bullets.pool().iter().next().unwrap();
        check(first, 6);

        for _ in 0..6 {
            boss.update(&mut rng, player, &mut bullets);
        }
        let shots: Vec<_> = bullets.pool().iter().map(|(_, b)| *b).collect();
        assert_eq!(shots.len(), 2);
        check(&shots[1], 12);
    }

    #[test]
    fn test_spiral_angle_wraps_every_360_ticks() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(100.0);
        boss.shoot_timer = 366;
        boss.fire_spiral(&mut rng, &mut bullets);

        let (_, shot) = bullets.pool().iter().next().unwrap();
        let angle = 6.0_f32 * 0.06;
        assert!((shot.vel.normalize() - Vec2::new(angle.cos(), angle.sin())).length() < 0.001);
    }

    #[test]
    fn test_phase_change_reported_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(300.0);

        assert_eq!(boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets), None);
        boss.hp = 200.0;
        assert_eq!(
            boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets),
            Some(BossPhase::AimedBurst)
        );
        assert_eq!(boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets), None);
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bullets = BossBullets::new(0.0);
        let mut boss = active_boss(100.0);
        boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        assert_eq!(boss.phase, BossPhase::Spiral);

        boss.hp = 440.0;
        boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
        assert_eq!(boss.phase, BossPhase::Spiral);
    }

    #[test]
    fn test_take_damage() {
        let mut boss = active_boss(8.0);
        assert!(!boss.take_damage(4.0));
        assert!(boss.take_damage(4.0));
    }

    proptest! {
        #[test]
        fn prop_phase_monotonic_under_damage(
            hits in proptest::collection::vec(0.0f32..40.0, 1..80),
            start_hp in 300.0f32..450.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(17);
            let mut bullets = BossBullets::new(0.0);
            let mut boss = active_boss(start_hp);
            let mut last = boss.phase;
            for hit in hits {
                boss.take_damage(hit);
                boss.update(&mut rng, Vec2::new(400.0, 500.0), &mut bullets);
                prop_assert!(boss.phase >= last);
                last = boss.phase;
            }
        }
    }
}
