//! World state and run bookkeeping
//!
//! Everything one run owns lives in [`World`]: the pools, the player, the
//! boss and the run counters. A reset rebuilds all of it at once.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boss::{Boss, BossPhase};
use super::enemies::Enemies;
use super::particles::Particles;
use super::projectiles::{BossBullets, PlayerBullets};
use super::schedule::Every;
use super::snapshot::Snapshot;
use crate::consts::*;
use crate::tuning::Tuning;

/// Something that happened during the last tick (for audio/HUD hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    VolleyFired,
    EnemyKilled { pos: Vec2 },
    PlayerHit { hp: u8 },
    LifeLost { lives: u8 },
    GameOver { score: u64 },
    BossSpawned { hp: f32 },
    BossPhaseChanged { phase: BossPhase },
    BossDefeated { pos: Vec2 },
}

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Lost one HP, still standing
    Damaged,
    /// HP ran out; respawned with a life less
    LifeLost,
    /// HP ran out on the last life
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub hp: u8,
    /// Ticks until the next volley is allowed
    pub fire_cooldown: u32,
    /// Fire was held on the previous tick (for edge detection)
    pub fire_held: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_SPAWN,
            hp: PLAYER_MAX_HP,
            fire_cooldown: 0,
            fire_held: false,
        }
    }
}

impl Player {
    /// Move by `delta` and clamp into the safe rectangle
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos = (self.pos + delta).clamp(PLAYER_MIN, PLAYER_MAX);
    }

    pub fn respawn(&mut self) {
        self.pos = PLAYER_SPAWN;
        self.hp = PLAYER_MAX_HP;
    }

    /// Take one point of damage and settle lives / game over
    pub fn take_hit(&mut self, run: &mut RunState) -> HitOutcome {
        self.hp = self.hp.saturating_sub(1);
        if self.hp > 0 {
            return HitOutcome::Damaged;
        }

        run.lives = run.lives.saturating_sub(1);
        if run.lives > 0 {
            self.respawn();
            log::info!("Life lost, {} remaining", run.lives);
            HitOutcome::LifeLost
        } else {
            run.game_over = true;
            log::info!("Game over: score {}, stage {}", run.score, run.stage);
            HitOutcome::GameOver
        }
    }
}

/// Score, lives and stage progress for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub score: u64,
    pub lives: u8,
    /// Ticks since the last reset
    pub stage_timer: u64,
    /// Bosses defeated + 1
    pub stage: u32,
    /// A boss may spawn once `stage_timer` exceeds this
    pub next_boss_at: u64,
    pub game_over: bool,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            stage_timer: 0,
            stage: 1,
            next_boss_at: tuning.boss_interval,
            game_over: false,
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

/// Enemy spawn rolls and bursts, suppressed while a boss is present
#[derive(Debug, Clone)]
pub struct SpawnCadence {
    pub roll: Every,
    pub burst: Every,
}

impl SpawnCadence {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            roll: Every::new(tuning.enemy_spawn_interval),
            burst: Every::new(tuning.burst_interval),
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub player: Player,
    pub run: RunState,
    pub bullets: PlayerBullets,
    pub enemies: Enemies,
    pub particles: Particles,
    pub boss_bullets: BossBullets,
    pub boss: Option<Boss>,
    pub cadence: SpawnCadence,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Fresh run with the given RNG seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let tuning = tuning.sanitized();
        Self {
            player: Player::default(),
            run: RunState::new(&tuning),
            bullets: PlayerBullets::new(),
            enemies: Enemies::new(),
            particles: Particles::new(tuning.particle_damping),
            boss_bullets: BossBullets::new(tuning.boss_bullet_gravity),
            boss: None,
            cadence: SpawnCadence::new(&tuning),
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Rebuild every pool, the player, the boss and the run counters.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(self.tuning.clone(), rng);
        log::info!("Run reset");
    }

    /// Reset only if the run is over; returns whether it happened
    pub fn request_reset(&mut self) -> bool {
        if !self.run.game_over {
            log::warn!("Reset ignored: run still in progress");
            return false;
        }
        self.reset();
        true
    }

    /// Spawn the boss now (no-op if one is present)
    pub fn spawn_boss(&mut self) {
        if self.boss.is_some() {
            return;
        }
        let boss = Boss::spawn(&mut self.rng, &self.tuning);
        log::info!("Boss spawned (stage {}, hp {:.0})", self.run.stage, boss.hp);
        self.events.push(GameEvent::BossSpawned { hp: boss.hp });
        self.boss = Some(boss);
    }

    /// Spawn one random enemy (dropped when the pool is full)
    pub fn spawn_enemy(&mut self) {
        self.enemies.spawn(&mut self.rng);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
