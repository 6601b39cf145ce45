//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so a balance pass can
//! be done from a JSON file. Missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs read by the simulation at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Distance moved per tick for each held direction
    pub player_speed: f32,
    /// Ticks between volleys
    pub fire_cooldown: u32,
    /// Re-fire while the trigger is held (off = one volley per press)
    pub auto_fire: bool,

    // === Enemies ===
    /// Ticks between spawn rolls
    pub enemy_spawn_interval: u32,
    /// Probability a spawn roll produces an enemy
    pub enemy_spawn_chance: f64,
    /// Ticks between guaranteed bursts
    pub burst_interval: u32,
    /// Enemies per burst
    pub burst_size: u32,
    pub enemy_score: u64,

    // === Boss ===
    /// Stage ticks before the first boss
    pub boss_interval: u64,
    /// Stage ticks after a boss falls before the next may arrive
    pub boss_respawn_delay: u64,
    /// Invulnerable descent duration
    pub boss_entrance_ticks: u32,
    pub boss_entrance_speed: f32,
    /// Boss HP is drawn from [min, max)
    pub boss_hp_min: f32,
    pub boss_hp_max: f32,
    pub boss_damage_per_hit: f32,
    pub boss_score: u64,

    // === Effects ===
    pub particle_damping: f32,
    /// Downward acceleration applied to boss bullets each tick
    pub boss_bullet_gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 4.0,
            fire_cooldown: 8,
            auto_fire: false,

            enemy_spawn_interval: 20,
            enemy_spawn_chance: 5.0 / 8.0,
            burst_interval: 600,
            burst_size: 3,
            enemy_score: 10,

            boss_interval: 1200,
            boss_respawn_delay: 1200,
            boss_entrance_ticks: 120,
            boss_entrance_speed: 1.5,
            boss_hp_min: 300.0,
            boss_hp_max: 450.0,
            boss_damage_per_hit: 4.0,
            boss_score: 500,

            particle_damping: 0.98,
            boss_bullet_gravity: 0.01,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a file, falling back to defaults when it can't be used
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break scheduling or random ranges
    pub fn sanitized(mut self) -> Self {
        self.enemy_spawn_interval = self.enemy_spawn_interval.max(1);
        self.burst_interval = self.burst_interval.max(1);
        self.enemy_spawn_chance = self.enemy_spawn_chance.clamp(0.0, 1.0);
        if self.boss_hp_max <= self.boss_hp_min {
            self.boss_hp_max = self.boss_hp_min + 1.0;
        }
        self
    }
}
