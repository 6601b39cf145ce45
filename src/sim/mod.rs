//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod enemies;
pub mod particles;
pub mod pool;
pub mod projectiles;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossPhase, phase_for};
pub use enemies::Enemies;
pub use particles::Particles;
pub use pool::{Body, Pool, SlotId};
pub use projectiles::{BossBullets, PlayerBullets};
pub use schedule::Every;
pub use snapshot::{BossView, PlayerView, Snapshot};
pub use state::{GameEvent, HitOutcome, Player, RunState, SpawnCadence, World};
pub use tick::{TickInput, TickOutcome, tick};
