//! Game rule engine and session
//!
//! # Architecture
//!
//! - `rules.rs`: `GameRules`, the fixed per-tick phase pipeline
//! - `scene.rs`: `GameSession`, composing rules, levels, particles, recording, HUD
//! - `behavior.rs`: per-kind update hooks and silhouettes
//! - `prefabs.rs`: entity constructors
//! - `levels.rs`: wave table and level progression
//! - `spawn.rs`: rejection-sampling spawn placement
//! - `cooldown.rs`: skill cooldown state machine
//! - `collision.rs`: fixed-radius circle overlap between the two sides
//!
//! # Determinism
//!
//! All randomness goes through one [`GameRng`] owned by the session and passed
//! down explicitly. Same seed, same input snapshots, same `dt` sequence: same
//! session.

pub mod behavior;
pub mod collision;
pub mod cooldown;
pub mod levels;
pub mod prefabs;
pub mod rules;
pub mod scene;
pub mod spawn;

pub use cooldown::{CooldownState, SkillCooldown};
pub use levels::LevelDirector;
pub use rules::{Death, GameRules, Hit, TickOutcome};
pub use scene::GameSession;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The simulation's random source
pub type GameRng = ChaCha8Rng;

/// Deterministic generator for a given seed
pub fn seeded_rng(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Seed derived from the wall clock, for sessions without a configured seed
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}
