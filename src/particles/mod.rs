//! Particle engine
//!
//! Short-lived visual particles with continuous and burst emission. Particle
//! systems never touch the entity registry: the session moves their anchors
//! to positions the rule engine has already committed, then steps them.
//!
//! # Architecture
//!
//! - `config.rs`: `ParticleConfig` with emission ranges and the effect presets
//! - `system.rs`: `ParticleSystem` (emission, integration, culling, drawing)

pub mod config;
pub mod system;

pub use config::{EmissionRanges, ParticleConfig, Range};
pub use system::{Particle, ParticleSystem};
