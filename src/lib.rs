//! Hulu Brawl: simulation core of a top-down action game
//!
//! The player (a hulu gourd) fights waves of soldiers and kings on a
//! 1600x1200 field. This crate is the engine underneath: entities, the rule
//! pipeline, particles, the HUD, and session recording. Windowing and input
//! polling live in the `sdl` host binary.
//!
//! # Architecture
//!
//! - [`components`]: fixed-slot component storage (transform, physics, life, render, weapon)
//! - [`entity`] / [`registry`]: entities, stable handles, deferred spawns
//! - [`game`]: the per-tick rule pipeline, levels, and the [`GameSession`](game::GameSession)
//! - [`particles`]: seeded particle systems and presets
//! - [`render`] / [`ui`]: the renderer capability, silhouettes, HUD
//! - [`recording`]: sampled session recordings and their parser
//! - [`config`] / [`error`] / [`input`] / [`math`]: supporting types
//!
//! # Example
//!
//! ```rust
//! use hulu_brawl::config::GameConfig;
//! use hulu_brawl::game::GameSession;
//! use hulu_brawl::input::InputSnapshot;
//! use hulu_brawl::render::RecordingRenderer;
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 42);
//! let mut renderer = RecordingRenderer::new(1600, 1200);
//!
//! for _ in 0..60 {
//!     session.update(1.0 / 60.0, &InputSnapshot::empty());
//! }
//! session.render(&mut renderer);
//!
//! assert_eq!(session.level(), 1);
//! assert!(!renderer.calls.is_empty());
//! ```

pub mod components;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod input;
pub mod math;
pub mod particles;
pub mod recording;
pub mod registry;
pub mod render;
pub mod ui;
