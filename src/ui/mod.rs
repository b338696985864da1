//! HUD components
//!
//! Stateless, procedural UI drawn through the [`Renderer`](crate::render::Renderer)
//! capability after the world:
//!
//! - [`OverheadBar`]: world-space health bar above soldiers and kings
//! - [`HealthBarStyle`]: the fill every backend uses for `draw_health_bar`
//! - [`CooldownBar`]: top-right skill cooldown panel
//! - [`Hud`]: level text, player health panel, cooldown panel
//! - [`render_game_over`]: dimmed overlay with the return prompt
//!
//! # Example Usage
//!
//! ```rust
//! use hulu_brawl::render::RecordingRenderer;
//! use hulu_brawl::ui::{Hud, HudState};
//!
//! let hud = Hud::new();
//! let mut renderer = RecordingRenderer::new(1600, 1200);
//! hud.render(&mut renderer, &HudState { level: 2, player_health: Some((60, 100)), skill_cooldown: 0.5 });
//!
//! assert!(renderer.texts().contains(&"Level: 2"));
//! ```

pub mod cooldown_bar;
pub mod health_bar;
pub mod hud;

pub use cooldown_bar::CooldownBar;
pub use health_bar::{HealthBarStyle, OverheadBar, fill_fraction};
pub use hud::{Hud, HudState, render_game_over};
