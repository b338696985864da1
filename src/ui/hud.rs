//! Screen-space HUD and game-over overlay
//!
//! The HUD reads a [`HudState`] built from committed session state after the
//! tick, so it can never show a half-applied frame.

use super::cooldown_bar::CooldownBar;
use crate::render::{Color, Renderer};

/// Values the HUD displays for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub level: u32,
    /// `(current, max)`; `None` once the player entity is gone
    pub player_health: Option<(i32, i32)>,
    /// 0.0 to 1.0
    pub skill_cooldown: f32,
}

#[derive(Debug, Default, Clone)]
pub struct Hud {
    cooldown_bar: CooldownBar,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, renderer: &mut dyn Renderer, state: &HudState) {
        let level = format!("Level: {}", state.level);
        let center_x = renderer.width() as f32 / 2.0;
        renderer.draw_text(&level, center_x - 50.0, 30.0, 20.0, Color::WHITE);

        if let Some((current, max)) = state.player_health {
            render_player_health(renderer, current, max);
        }
        self.cooldown_bar.render(renderer, state.skill_cooldown);
    }
}

/// Top-left panel: label, bar, and "current / max"
fn render_player_health(renderer: &mut dyn Renderer, current: i32, max: i32) {
    renderer.draw_rect(10.0, 10.0, 160.0, 40.0, Color::BLACK.with_alpha(0.7));
    renderer.draw_text("HP", 20.0, 30.0, 14.0, Color::WHITE);
    renderer.draw_health_bar(20.0, 35.0, 120.0, 10.0, current, max);
    renderer.draw_text(&format!("{} / {}", current, max), 145.0, 45.0, 12.0, Color::WHITE);
}

/// Dims the screen and shows the game-over box
pub fn render_game_over(renderer: &mut dyn Renderer) {
    let width = renderer.width() as f32;
    let height = renderer.height() as f32;
    let cx = width / 2.0;
    let cy = height / 2.0;

    renderer.draw_rect(0.0, 0.0, width, height, Color::BLACK.with_alpha(0.35));
    renderer.draw_rect(cx - 200.0, cy - 60.0, 400.0, 120.0, Color::BLACK.with_alpha(0.7));
    renderer.draw_text("GAME OVER", cx - 100.0, cy - 10.0, 32.0, Color::WHITE);
    renderer.draw_text(
        "PRESS ANY KEY TO RETURN",
        cx - 180.0,
        cy + 30.0,
        16.0,
        Color::rgb(0.8, 0.8, 0.8),
    );
}
