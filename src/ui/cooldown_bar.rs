//! Skill cooldown panel
//!
//! Screen-space panel in the top-right corner: a dark box, a label, a grey
//! track, and a fill that is yellow while recharging and green once ready.

use crate::render::{Color, Renderer};

const PANEL_WIDTH: f32 = 180.0;
const PANEL_HEIGHT: f32 = 40.0;
const TRACK_WIDTH: f32 = 140.0;
const TRACK_HEIGHT: f32 = 10.0;

pub const READY_COLOR: Color = Color::rgb(0.0, 1.0, 0.0);
pub const CHARGING_COLOR: Color = Color::rgb(1.0, 0.8, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownBar {
    /// Gap between the panel and the right/top screen edges
    pub margin: f32,
}

impl Default for CooldownBar {
    fn default() -> Self {
        CooldownBar { margin: 10.0 }
    }
}

impl CooldownBar {
    pub fn render(&self, renderer: &mut dyn Renderer, percentage: f32) {
        let percentage = percentage.clamp(0.0, 1.0);
        let x = renderer.width() as f32 - PANEL_WIDTH - self.margin;
        let y = self.margin;

        renderer.draw_rect(x, y, PANEL_WIDTH, PANEL_HEIGHT, Color::BLACK.with_alpha(0.7));
        renderer.draw_text("SKILL (J)", x + 10.0, y + 20.0, 14.0, Color::WHITE);

        let track_x = x + 20.0;
        let track_y = y + 25.0;
        renderer.draw_rect(track_x, track_y, TRACK_WIDTH, TRACK_HEIGHT, Color::rgb(0.3, 0.3, 0.3));

        let fill = if percentage >= 1.0 { READY_COLOR } else { CHARGING_COLOR };
        // Whole pixels, like the rest of the HUD
        let filled = (TRACK_WIDTH * percentage).floor();
        if filled > 0.0 {
            renderer.draw_rect(track_x, track_y, filled, TRACK_HEIGHT, fill);
        }

        let label = format!("{:.0}%", percentage * 100.0);
        renderer.draw_text(&label, x + 165.0, y + 35.0, 12.0, Color::WHITE);
    }
}
