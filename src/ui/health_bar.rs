//! Health bars
//!
//! Two pieces:
//! - [`HealthBarStyle`]: how a bar is filled. Backends call
//!   [`HealthBarStyle::fill`] from their `Renderer::draw_health_bar`, so
//!   every bar in the game looks the same.
//! - [`OverheadBar`]: where a bar sits relative to an entity. Soldiers and
//!   kings carry one above their heads.
//!
//! # Example
//!
//! ```rust
//! use hulu_brawl::math::Vector2;
//! use hulu_brawl::render::{DrawCall, RecordingRenderer};
//! use hulu_brawl::ui::OverheadBar;
//!
//! let mut renderer = RecordingRenderer::new(1600, 1200);
//! OverheadBar::soldier().render(&mut renderer, Vector2::new(100.0, 100.0), 40, 100);
//!
//! assert_eq!(
//!     renderer.calls[0],
//!     DrawCall::HealthBar { x: 85.0, y: 70.0, width: 30.0, height: 4.0, current: 40, max: 100 }
//! );
//! ```

use crate::math::Vector2;
use crate::render::{Color, Renderer};

/// Visual style of a health bar fill
#[derive(Debug, Clone)]
pub struct HealthBarStyle {
    /// Shown where health is missing
    pub background_color: Color,

    /// Fill colour above the low-health threshold
    pub health_color: Color,

    /// Fill colour at or below the threshold
    pub low_health_color: Color,

    /// Fraction of max health counted as low
    pub low_health_threshold: f32,
}

impl Default for HealthBarStyle {
    fn default() -> Self {
        HealthBarStyle {
            background_color: Color::rgb(0.3, 0.3, 0.3),
            health_color: Color::rgb(0.0, 0.8, 0.0),
            low_health_color: Color::rgb(0.8, 0.0, 0.0),
            low_health_threshold: 0.3,
        }
    }
}

impl HealthBarStyle {
    /// Draws the bar as two rectangles: background, then the filled portion
    pub fn fill<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        current: i32,
        max: i32,
    ) {
        renderer.draw_rect(x, y, width, height, self.background_color);

        let fraction = fill_fraction(current, max);
        if fraction <= 0.0 {
            return;
        }
        let color = if fraction <= self.low_health_threshold {
            self.low_health_color
        } else {
            self.health_color
        };
        renderer.draw_rect(x, y, width * fraction, height, color);
    }
}

/// `current / max` clamped to [0, 1]; an empty max reads as empty
pub fn fill_fraction(current: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (current as f32 / max as f32).clamp(0.0, 1.0)
}

/// A health bar anchored above an entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverheadBar {
    pub width: f32,
    pub height: f32,
    /// Offset from the entity position to the bar's top-left corner
    pub offset: Vector2,
}

impl OverheadBar {
    pub fn soldier() -> Self {
        OverheadBar {
            width: 30.0,
            height: 4.0,
            offset: Vector2::new(-15.0, -30.0),
        }
    }

    /// Wider and higher, over the crown
    pub fn king() -> Self {
        OverheadBar {
            width: 40.0,
            height: 5.0,
            offset: Vector2::new(-20.0, -38.0),
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer, position: Vector2, current: i32, max: i32) {
        let corner = position + self.offset;
        renderer.draw_health_bar(corner.x, corner.y, self.width, self.height, current, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, RecordingRenderer};

    #[test]
    fn test_fill_fraction_clamps() {
        assert_eq!(fill_fraction(50, 100), 0.5);
        assert_eq!(fill_fraction(-5, 100), 0.0);
        assert_eq!(fill_fraction(150, 100), 1.0);
        assert_eq!(fill_fraction(10, 0), 0.0);
    }

    #[test]
    fn test_fill_uses_low_colour_when_low() {
        let style = HealthBarStyle::default();
        let mut renderer = RecordingRenderer::new(100, 100);
        style.fill(&mut renderer, 0.0, 0.0, 100.0, 10.0, 20, 100);

        assert_eq!(renderer.calls.len(), 2);
        match &renderer.calls[1] {
            DrawCall::Rect { width, color, .. } => {
                assert_eq!(*width, 20.0);
                assert_eq!(*color, style.low_health_color);
            }
            other => panic!("expected fill rect, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_bar_draws_only_background() {
        let mut renderer = RecordingRenderer::new(100, 100);
        HealthBarStyle::default().fill(&mut renderer, 0.0, 0.0, 30.0, 4.0, 0, 100);
        assert_eq!(renderer.calls.len(), 1);
    }

    #[test]
    fn test_king_bar_position() {
        let mut renderer = RecordingRenderer::new(100, 100);
        OverheadBar::king().render(&mut renderer, Vector2::new(200.0, 200.0), 200, 200);
        assert_eq!(
            renderer.calls,
            vec![DrawCall::HealthBar {
                x: 180.0,
                y: 162.0,
                width: 40.0,
                height: 5.0,
                current: 200,
                max: 200
            }]
        );
    }
}
