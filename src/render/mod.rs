//! Render capability consumed by the simulation core
//!
//! The core never owns a graphics context. Everything visible is issued as
//! primitive draw calls against a [`Renderer`] once per render pass:
//! - [`silhouettes`]: per-kind body shapes (player, soldier, king, projectiles, trees)
//! - `crate::ui`: HUD adapters reading committed state
//! - `crate::particles`: particle discs
//!
//! Draw calls are infallible from the core's point of view. A backend that can
//! fail (SDL2 returns `Result<(), String>` for every fill) logs the failure and
//! carries on, so one bad primitive never aborts a frame.

pub mod color;
pub mod silhouettes;

pub use color::Color;

/// Primitive drawing operations provided by the graphics backend
///
/// Coordinates are world pixels with the origin in the top-left corner.
///
/// # Example
///
/// ```rust
/// use hulu_brawl::render::{Color, Renderer};
///
/// fn draw_marker(renderer: &mut dyn Renderer, x: f32, y: f32) {
///     renderer.draw_circle(x, y, 4.0, 16, Color::rgb(1.0, 0.0, 0.0));
/// }
/// ```
pub trait Renderer {
    /// Filled axis-aligned rectangle with its top-left corner at `(x, y)`
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Filled circle approximated with `segments` triangles
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, segments: u32, color: Color);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);

    /// Text with its baseline-left at `(x, y)`; `size` is the glyph height in pixels
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// Health bar widget filled proportionally to `current / max`
    fn draw_health_bar(&mut self, x: f32, y: f32, width: f32, height: f32, current: i32, max: i32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;
}

/// A renderer that records draw calls instead of drawing them
///
/// Used by tests to assert on what the core asked the backend to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub width: u32,
    pub height: u32,
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect { x: f32, y: f32, width: f32, height: f32, color: Color },
    Circle { x: f32, y: f32, radius: f32, segments: u32, color: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, color: Color },
    Text { text: String, x: f32, y: f32, size: f32, color: Color },
    HealthBar { x: f32, y: f32, width: f32, height: f32, current: i32, max: i32 },
}

impl RecordingRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingRenderer {
            calls: Vec::new(),
            width,
            height,
        }
    }

    /// All text strings drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
    }

    pub fn health_bars(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::HealthBar { current, max, .. } => Some((*current, *max)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, width, height, color });
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, segments: u32, color: Color) {
        self.calls.push(DrawCall::Circle { x, y, radius, segments, color });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.calls.push(DrawCall::Line { x1, y1, x2, y2, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    fn draw_health_bar(&mut self, x: f32, y: f32, width: f32, height: f32, current: i32, max: i32) {
        self.calls.push(DrawCall::HealthBar { x, y, width, height, current, max });
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
