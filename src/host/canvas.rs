//! SDL2 implementation of the [`Renderer`] capability
//!
//! SDL2's 2D renderer only fills rectangles, so circles are drawn as one
//! horizontal span per pixel row. Every SDL call can fail; failures are
//! logged and the frame carries on.

use super::text::{GLYPH_HEIGHT, draw_bitmap_text};
use hulu_brawl::render::{Color, Renderer};
use hulu_brawl::ui::HealthBarStyle;
use sdl2::pixels;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

pub struct SdlRenderer<'a> {
    canvas: &'a mut Canvas<Window>,
    width: u32,
    height: u32,
    health_bar: HealthBarStyle,
}

impl<'a> SdlRenderer<'a> {
    /// `width` and `height` are the logical resolution set on the canvas
    pub fn new(canvas: &'a mut Canvas<Window>, width: u32, height: u32) -> Self {
        SdlRenderer {
            canvas,
            width,
            height,
            health_bar: HealthBarStyle::default(),
        }
    }

    fn set_color(&mut self, color: Color) {
        let (r, g, b, a) = color.to_rgba8();
        self.canvas.set_draw_color(pixels::Color::RGBA(r, g, b, a));
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let rect = Rect::new(
            x.round() as i32,
            y.round() as i32,
            width.round().max(1.0) as u32,
            height.round().max(1.0) as u32,
        );
        report(self.canvas.fill_rect(rect));
    }
}

fn report(result: Result<(), String>) {
    if let Err(e) = result {
        log::warn!("draw call failed: {}", e);
    }
}

impl Renderer for SdlRenderer<'_> {
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.set_color(color);
        self.fill(x, y, width, height);
    }

    // `segments` only matters to polygon backends; spans are exact
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, _segments: u32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.set_color(color);
        let rows = radius.ceil() as i32;
        for dy in -rows..=rows {
            let dy = dy as f32;
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            if half > 0.0 {
                self.fill(x - half, y + dy, half * 2.0, 1.0);
            }
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.set_color(color);
        report(self.canvas.draw_line(
            Point::new(x1.round() as i32, y1.round() as i32),
            Point::new(x2.round() as i32, y2.round() as i32),
        ));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.set_color(color);
        let scale = (size / GLYPH_HEIGHT as f32).round().max(1.0) as u32;
        // (x, y) is the baseline; the font draws from its top edge
        let top = y - (GLYPH_HEIGHT * scale) as f32;
        report(draw_bitmap_text(
            self.canvas,
            text,
            x.round() as i32,
            top.round() as i32,
            scale,
        ));
    }

    fn draw_health_bar(&mut self, x: f32, y: f32, width: f32, height: f32, current: i32, max: i32) {
        let style = self.health_bar.clone();
        style.fill(self, x, y, width, height, current, max);
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
