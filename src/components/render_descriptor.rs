use crate::math::Vector2;
use crate::render::{Color, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Circle,
}

/// Shape, size, and color of a generic entity
///
/// Consumed by the presentation layer only; simulation logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDescriptor {
    pub shape: Shape,
    pub size: Vector2,
    pub color: Color,
}

impl RenderDescriptor {
    pub fn new(shape: Shape, size: Vector2, color: Color) -> Self {
        RenderDescriptor { shape, size, color }
    }

    /// Draws the bare shape centred on `position`
    pub fn draw(&self, renderer: &mut dyn Renderer, position: Vector2) {
        match self.shape {
            Shape::Rectangle => renderer.draw_rect(
                position.x - self.size.x / 2.0,
                position.y - self.size.y / 2.0,
                self.size.x,
                self.size.y,
                self.color,
            ),
            Shape::Circle => renderer.draw_circle(position.x, position.y, self.size.x, 32, self.color),
        }
    }
}
