use crate::math::Vector2;

/// Where entities are parked when their lifetime runs out
///
/// Expired projectiles are moved here instead of being deleted mid-frame; the
/// cleanup phase removes them at the defined point of the tick.
pub const OFF_STAGE: Vector2 = Vector2::new(-1000.0, -1000.0);

/// World position of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformComponent {
    pub position: Vector2,
}

impl TransformComponent {
    pub fn new(position: Vector2) -> Self {
        TransformComponent { position }
    }

    pub fn move_off_stage(&mut self) {
        self.position = OFF_STAGE;
    }

    /// Clamps the position into `[0, width] x [0, height]`
    pub fn keep_in_bounds(&mut self, width: f32, height: f32) {
        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }
}
