use crate::math::Vector2;

/// Velocity and friction for an entity that moves
///
/// Friction is a per-tick multiplicative damping factor in (0, 1]:
/// `1.0` means no damping, the game uses 0.95 (player) and 0.98 (everything else).
///
/// # Example
///
/// ```rust
/// use hulu_brawl::components::PhysicsComponent;
/// use hulu_brawl::math::Vector2;
///
/// let mut physics = PhysicsComponent::new(0.5).with_velocity(Vector2::new(10.0, 0.0));
/// let mut position = Vector2::ZERO;
/// physics.integrate(&mut position, 1.0, 0.01);
/// assert_eq!(physics.velocity, Vector2::new(5.0, 0.0));
/// assert_eq!(position, Vector2::new(5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    pub velocity: Vector2,
    friction: f32,
}

impl PhysicsComponent {
    /// Creates a resting body; friction is clamped into (0, 1]
    pub fn new(friction: f32) -> Self {
        PhysicsComponent {
            velocity: Vector2::ZERO,
            friction: Self::clamp_friction(friction),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn stop(&mut self) {
        self.velocity = Vector2::ZERO;
    }

    /// One integration step: `v *= friction`, snap to zero below `epsilon`, then `p += v * dt`
    pub fn integrate(&mut self, position: &mut Vector2, delta_time: f32, epsilon: f32) {
        self.velocity *= self.friction;
        if self.velocity.length() < epsilon {
            self.velocity = Vector2::ZERO;
        }
        *position += self.velocity * delta_time;
    }

    fn clamp_friction(friction: f32) -> f32 {
        if friction.is_nan() {
            1.0
        } else {
            friction.clamp(f32::MIN_POSITIVE, 1.0)
        }
    }
}
