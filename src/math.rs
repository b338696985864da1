//! 2D vector math
//!
//! Every position and velocity in the simulation is a `Vector2` in world pixels.
//! The map is 1600x1200 with the origin in the top-left corner and Y growing
//! downwards, matching the renderer's screen space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// A 2D vector of `f32` components
///
/// # Example
///
/// ```rust
/// use hulu_brawl::math::Vector2;
///
/// let velocity = Vector2::new(3.0, 4.0);
/// assert_eq!(velocity.length(), 5.0);
/// assert_eq!(velocity * 2.0, Vector2::new(6.0, 8.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    /// Builds a unit vector pointing at `angle` radians (0 = +X)
    pub fn from_angle(angle: f32) -> Self {
        Vector2::new(angle.cos(), angle.sin())
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(&self, other: Vector2) -> f32 {
        (*self - other).length()
    }

    /// Returns the unit vector in the same direction, or zero for a zero vector
    pub fn normalized(&self) -> Vector2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vector2::ZERO
        } else {
            Vector2::new(self.x / len, self.y / len)
        }
    }

    /// Scales the vector down so its length is at most `max`
    pub fn clamp_length(&self, max: f32) -> Vector2 {
        let len = self.length();
        if len > max && len > 0.0 {
            *self * (max / len)
        } else {
            *self
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, scalar: f32) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}
