// Euler rotation utilities
//
// Object orientation is stored as three angles applied about X, then Y,
// then Z. Composed as quaternions so rotate/inverse_rotate stay exact
// inverses of each other.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation as radians about the X, Y and Z axes, applied in that order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    /// No rotation.
    pub const ZERO: Euler = Euler {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a rotation from angles in radians.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a rotation from angles in degrees.
    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// The composed rotation: X first, then Y, then Z.
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_z(self.z) * Quat::from_rotation_y(self.y) * Quat::from_rotation_x(self.x)
    }

    /// Rotate a vector from local into world orientation.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.to_quat() * v
    }

    /// Undo `rotate`: about Z, then Y, then X, each by the negated angle.
    pub fn inverse_rotate(&self, v: Vec3) -> Vec3 {
        let undo = Quat::from_rotation_x(-self.x)
            * Quat::from_rotation_y(-self.y)
            * Quat::from_rotation_z(-self.z);
        undo * v
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
