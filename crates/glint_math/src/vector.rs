//! Vector helpers that glam does not provide in the form the tracer needs.

use glam::Vec3;

/// Color as (r, g, b), nominally 0-255 until the final clamp.
pub type Color = Vec3;

/// Extension trait for Vec3 with tracer-specific helpers.
pub trait Vec3Ext {
    /// Normalize, returning the vector unchanged if its length is zero.
    fn normalize_or_self(self) -> Vec3;

    /// Mirror this incident direction about a surface normal.
    fn reflect_about(self, normal: Vec3) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn normalize_or_self(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            self
        }
    }

    fn reflect_about(self, normal: Vec3) -> Vec3 {
        self - normal * (2.0 * self.dot(normal))
    }
}

/// Linear interpolation between two scalars, exact at t = 0 and t = 1.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Channel-wise linear interpolation between two colors.
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_self() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize_or_self();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);

        assert_eq!(Vec3::ZERO.normalize_or_self(), Vec3::ZERO);
    }

    #[test]
    fn test_reflect_about() {
        let incident = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(incident.reflect_about(Vec3::Y), Vec3::new(1.0, 1.0, 0.0));

        // Head-on reflection reverses the ray
        assert_eq!(Vec3::NEG_Z.reflect_about(Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);

        // Endpoints come back bit-exact
        assert_eq!(lerp(0.1, 180.0, 1.0), 180.0);
        assert_eq!(lerp(0.1, 180.0, 0.0), 0.1);
    }

    #[test]
    fn test_lerp_color() {
        let black = Color::ZERO;
        let grey = Color::splat(180.0);

        assert_eq!(lerp_color(black, grey, 0.0), black);
        assert_eq!(lerp_color(black, grey, 1.0), grey);
        assert_eq!(lerp_color(black, grey, 0.5), Color::splat(90.0));
    }
}
