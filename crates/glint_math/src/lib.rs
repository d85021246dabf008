// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod euler;
mod interval;
mod ray;
mod vector;

pub use euler::Euler;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{lerp, lerp_color, Color, Vec3Ext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scales_like_vec3() {
        let c: Color = Color::new(200.0, 100.0, 50.0) * 0.5;
        assert_eq!(c, Vec3::new(100.0, 50.0, 25.0));
        assert_eq!(c.max_element(), 100.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}
