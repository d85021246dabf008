//! Surface shading: normals, checker texture, direct light, hard shadows
//! and distance fog.

use std::f32::consts::PI;

use glint_core::{ObjectKind, Scene, SceneObject, TextureMode};
use glint_math::{lerp_color, Color, Interval, Ray, Vec3, Vec3Ext};

use crate::config::RenderConfig;
use crate::intersect::{any_hit, to_local};

/// Index of the component with the largest magnitude. Ties go to x, then y.
fn dominant_axis(v: Vec3) -> usize {
    let a = v.abs();
    let max = a.max_element();
    if max == a.x {
        0
    } else if max == a.y {
        1
    } else {
        2
    }
}

/// World-space unit normal of `object` at surface point `p`.
///
/// Cubes get flat per-face normals picked from the dominant local axis.
pub fn surface_normal(object: &SceneObject, p: Vec3) -> Vec3 {
    match object.kind() {
        ObjectKind::Sphere => (p - object.position()).normalize_or_self(),
        ObjectKind::Plane => Vec3::Y,
        ObjectKind::Cube => {
            let local = to_local(object, p);
            let axis = dominant_axis(local);
            let mut n = Vec3::ZERO;
            n[axis] = if local[axis] > 0.0 { 1.0 } else { -1.0 };
            object.rotation().rotate(n).normalize_or_self()
        }
    }
}

/// Texture coordinates of `p` on the object's surface, already scaled.
pub fn surface_uv(object: &SceneObject, p: Vec3) -> (f32, f32) {
    let scale = object.texture().scale_for(object.kind());

    match object.kind() {
        ObjectKind::Sphere => {
            let d = (p - object.position()).normalize_or_self();
            let phi = d.z.atan2(d.x);
            let theta = d.y.clamp(-1.0, 1.0).acos();
            ((phi + PI) / (2.0 * PI) * scale, theta / PI * scale)
        }
        ObjectKind::Cube => {
            let extent = 2.0 * object.size();
            if extent <= 0.0 {
                return (0.0, 0.0);
            }
            let local = to_local(object, p);
            let (a, b) = match dominant_axis(local) {
                0 => (local.z, local.y),
                1 => (local.x, local.z),
                _ => (local.x, local.y),
            };
            let s = object.size();
            ((a + s) / extent * scale, (b + s) / extent * scale)
        }
        ObjectKind::Plane => {
            let origin = object.position();
            ((p.x - origin.x) / scale, (p.z - origin.z) / scale)
        }
    }
}

/// Whether the tile containing `c` is odd. `None` for non-finite input.
fn tile_parity(c: f32) -> Option<bool> {
    c.is_finite().then(|| c.floor().rem_euclid(2.0) == 1.0)
}

/// True if (u, v) lands on a darkened checker tile.
///
/// Parity is taken per coordinate in f32, so huge coordinates stay total.
/// Non-finite coordinates count as a light tile.
pub fn is_dark_tile(u: f32, v: f32) -> bool {
    match (tile_parity(u), tile_parity(v)) {
        (Some(odd_u), Some(odd_v)) => odd_u != odd_v,
        _ => false,
    }
}

/// The object's unlit color at `p`, after the procedural texture.
pub fn texture_color(object: &SceneObject, p: Vec3, checker_attenuation: f32) -> Color {
    let base = object.color();
    match object.texture().mode {
        TextureMode::None => base,
        TextureMode::Checker => {
            let (u, v) = surface_uv(object, p);
            if is_dark_tile(u, v) {
                base * checker_attenuation
            } else {
                base
            }
        }
    }
}

/// Shades hit points for one frame's scene and configuration.
#[derive(Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    light_dir: Vec3,
    fog: Interval,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self {
            scene,
            config,
            light_dir: config.light_dir(),
            fog: Interval::new(config.fog_near, config.fog_far),
        }
    }

    /// Unit vector towards the light.
    pub fn light_dir(&self) -> Vec3 {
        self.light_dir
    }

    /// Ambient plus weighted Lambertian term.
    pub fn light_intensity(&self, normal: Vec3) -> f32 {
        let n_dot_l = normal.dot(self.light_dir).max(0.0);
        self.config.ambient + self.config.diffuse * n_dot_l
    }

    /// True if anything blocks the path from `p` to the light.
    pub fn in_shadow(&self, p: Vec3) -> bool {
        let origin = p + self.light_dir * self.config.shadow_bias;
        let ray = Ray::new(origin, self.light_dir);
        any_hit(self.scene, &ray, self.config.shadow_distance)
    }

    /// Textured, lit and shadowed color, before fog.
    pub fn lit_color(&self, object: &SceneObject, p: Vec3, normal: Vec3) -> Color {
        let base = texture_color(object, p, self.config.checker_attenuation);
        let lit = base * self.light_intensity(normal);
        if self.in_shadow(p) {
            lit * self.config.shadow_attenuation
        } else {
            lit
        }
    }

    /// Blend towards the fog color by distance.
    pub fn apply_fog(&self, color: Color, distance: f32) -> Color {
        lerp_color(color, self.config.background, self.fog.fraction(distance))
    }

    /// Full local shading of a surface point seen from `distance` away.
    pub fn shade(&self, object: &SceneObject, p: Vec3, normal: Vec3, distance: f32) -> Color {
        self.apply_fog(self.lit_color(object, p, normal), distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{ObjectDesc, Texture};
    use glint_math::Euler;
    use std::f32::consts::FRAC_PI_2;

    fn single(desc: ObjectDesc) -> Scene {
        let mut scene = Scene::new("test");
        scene.create(desc);
        scene
    }

    #[test]
    fn test_sphere_normal_is_radial() {
        let scene = single(ObjectDesc::sphere(Vec3::new(1.0, 1.0, 1.0), 2.0));
        let sphere = &scene.list()[0];

        let n = surface_normal(sphere, Vec3::new(1.0, 3.0, 1.0));
        assert!((n - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_plane_normal_is_up() {
        let scene = single(ObjectDesc::plane(-5.0));
        assert_eq!(surface_normal(&scene.list()[0], Vec3::new(7.0, -5.0, 2.0)), Vec3::Y);
    }

    #[test]
    fn test_cube_face_normals() {
        let scene = single(ObjectDesc::cube(Vec3::ZERO, 1.0));
        let cube = &scene.list()[0];

        assert_eq!(surface_normal(cube, Vec3::new(1.0, 0.2, -0.3)), Vec3::X);
        assert_eq!(surface_normal(cube, Vec3::new(0.5, -1.0, 0.1)), Vec3::NEG_Y);
        assert_eq!(surface_normal(cube, Vec3::new(0.1, 0.2, -1.0)), Vec3::NEG_Z);
    }

    #[test]
    fn test_rotated_cube_normal_follows_rotation() {
        let scene = single(
            ObjectDesc::cube(Vec3::ZERO, 1.0).with_rotation(Euler::new(0.0, 0.0, FRAC_PI_2)),
        );
        let cube = &scene.list()[0];

        // Local +X face now points along world +Y
        let n = surface_normal(cube, Vec3::new(0.1, 1.0, 0.2));
        assert!((n - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_checker_tiles() {
        assert!(!is_dark_tile(0.5, 0.5));
        assert!(is_dark_tile(1.5, 0.5));
        assert!(!is_dark_tile(1.5, 1.5));
        // Negative coordinates alternate too
        assert!(is_dark_tile(-0.5, 0.5));
        assert!(!is_dark_tile(-0.5, -0.5));
    }

    #[test]
    fn test_checker_tiles_extreme_coordinates() {
        assert!(!is_dark_tile(1e31, 1e31));
        assert!(!is_dark_tile(f32::MAX, f32::MAX));
        assert!(is_dark_tile(1e31, 1.5));
        assert!(!is_dark_tile(f32::INFINITY, 0.5));
        assert!(!is_dark_tile(f32::NAN, 1.5));
    }

    #[test]
    fn test_tiny_checker_scale_stays_finite() {
        let scene = single(
            ObjectDesc::plane(0.0)
                .with_color(Color::splat(200.0))
                .with_texture(Texture::checker(1e-30)),
        );
        let plane = &scene.list()[0];

        let color = texture_color(plane, Vec3::new(10.0, 0.0, 10.0), 0.7);
        assert!(color.is_finite());
        assert_eq!(color, Color::splat(200.0));
    }

    #[test]
    fn test_sphere_uv_known_points() {
        let scene = single(ObjectDesc::sphere(Vec3::ZERO, 1.0));
        let sphere = &scene.list()[0];
        let close = |(u, v): (f32, f32), (eu, ev): (f32, f32)| {
            assert!((u - eu).abs() < 1e-4 && (v - ev).abs() < 1e-4, "({u}, {v}) != ({eu}, {ev})");
        };

        // Default sphere scale is 10; the pole sits at v = 0
        close(surface_uv(sphere, Vec3::new(0.0, 1.0, 0.0)), (5.0, 0.0));
        close(surface_uv(sphere, Vec3::new(0.0, -1.0, 0.0)), (5.0, 10.0));
        close(surface_uv(sphere, Vec3::new(1.0, 0.0, 0.0)), (5.0, 5.0));
        close(surface_uv(sphere, Vec3::new(-1.0, 0.0, 0.0)), (10.0, 5.0));
        close(surface_uv(sphere, Vec3::new(0.0, 0.0, 1.0)), (7.5, 5.0));
    }

    #[test]
    fn test_sphere_uv_uses_scale_and_center() {
        let scene = single(
            ObjectDesc::sphere(Vec3::new(5.0, 5.0, 5.0), 2.0).with_texture(Texture::checker(2.0)),
        );
        let sphere = &scene.list()[0];

        let (u, v) = surface_uv(sphere, Vec3::new(5.0, 5.0, 7.0));
        assert!((u - 1.5).abs() < 1e-4);
        assert!((v - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotated_cube_checker_uses_local_face() {
        let rotated = single(
            ObjectDesc::cube(Vec3::ZERO, 1.0)
                .with_rotation(Euler::new(0.0, 0.0, FRAC_PI_2))
                .with_color(Color::splat(200.0)),
        );
        let upright = single(ObjectDesc::cube(Vec3::ZERO, 1.0).with_color(Color::splat(200.0)));
        let p = Vec3::new(0.2, 1.0, -0.7);

        // World top is the local +X face: (z, y) = (-0.7, -0.2) maps to (0.6, 1.6)
        let (u, v) = surface_uv(&rotated.list()[0], p);
        assert!((u - 0.6).abs() < 1e-4);
        assert!((v - 1.6).abs() < 1e-4);
        let dark = texture_color(&rotated.list()[0], p, 0.7);
        assert!((dark - Color::splat(140.0)).length() < 1e-3);

        // Unrotated, the same point is on the +Y face at (2.4, 0.6)
        assert_eq!(texture_color(&upright.list()[0], p, 0.7), Color::splat(200.0));
        let lit = texture_color(&rotated.list()[0], Vec3::new(-0.2, 1.0, -0.7), 0.7);
        assert_eq!(lit, Color::splat(200.0));
    }

    #[test]
    fn test_plane_texture_uses_world_tiles() {
        let scene = single(ObjectDesc::plane(0.0).with_color(Color::splat(200.0)));
        let plane = &scene.list()[0];

        // Default plane tile is 50 units
        assert_eq!(texture_color(plane, Vec3::new(10.0, 0.0, 10.0), 0.7), Color::splat(200.0));
        let dark = texture_color(plane, Vec3::new(60.0, 0.0, 10.0), 0.7);
        assert!((dark - Color::splat(140.0)).length() < 1e-4);
    }

    #[test]
    fn test_untextured_keeps_base_color() {
        let scene = single(
            ObjectDesc::plane(0.0)
                .with_color(Color::splat(200.0))
                .with_texture(Texture::none()),
        );
        let plane = &scene.list()[0];

        assert_eq!(texture_color(plane, Vec3::new(60.0, 0.0, 10.0), 0.7), Color::splat(200.0));
    }

    #[test]
    fn test_cube_uv_spans_face() {
        let scene = single(ObjectDesc::cube(Vec3::ZERO, 1.0));
        let cube = &scene.list()[0];

        // +Y face maps (x, z) from [-1, 1] to [0, 4]
        let (u, v) = surface_uv(cube, Vec3::new(-0.5, 1.0, 0.5));
        assert!((u - 1.0).abs() < 1e-5);
        assert!((v - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_light_intensity() {
        let scene = Scene::new("empty");
        let config = RenderConfig::default();
        let shader = Shader::new(&scene, &config);

        let facing = shader.light_intensity(shader.light_dir());
        assert!((facing - 1.0).abs() < 1e-6);

        let away = shader.light_intensity(-shader.light_dir());
        assert!((away - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_from_occluder() {
        let config = RenderConfig::default();
        let mut scene = Scene::new("test");
        scene.create(ObjectDesc::plane(0.0));

        {
            let shader = Shader::new(&scene, &config);
            assert!(!shader.in_shadow(Vec3::ZERO));
        }

        let blocker = config.light_dir() * 50.0;
        scene.create(ObjectDesc::sphere(blocker, 5.0));
        let shader = Shader::new(&scene, &config);
        assert!(shader.in_shadow(Vec3::ZERO));
    }

    #[test]
    fn test_fog_bounds() {
        let scene = Scene::new("empty");
        let config = RenderConfig::default();
        let shader = Shader::new(&scene, &config);
        let lit = Color::new(10.0, 20.0, 30.0);

        assert_eq!(shader.apply_fog(lit, 0.0), lit);
        assert_eq!(shader.apply_fog(lit, config.fog_near), lit);
        assert_eq!(shader.apply_fog(lit, config.fog_far), config.background);
        assert_eq!(shader.apply_fog(lit, config.fog_far * 3.0), config.background);
    }

    #[test]
    fn test_fog_is_monotonic() {
        let scene = Scene::new("empty");
        let config = RenderConfig::default();
        let shader = Shader::new(&scene, &config);
        let lit = Color::ZERO;

        let mut previous = shader.apply_fog(lit, config.fog_near).x;
        for step in 1..=20 {
            let d = config.fog_near + (config.fog_far - config.fog_near) * step as f32 / 20.0;
            let current = shader.apply_fog(lit, d).x;
            assert!(current >= previous);
            previous = current;
        }
        assert!((previous - config.background.x).abs() < 1e-3);
    }
}
