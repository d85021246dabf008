//! Camera for ray generation.
//!
//! The camera is a position plus yaw/pitch (no roll). Each frame it is
//! frozen into a `CameraView` that caches the orthonormal basis and
//! turns pixel coordinates into primary rays.

use glint_math::{Ray, Vec3, Vec3Ext};
use serde::{Deserialize, Serialize};

/// Pitch stays this far away from straight up/down when using `look`.
const PITCH_MARGIN: f32 = 0.01;

/// Free-flying camera state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation around +Y in radians; 0 looks down +Z
    pub yaw: f32,
    /// Elevation in radians; positive looks up
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -500.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Create a new camera.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Viewing direction from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
        .normalize_or_self()
    }

    /// Forward, right and a re-orthogonalized up vector.
    pub fn basis(&self) -> CameraBasis {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or_self();
        let up = right.cross(forward).normalize_or_self();
        CameraBasis { forward, right, up }
    }

    /// Apply a mouse-look delta, keeping pitch short of the poles.
    pub fn look(&mut self, d_yaw: f32, d_pitch: f32) {
        let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-limit, limit);
    }

    /// Move along the view direction, the right vector and world up.
    pub fn fly(&mut self, forward: f32, right: f32, up: f32) {
        let basis = self.basis();
        self.position += basis.forward * forward + basis.right * right + Vec3::Y * up;
    }

    /// Freeze the camera for rendering a `width` x `height` frame.
    pub fn view(&self, width: u32, height: u32, fov_scale: f32) -> CameraView {
        CameraView {
            origin: self.position,
            basis: self.basis(),
            width,
            height,
            fov_scale,
        }
    }

    /// Primary ray through pixel (x, y) of a `width` x `height` frame.
    ///
    /// Rebuilds the basis each call; use `view` when tracing many pixels.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32, fov_scale: f32) -> Ray {
        self.view(width, height, fov_scale).ray_for_pixel(x, y)
    }
}

/// Map a pixel center to normalized device coordinates in [-1, 1].
///
/// +x is right, +y is up; pixel row 0 is the top of the image.
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32) -> (f32, f32) {
    let ndc_x = ((x as f32 + 0.5) / width as f32) * 2.0 - 1.0;
    let ndc_y = 1.0 - ((y as f32 + 0.5) / height as f32) * 2.0;
    (ndc_x, ndc_y)
}

/// A camera frozen for one frame.
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub origin: Vec3,
    pub basis: CameraBasis,
    pub width: u32,
    pub height: u32,
    pub fov_scale: f32,
}

impl CameraView {
    /// Primary ray through the center of pixel (x, y).
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let (ndc_x, ndc_y) = pixel_to_ndc(x, y, self.width, self.height);
        let b = &self.basis;
        let direction = (b.forward
            + b.right * (ndc_x * self.fov_scale)
            + b.up * (ndc_y * self.fov_scale))
            .normalize_or_self();
        Ray::new(self.origin, direction)
    }
}
