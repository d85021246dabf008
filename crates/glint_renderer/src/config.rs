//! Render configuration.
//!
//! Every engine constant lives here so callers can tune or load them.
//! Missing fields in a serialized config fall back to the defaults.

use glint_math::{Color, Vec3, Vec3Ext};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Full vertical field of view in degrees
    pub fov_degrees: f32,
    /// Reflection bounces allowed after the primary hit
    pub max_depth: u32,
    /// Hits farther than this resolve to the background
    pub max_distance: f32,
    /// Background color, also used as the fog color
    pub background: Color,
    /// Direction towards the sun (normalized before use)
    pub light_direction: Vec3,
    /// Lighting floor applied to every surface
    pub ambient: f32,
    /// Weight of the Lambertian term
    pub diffuse: f32,
    /// Multiplier applied to points in shadow
    pub shadow_attenuation: f32,
    /// Offset of the shadow ray origin along the light direction
    pub shadow_bias: f32,
    /// Occluders beyond this distance do not cast shadows
    pub shadow_distance: f32,
    /// Offset of the reflected ray origin along the surface normal
    pub reflection_bias: f32,
    /// Multiplier applied to the dark checker tiles
    pub checker_attenuation: f32,
    /// Distance at which fog starts
    pub fog_near: f32,
    /// Distance at which fog fully replaces the surface
    pub fog_far: f32,
    /// Frame pacing target
    pub target_fps: f32,
    /// Trace rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            fov_degrees: 60.0,
            max_depth: 3,
            max_distance: 1000.0,
            background: Color::splat(180.0),
            light_direction: default_light_direction(),
            ambient: 0.2,
            diffuse: 0.8,
            shadow_attenuation: 0.3,
            shadow_bias: 1e-2,
            shadow_distance: 1e4,
            reflection_bias: 1e-4,
            checker_attenuation: 0.7,
            fog_near: 100.0,
            fog_far: 1000.0,
            target_fps: 24.0,
            parallel: true,
        }
    }
}

/// Sun elevated 45 degrees, swung 135 degrees around +Y.
fn default_light_direction() -> Vec3 {
    let elevation = std::f32::consts::FRAC_PI_4;
    let azimuth = std::f32::consts::PI * 0.75;
    Vec3::new(
        elevation.cos() * azimuth.sin(),
        elevation.sin(),
        elevation.cos() * azimuth.cos(),
    )
    .normalize_or_self()
}

impl RenderConfig {
    /// Set output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the fog range.
    pub fn with_fog(mut self, near: f32, far: f32) -> Self {
        self.fog_near = near;
        self.fog_far = far;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Unit vector towards the light.
    pub fn light_dir(&self) -> Vec3 {
        self.light_direction.normalize_or_self()
    }

    /// Tangent of half the field of view, the NDC-to-camera scale.
    pub fn fov_scale(&self) -> f32 {
        (self.fov_degrees.to_radians() * 0.5).tan()
    }

    /// Check the configuration for values the tracer cannot work with.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(RenderError::InvalidFrameRate(self.target_fps));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(RenderError::InvalidFieldOfView(self.fov_degrees));
        }
        if !(self.fog_far > self.fog_near) {
            return Err(RenderError::InvalidFogRange {
                near: self.fog_near,
                far: self.fog_far,
            });
        }
        if !self.light_direction.is_finite() || self.light_direction.length_squared() == 0.0 {
            return Err(RenderError::InvalidLightDirection);
        }

        let non_negative = [
            ("max_distance", self.max_distance),
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("shadow_attenuation", self.shadow_attenuation),
            ("shadow_bias", self.shadow_bias),
            ("shadow_distance", self.shadow_distance),
            ("reflection_bias", self.reflection_bias),
            ("checker_attenuation", self.checker_attenuation),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RenderError::InvalidParameter { name, value });
            }
        }

        if self.checker_attenuation > 1.0 || self.shadow_attenuation > 1.0 {
            log::warn!(
                "Attenuation above 1.0 brightens instead of darkening (checker={}, shadow={})",
                self.checker_attenuation,
                self.shadow_attenuation
            );
        }

        Ok(())
    }
}
