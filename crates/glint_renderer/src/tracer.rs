//! Recursive Whitted-style tracer.
//!
//! A ray resolves to the background on a miss, to the shaded surface color
//! on an opaque hit, and to a blend of local and mirrored color on a
//! reflective hit. Recursion is bounded by `RenderConfig::max_depth`.

use glint_core::{ObjectId, Scene};
use glint_math::{lerp_color, Color, Ray, Vec3Ext};

use crate::config::RenderConfig;
use crate::intersect::nearest_hit;
use crate::shading::{surface_normal, Shader};

/// Ray counts gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Top-level rays (one per pixel)
    pub primary_rays: u64,
    /// Recursive evaluations spawned by reflective hits
    pub reflection_rays: u64,
    /// Shadow rays cast while shading
    pub shadow_rays: u64,
    /// Deepest recursion level evaluated
    pub max_depth_reached: u32,
}

impl TraceStats {
    /// Combine counts from two disjoint sets of rays.
    pub fn merge(self, other: TraceStats) -> TraceStats {
        TraceStats {
            primary_rays: self.primary_rays + other.primary_rays,
            reflection_rays: self.reflection_rays + other.reflection_rays,
            shadow_rays: self.shadow_rays + other.shadow_rays,
            max_depth_reached: self.max_depth_reached.max(other.max_depth_reached),
        }
    }
}

/// Traces rays against one frame's scene.
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    shader: Shader<'a>,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self {
            scene,
            config,
            shader: Shader::new(scene, config),
        }
    }

    pub fn shader(&self) -> &Shader<'a> {
        &self.shader
    }

    /// Color seen along a camera ray.
    pub fn trace_primary(&self, ray: &Ray, stats: &mut TraceStats) -> Color {
        stats.primary_rays += 1;
        self.trace_with_stats(ray, 0, None, stats)
    }

    /// Color seen along `ray` at recursion `depth`, skipping `ignore`.
    pub fn trace(&self, ray: &Ray, depth: u32, ignore: Option<ObjectId>) -> Color {
        self.trace_with_stats(ray, depth, ignore, &mut TraceStats::default())
    }

    /// `trace`, recording ray counts into `stats`.
    pub fn trace_with_stats(
        &self,
        ray: &Ray,
        depth: u32,
        ignore: Option<ObjectId>,
        stats: &mut TraceStats,
    ) -> Color {
        if depth > 0 {
            stats.reflection_rays += 1;
        }
        stats.max_depth_reached = stats.max_depth_reached.max(depth);

        // Past the bounce limit
        if depth > self.config.max_depth {
            return self.config.background;
        }

        let hit = match nearest_hit(self.scene, ray, ignore) {
            Some(hit) if hit.t <= self.config.max_distance => hit,
            _ => return self.config.background,
        };

        let normal = surface_normal(hit.object, hit.p);
        stats.shadow_rays += 1;
        let local = self.shader.shade(hit.object, hit.p, normal, hit.t);

        if !hit.object.is_reflective() {
            return local;
        }

        let bounced = Ray::new(
            hit.p + normal * self.config.reflection_bias,
            ray.direction().reflect_about(normal),
        );
        let reflected = self.trace_with_stats(&bounced, depth + 1, Some(hit.object.id()), stats);

        lerp_color(local, reflected, hit.object.reflectivity())
    }
}
