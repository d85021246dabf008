//! Glint Renderer - Recursive CPU ray tracing
//!
//! A Whitted-style tracer for small scenes of spheres, cubes and ground
//! planes: hard shadows from a single sun, mirror reflections with a
//! bounded bounce count, procedural checker textures and distance fog.
//!
//! Frames are traced into an RGBA8 buffer at a fixed target rate by
//! `FrameDriver`, rows in parallel on the rayon pool.

mod buffer;
mod camera;
mod config;
mod error;
mod frame;
mod intersect;
mod shading;
mod tracer;

pub use buffer::{color_to_rgba, FrameBuffer};
pub use camera::{pixel_to_ndc, Camera, CameraBasis, CameraView};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use frame::{FrameDriver, FramePacer, FrameStatus, Pace, RenderContext};
pub use intersect::{
    any_hit, intersect_cube, intersect_plane, intersect_sphere, nearest_hit, to_local, HitRecord,
    Hittable,
};
pub use shading::{is_dark_tile, surface_normal, surface_uv, texture_color, Shader};
pub use tracer::{TraceStats, Tracer};

/// Re-export the scene model and common math types
pub use glint_core::{
    MaterialPreset, ObjectDesc, ObjectId, ObjectKind, ObjectUpdate, Scene, SceneObject, Texture,
    TextureMode,
};
pub use glint_math::{Color, Euler, Interval, Ray, Vec3};
