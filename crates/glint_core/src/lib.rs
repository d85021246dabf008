//! Glint Core - Scene object model for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene objects**: `SceneObject`, `ObjectKind`, `Texture`, presets
//! - **Scene container**: `Scene` with create / update / get / remove
//!
//! # Example
//!
//! ```
//! use glint_core::{ObjectDesc, ObjectUpdate, Scene};
//! use glint_math::Vec3;
//!
//! let mut scene = Scene::new("demo");
//! let ball = scene.create(ObjectDesc::sphere(Vec3::new(0.0, 50.0, 0.0), 50.0));
//! scene.update(ball, ObjectUpdate::new().reflectivity(0.8));
//! assert_eq!(scene.get(ball).map(|o| o.reflectivity()), Some(0.8));
//! ```

pub mod object;
pub mod scene;

// Re-export commonly used types
pub use object::{
    MaterialPreset, ObjectDesc, ObjectId, ObjectKind, ObjectUpdate, ParsePresetError,
    RotationUpdate, SceneObject, Texture, TextureMode,
};
pub use scene::Scene;
