//! Scene object types.
//!
//! A `SceneObject` is one primitive with pose, material color,
//! reflectivity and an optional procedural texture. Objects are built
//! from an `ObjectDesc` and changed through `ObjectUpdate`, both of which
//! go through the clamping setters so the invariants hold on every write.

use std::fmt;
use std::str::FromStr;

use glint_math::{Color, Euler, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a scene object. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of primitive shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Sphere of radius `size` around `position`.
    Sphere,
    /// Cube of half-extent `size`, rotated by the object's Euler angles.
    Cube,
    /// Infinite horizontal plane at `position.y`, facing +Y.
    Plane,
}

impl ObjectKind {
    /// Checker scale used when the texture does not set one.
    ///
    /// Sphere and cube scales count tiles across the surface
    /// parameterization; the plane scale is the world size of one tile.
    pub fn default_texture_scale(self) -> f32 {
        match self {
            ObjectKind::Sphere => 10.0,
            ObjectKind::Cube => 4.0,
            ObjectKind::Plane => 50.0,
        }
    }
}

/// Procedural texture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureMode {
    /// Flat base color.
    None,
    /// Alternating darkened tiles.
    #[default]
    Checker,
}

/// Texture descriptor: a mode plus an optional scale override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Texture {
    pub mode: TextureMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl Texture {
    /// Untextured surface.
    pub fn none() -> Self {
        Self {
            mode: TextureMode::None,
            scale: None,
        }
    }

    /// Checker texture with an explicit scale.
    pub fn checker(scale: f32) -> Self {
        Self {
            mode: TextureMode::Checker,
            scale: Some(scale),
        }
    }

    /// The effective scale for a surface of the given kind.
    ///
    /// Missing, non-positive and non-finite scales use the kind default.
    pub fn scale_for(&self, kind: ObjectKind) -> f32 {
        match self.scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            _ => kind.default_texture_scale(),
        }
    }
}

/// Named reflectivity presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaterialPreset {
    #[default]
    Matte,
    Metal,
    Reflective,
}

impl MaterialPreset {
    pub fn reflectivity(self) -> f32 {
        match self {
            MaterialPreset::Matte => 0.0,
            MaterialPreset::Metal => 0.4,
            MaterialPreset::Reflective => 0.8,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown material preset: {0}")]
pub struct ParsePresetError(pub String);

impl FromStr for MaterialPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matte" => Ok(MaterialPreset::Matte),
            "metal" => Ok(MaterialPreset::Metal),
            "reflective" => Ok(MaterialPreset::Reflective),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}

/// Everything needed to create a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDesc {
    pub kind: ObjectKind,
    pub position: Vec3,
    #[serde(default)]
    pub size: f32,
    #[serde(default)]
    pub rotation: Euler,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub reflectivity: f32,
    #[serde(default)]
    pub texture: Option<Texture>,
}

fn default_color() -> Color {
    Color::splat(255.0)
}

impl ObjectDesc {
    /// A white, matte, unrotated object.
    pub fn new(kind: ObjectKind, position: Vec3, size: f32) -> Self {
        Self {
            kind,
            position,
            size,
            rotation: Euler::ZERO,
            color: default_color(),
            reflectivity: 0.0,
            texture: None,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(ObjectKind::Sphere, center, radius)
    }

    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        Self::new(ObjectKind::Cube, center, half_extent)
    }

    /// A ground plane at height `y`.
    pub fn plane(y: f32) -> Self {
        Self::new(ObjectKind::Plane, Vec3::new(0.0, y, 0.0), 0.0)
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_preset(self, preset: MaterialPreset) -> Self {
        self.with_reflectivity(preset.reflectivity())
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// Per-axis rotation change; axes left as `None` keep their value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl From<Euler> for RotationUpdate {
    fn from(e: Euler) -> Self {
        Self {
            x: Some(e.x),
            y: Some(e.y),
            z: Some(e.z),
        }
    }
}

/// A partial update. Only fields that are `Some` are written.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<RotationUpdate>,
    pub color: Option<Color>,
    pub reflectivity: Option<f32>,
    pub size: Option<f32>,
    pub texture: Option<Texture>,
}

impl ObjectUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Replace all three rotation angles.
    pub fn rotation(mut self, rotation: Euler) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    /// Change only the given rotation axes.
    pub fn rotation_axes(mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) -> Self {
        self.rotation = Some(RotationUpdate { x, y, z });
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = Some(reflectivity);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A primitive in the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    id: ObjectId,
    kind: ObjectKind,
    position: Vec3,
    size: f32,
    rotation: Euler,
    color: Color,
    reflectivity: f32,
    texture: Texture,
}

impl SceneObject {
    pub(crate) fn from_desc(id: ObjectId, desc: ObjectDesc) -> Self {
        let mut object = Self {
            id,
            kind: desc.kind,
            position: desc.position,
            size: 0.0,
            rotation: desc.rotation,
            color: desc.color,
            reflectivity: 0.0,
            texture: desc.texture.unwrap_or_default(),
        };
        object.set_size(desc.size);
        object.set_reflectivity(desc.reflectivity);
        object
    }

    pub(crate) fn apply(&mut self, update: &ObjectUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(rotation) = update.rotation {
            self.rotation.x = rotation.x.unwrap_or(self.rotation.x);
            self.rotation.y = rotation.y.unwrap_or(self.rotation.y);
            self.rotation.z = rotation.z.unwrap_or(self.rotation.z);
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(reflectivity) = update.reflectivity {
            self.set_reflectivity(reflectivity);
        }
        if let Some(size) = update.size {
            self.set_size(size);
        }
        if let Some(texture) = update.texture {
            self.texture = texture;
        }
    }

    fn set_reflectivity(&mut self, reflectivity: f32) {
        // NaN maps to 0.0
        self.reflectivity = if reflectivity.is_nan() {
            0.0
        } else {
            reflectivity.clamp(0.0, 1.0)
        };
    }

    fn set_size(&mut self, size: f32) {
        self.size = if size.is_nan() { 0.0 } else { size.max(0.0) };
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn reflectivity(&self) -> f32 {
        self.reflectivity
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// Snapshot of this object as a creation descriptor.
    pub fn to_desc(&self) -> ObjectDesc {
        ObjectDesc {
            kind: self.kind,
            position: self.position,
            size: self.size,
            rotation: self.rotation,
            color: self.color,
            reflectivity: self.reflectivity,
            texture: Some(self.texture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desc_defaults() {
        let desc = ObjectDesc::sphere(Vec3::new(0.0, 1.0, 0.0), 2.0);
        assert_eq!(desc.kind, ObjectKind::Sphere);
        assert_eq!(desc.color, Color::splat(255.0));
        assert_eq!(desc.reflectivity, 0.0);
        assert_eq!(desc.rotation, Euler::ZERO);
        assert!(desc.texture.is_none());
    }

    #[test]
    fn test_reflectivity_clamped_on_create() {
        let high = SceneObject::from_desc(ObjectId(1), ObjectDesc::plane(0.0).with_reflectivity(3.5));
        assert_eq!(high.reflectivity(), 1.0);

        let low = SceneObject::from_desc(ObjectId(2), ObjectDesc::plane(0.0).with_reflectivity(-0.5));
        assert_eq!(low.reflectivity(), 0.0);
        assert!(!low.is_reflective());

        let nan = SceneObject::from_desc(ObjectId(3), ObjectDesc::plane(0.0).with_reflectivity(f32::NAN));
        assert_eq!(nan.reflectivity(), 0.0);
    }

    #[test]
    fn test_negative_size_clamped() {
        let object = SceneObject::from_desc(ObjectId(1), ObjectDesc::cube(Vec3::ZERO, -4.0));
        assert_eq!(object.size(), 0.0);
    }

    #[test]
    fn test_missing_texture_defaults_to_checker() {
        let object = SceneObject::from_desc(ObjectId(1), ObjectDesc::sphere(Vec3::ZERO, 1.0));
        assert_eq!(object.texture().mode, TextureMode::Checker);
        assert_eq!(object.texture().scale_for(object.kind()), 10.0);
    }

    #[test]
    fn test_texture_scale_override() {
        assert_eq!(Texture::checker(20.0).scale_for(ObjectKind::Plane), 20.0);
        // Non-positive scales fall back to the kind default
        assert_eq!(Texture::checker(0.0).scale_for(ObjectKind::Plane), 50.0);
        assert_eq!(Texture::checker(f32::INFINITY).scale_for(ObjectKind::Sphere), 10.0);
        assert_eq!(Texture::checker(f32::NAN).scale_for(ObjectKind::Cube), 4.0);
        assert_eq!(Texture::none().scale_for(ObjectKind::Cube), 4.0);
    }

    #[test]
    fn test_apply_merges_rotation_axes() {
        let mut object = SceneObject::from_desc(
            ObjectId(1),
            ObjectDesc::cube(Vec3::ZERO, 1.0).with_rotation(Euler::new(0.1, 0.2, 0.3)),
        );

        object.apply(&ObjectUpdate::new().rotation_axes(None, Some(1.5), None));
        assert_eq!(object.rotation(), Euler::new(0.1, 1.5, 0.3));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let desc = ObjectDesc::sphere(Vec3::new(1.0, 2.0, 3.0), 5.0)
            .with_color(Color::new(200.0, 10.0, 10.0))
            .with_reflectivity(0.25);
        let mut object = SceneObject::from_desc(ObjectId(7), desc.clone());

        object.apply(&ObjectUpdate::new().color(Color::new(0.0, 0.0, 255.0)));

        assert_eq!(object.color(), Color::new(0.0, 0.0, 255.0));
        assert_eq!(object.position(), desc.position);
        assert_eq!(object.size(), desc.size);
        assert_eq!(object.reflectivity(), desc.reflectivity);
        assert_eq!(object.id(), ObjectId(7));
    }

    #[test]
    fn test_material_presets() {
        assert_eq!("Metal".parse::<MaterialPreset>(), Ok(MaterialPreset::Metal));
        assert_eq!("reflective".parse::<MaterialPreset>(), Ok(MaterialPreset::Reflective));
        assert!("glass".parse::<MaterialPreset>().is_err());

        assert_eq!(MaterialPreset::Matte.reflectivity(), 0.0);
        assert_eq!(MaterialPreset::Metal.reflectivity(), 0.4);
        assert_eq!(MaterialPreset::Reflective.reflectivity(), 0.8);
    }

    #[test]
    fn test_desc_from_json_fills_defaults() {
        let desc: ObjectDesc =
            serde_json::from_str(r#"{ "kind": "cube", "position": [0.0, 50.0, 0.0], "size": 25.0 }"#)
                .unwrap();

        assert_eq!(desc.kind, ObjectKind::Cube);
        assert_eq!(desc.position, Vec3::new(0.0, 50.0, 0.0));
        assert_eq!(desc.color, Color::splat(255.0));
        assert_eq!(desc.rotation, Euler::ZERO);
        assert!(desc.texture.is_none());
    }
}
