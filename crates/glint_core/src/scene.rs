//! Scene container for Glint.
//!
//! The scene owns its objects exclusively and keeps them in creation
//! order. That order is observable: the renderer scans objects front to
//! back and the earlier object wins an exact distance tie.

use glint_math::Vec3;

use crate::object::{ObjectDesc, ObjectId, ObjectUpdate, SceneObject};

/// An ordered collection of scene objects.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (for logging)
    pub name: String,

    /// Objects in creation order
    objects: Vec<SceneObject>,

    /// Next id to hand out; ids start at 1 and only go up
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            name: String::new(),
            objects: Vec::new(),
            next_id: 1,
        }
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an object and return its id.
    pub fn create(&mut self, desc: ObjectDesc) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let object = SceneObject::from_desc(id, desc);
        log::debug!(
            "Scene '{}': created {:?} {} at {:?}",
            self.name,
            object.kind(),
            id,
            object.position()
        );
        self.objects.push(object);
        id
    }

    /// Add a white matte sphere.
    pub fn create_sphere(&mut self, center: Vec3, radius: f32) -> ObjectId {
        self.create(ObjectDesc::sphere(center, radius))
    }

    pub fn create_cube(&mut self, center: Vec3, half_extent: f32) -> ObjectId {
        self.create(ObjectDesc::cube(center, half_extent))
    }

    /// Add a ground plane at height `y`.
    pub fn create_plane(&mut self, y: f32) -> ObjectId {
        self.create(ObjectDesc::plane(y))
    }

    /// Apply a partial update to an object. Returns false if the id is unknown.
    pub fn update(&mut self, id: ObjectId, update: ObjectUpdate) -> bool {
        match self.objects.iter_mut().find(|o| o.id() == id) {
            Some(object) => {
                object.apply(&update);
                true
            }
            None => {
                log::debug!("Scene '{}': ignoring update for unknown object {}", self.name, id);
                false
            }
        }
    }

    /// Look up an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Remove an object, keeping the order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        log::debug!("Scene '{}': removed object {}", self.name, id);
        Some(self.objects.remove(index))
    }

    /// All objects in creation order.
    pub fn list(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Remove every object. Ids are not reset.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get object count.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a SceneObject;
    type IntoIter = std::slice::Iter<'a, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
