//! Ray/primitive intersection and the nearest-hit scene query.

use glint_core::{ObjectId, ObjectKind, Scene, SceneObject};
use glint_math::{Euler, Interval, Ray, Vec3};

use crate::shading::surface_normal;

/// Direction components smaller than this count as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs (always > 0)
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// The object that was hit
    pub object: &'a SceneObject,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Smallest positive ray parameter at which the ray hits, if any.
    fn hit(&self, ray: &Ray) -> Option<f32>;

    /// World-space unit normal at a point on the surface.
    fn normal_at(&self, p: Vec3) -> Vec3;
}

impl Hittable for SceneObject {
    fn hit(&self, ray: &Ray) -> Option<f32> {
        let t = match self.kind() {
            ObjectKind::Sphere => intersect_sphere(self.position(), self.size(), ray),
            ObjectKind::Cube => intersect_cube(self.position(), self.size(), self.rotation(), ray),
            ObjectKind::Plane => intersect_plane(self.position().y, ray),
        }?;
        t.is_finite().then_some(t)
    }

    fn normal_at(&self, p: Vec3) -> Vec3 {
        surface_normal(self, p)
    }
}

/// Transform a world-space point into an object's unrotated, centered frame.
pub fn to_local(object: &SceneObject, p: Vec3) -> Vec3 {
    object.rotation().inverse_rotate(p - object.position())
}

/// Ray/sphere intersection.
///
/// Takes the near root, or the far root when the origin is inside.
pub fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray) -> Option<f32> {
    let oc = ray.origin() - center;
    let a = ray.direction().dot(ray.direction());
    let b = 2.0 * oc.dot(ray.direction());
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    let far = (-b + sqrtd) / (2.0 * a);
    let (near, far) = if near > far { (far, near) } else { (near, far) };

    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Ray/cube intersection using the slab method in the cube's local frame.
pub fn intersect_cube(center: Vec3, half_extent: f32, rotation: Euler, ray: &Ray) -> Option<f32> {
    let origin = rotation.inverse_rotate(ray.origin() - center);
    let direction = rotation.inverse_rotate(ray.direction());

    let mut span = Interval::UNIVERSE;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: must already be between its faces
            if o < -half_extent || o > half_extent {
                return None;
            }
            continue;
        }

        let t1 = (-half_extent - o) / d;
        let t2 = (half_extent - o) / d;
        span = span.intersect(t1.min(t2), t1.max(t2));
        if span.is_empty() || span.max < 0.0 {
            return None;
        }
    }

    if span.min > 0.0 {
        Some(span.min)
    } else if span.max > 0.0 {
        Some(span.max)
    } else {
        None
    }
}

/// Ray/plane intersection for the horizontal plane at `height`.
pub fn intersect_plane(height: f32, ray: &Ray) -> Option<f32> {
    let dy = ray.direction().y;
    if dy.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (height - ray.origin().y) / dy;
    (t > 0.0).then_some(t)
}

/// Find the closest object hit by the ray.
///
/// Objects are scanned in creation order with a strict less-than, so the
/// earlier object wins an exact tie. `ignore` skips one object, used to
/// keep a bounced ray from hitting the surface it left.
pub fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray, ignore: Option<ObjectId>) -> Option<HitRecord<'a>> {
    let mut closest: Option<(f32, &'a SceneObject)> = None;
    let mut closest_so_far = f32::INFINITY;

    for object in scene {
        if Some(object.id()) == ignore {
            continue;
        }
        if let Some(t) = object.hit(ray) {
            if t < closest_so_far {
                closest_so_far = t;
                closest = Some((t, object));
            }
        }
    }

    closest.map(|(t, object)| HitRecord {
        t,
        p: ray.at(t),
        object,
    })
}

/// True if any object is hit closer than `max_distance`.
pub fn any_hit(scene: &Scene, ray: &Ray, max_distance: f32) -> bool {
    scene
        .iter()
        .any(|object| object.hit(ray).is_some_and(|t| t < max_distance))
}
