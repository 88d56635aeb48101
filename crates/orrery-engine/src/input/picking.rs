//! Ray/sphere picking over the rendered bodies and moons.

use glam::Vec3;

use crate::input::selection::Selection;

/// World-space pick ray. `dir` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// A zero direction falls back to -Z.
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// Distance along the ray to the nearest sphere hit in front of the origin.
    /// An origin inside the sphere hits the far side.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let near = -b - sq;
        if near > 0.0 {
            return Some(near);
        }
        let far = -b + sq;
        (far > 0.0).then_some(far)
    }
}

/// A pickable sphere and what picking it selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickSphere {
    pub target: Selection,
    pub center: Vec3,
    pub radius: f32,
}

/// The nearest target hit by the ray, if any.
pub fn pick_nearest<'a>(
    ray: &Ray,
    spheres: impl IntoIterator<Item = &'a PickSphere>,
) -> Option<Selection> {
    spheres
        .into_iter()
        .filter_map(|s| ray.intersect_sphere(s.center, s.radius).map(|t| (t, s.target)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, target)| target)
}
