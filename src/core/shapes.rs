// Geometric primitives used for bounding volumes

use glam::{Affine3A, Vec3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

impl Aabb {
    /// Create a box from two corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Aabb {
        let pad = Vec3::splat(margin);
        Aabb {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Bounds of this box after an affine transform (all 8 corners are mapped)
    pub fn transformed(&self, transform: &Affine3A) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = transform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }

    /// Check if two boxes overlap (touching counts)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// Capsule between two segment endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub p0: Vec3,
    pub p1: Vec3,
    pub radius: f32,
}

impl Capsule {
    /// Upright capsule standing on `base` with total `height` (caps included)
    pub fn upright(base: Vec3, radius: f32, height: f32) -> Self {
        let radius = radius.max(0.0);
        let height = height.max(2.0 * radius);
        Self {
            p0: base + Vec3::Y * radius,
            p1: base + Vec3::Y * (height - radius),
            radius,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.p0, self.p1).expanded(self.radius)
    }
}
