//! Axis-aligned bounding box

use crate::core::types::Vec3;
use super::containment::Containment;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Box enclosing a sphere
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_half_extent(center, Vec3::splat(radius))
    }

    /// Cube of side `length` around `center`
    pub fn cube(center: Vec3, length: f32) -> Self {
        Self::from_center_half_extent(center, Vec3::splat(length * 0.5))
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get half-extents
    pub fn half_extent(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Check if point is inside AABB (faces included)
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Check if two AABBs intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Classify `other` against this box.
    ///
    /// Touching faces count as inside, so a box is `Contains` of itself.
    pub fn contains_aabb(&self, other: &Aabb) -> Containment {
        if !self.intersects(other) {
            return Containment::Disjoint;
        }
        if self.min.cmple(other.min).all() && other.max.cmple(self.max).all() {
            Containment::Contains
        } else {
            Containment::Intersects
        }
    }

    pub fn to_arrays(&self) -> ([f32; 3], [f32; 3]) {
        (self.min.to_array(), self.max.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.center(), Vec3::splat(0.5));
        assert_eq!(aabb.size(), Vec3::ONE);
        assert_eq!(aabb.half_extent(), Vec3::splat(0.5));
    }

    #[test]
    fn test_from_sphere_and_cube() {
        let s = Aabb::from_sphere(Vec3::new(10.0, 10.0, 10.0), 1.0);
        assert_eq!(s.min, Vec3::splat(9.0));
        assert_eq!(s.max, Vec3::splat(11.0));

        let c = Aabb::cube(Vec3::ZERO, 4.0);
        assert_eq!(c.min, Vec3::splat(-2.0));
        assert_eq!(c.max, Vec3::splat(2.0));
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::splat(2.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_contains_aabb_classification() {
        let outer = Aabb::new(Vec3::splat(-2.0), Vec3::splat(2.0));

        let inner = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(outer.contains_aabb(&inner), Containment::Contains);

        let straddling = Aabb::new(Vec3::splat(1.0), Vec3::splat(3.0));
        assert_eq!(outer.contains_aabb(&straddling), Containment::Intersects);

        let far = Aabb::new(Vec3::splat(5.0), Vec3::splat(6.0));
        assert_eq!(outer.contains_aabb(&far), Containment::Disjoint);

        // Shared faces stay inside
        assert_eq!(outer.contains_aabb(&outer), Containment::Contains);

        // Enclosing box is only an intersection from the inside
        assert_eq!(inner.contains_aabb(&outer), Containment::Intersects);
    }
}
