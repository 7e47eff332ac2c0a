//! View frustum for culling

use crate::core::types::{Vec3, Vec4, Mat4};
use super::aabb::Aabb;
use super::containment::Containment;

/// A plane defined by normal and distance from origin
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from point to plane (positive = in front)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Box corner furthest along the normal
    fn positive_vertex(&self, aabb: &Aabb) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if self.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if self.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }

    /// Box corner furthest against the normal
    fn negative_vertex(&self, aabb: &Aabb) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
            if self.normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
            if self.normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
        )
    }
}

/// View frustum with 6 inward-facing planes (Near, Far, Left, Right, Top, Bottom)
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix (`projection * view`).
    /// Uses the Gribb/Hartmann method.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();
        let row = |r: usize| Vec4::new(m[0][r], m[1][r], m[2][r], m[3][r]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        // glam projections map depth to [0, 1], so near is row2 alone
        let near = Self::normalize_plane(r2);
        let far = Self::normalize_plane(r3 - r2);
        let left = Self::normalize_plane(r3 + r0);
        let right = Self::normalize_plane(r3 - r0);
        let top = Self::normalize_plane(r3 - r1);
        let bottom = Self::normalize_plane(r3 + r1);

        Self {
            planes: [near, far, left, right, top, bottom],
        }
    }

    /// Frustum for a separate view and projection pair.
    pub fn from_view_and_projection(view: &Mat4, projection: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    fn normalize_plane(plane: Vec4) -> Plane {
        let normal = plane.truncate();
        let len = normal.length();
        if len > 0.0 {
            Plane::new(normal / len, plane.w / len)
        } else {
            Plane::new(normal, plane.w)
        }
    }

    /// Check if point is inside frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Check if AABB intersects frustum (conservative test)
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        !self.contains_aabb(aabb).is_disjoint()
    }

    /// Classify an AABB against the frustum.
    ///
    /// Conservative: a box near a frustum corner may report `Intersects`
    /// while lying outside, never the reverse.
    pub fn contains_aabb(&self, aabb: &Aabb) -> Containment {
        let mut result = Containment::Contains;
        for plane in &self.planes {
            if plane.distance_to_point(plane.positive_vertex(aabb)) < 0.0 {
                return Containment::Disjoint;
            }
            if plane.distance_to_point(plane.negative_vertex(aabb)) < 0.0 {
                result = Containment::Intersects;
            }
        }
        result
    }
}
