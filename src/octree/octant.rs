//! Fixed octant ordering shared by subdivision and insertion.
//!
//! Index bits: bit 0 = +x, bit 1 = +z, bit 2 = -y. Ties on an axis go to the
//! octant with lower x, upper y and lower z.

use crate::core::types::Vec3;

/// Number of children of a subdivided node
pub const CHILD_COUNT: usize = 8;

/// Unit sign offsets of each child center, indexed by octant
pub const OCTANT_OFFSETS: [Vec3; CHILD_COUNT] = [
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
];

/// Octant of `point` relative to a node centered at `center`.
pub fn octant_index(center: Vec3, point: Vec3) -> usize {
    (if point.x <= center.x { 0 } else { 1 })
        + (if point.y >= center.y { 0 } else { 4 })
        + (if point.z <= center.z { 0 } else { 2 })
}
