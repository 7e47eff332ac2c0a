//! Geometry primitives for spatial queries

pub mod aabb;
pub mod containment;
pub mod frustum;

pub use aabb::Aabb;
pub use containment::Containment;
pub use frustum::{Plane, Frustum};
