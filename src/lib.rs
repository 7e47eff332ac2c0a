//! loctree - A loose octree for frustum culling of bounded objects
//!
//! ```
//! use loctree::{LooseOctree, Mat4, Vec3};
//! use loctree::debug::NoopDraw;
//!
//! let mut tree = LooseOctree::new(100.0, 1.2, 3);
//! let node = tree.add_sphere("crate", Vec3::splat(10.0), 1.0).unwrap();
//! assert_eq!(tree.node(node).depth(), 3);
//!
//! let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 300.0), Vec3::ZERO, Vec3::Y);
//! let proj = Mat4::orthographic_rh(-100.0, 100.0, -100.0, 100.0, 1.0, 1000.0);
//! let visible = tree.query(&view, &proj, &mut NoopDraw);
//! assert_eq!(visible.objects, vec![&"crate"]);
//! ```

pub mod core;
pub mod math;
pub mod config;
pub mod octree;

pub use crate::core::{Error, Mat4, Result, Vec3};
pub use config::OctreeConfig;
pub use math::{Aabb, Containment, Frustum};
pub use octree::{LooseOctree, NodeId, OctreeNode, Visibility};
pub use loctree_debug as debug;
