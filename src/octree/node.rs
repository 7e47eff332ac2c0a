//! Octree node storage

use std::fmt;

use crate::core::types::Vec3;
use crate::math::Aabb;
use super::octant::CHILD_COUNT;

/// Handle to a node in a [`LooseOctree`](super::LooseOctree) arena.
///
/// Returned by insertion so the caller can later remove or revalidate the
/// object without searching the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root of every tree
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Sibling `octant` of a child block starting at `self`
    pub(crate) fn offset(self, octant: usize) -> NodeId {
        NodeId(self.0 + octant as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single node of the loose octree.
///
/// Children of a subdivided node occupy 8 contiguous arena slots starting at
/// `first_child`, in octant order.
#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
    depth: u8,
    center: Vec3,
    /// Loose side length
    length: f32,
    bounds: Aabb,
    first_child: Option<NodeId>,
    pub(crate) objects: Vec<T>,
}

impl<T> OctreeNode<T> {
    pub(crate) fn new(depth: u8, center: Vec3, length: f32) -> Self {
        Self {
            depth,
            center,
            length,
            bounds: Aabb::cube(center, length),
            first_child: None,
            objects: Vec::new(),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Loose side length (tight size times looseness)
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Loose bounds used for every containment test
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Child handles in octant order, if subdivided
    pub fn children(&self) -> Option<[NodeId; CHILD_COUNT]> {
        self.first_child
            .map(|first| std::array::from_fn(|octant| first.offset(octant)))
    }

    pub(crate) fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub(crate) fn set_first_child(&mut self, first: NodeId) {
        self.first_child = Some(first);
    }

    /// Objects stored directly at this node
    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
