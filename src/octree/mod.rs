//! Loose octree spatial index.
//!
//! The full tree is built eagerly down to `max_depth` and never changes shape;
//! only the per-node object lists mutate. Every node is a cube whose side is
//! the tight subdivision size inflated by `looseness`, so objects near a cell
//! boundary still fit in a child and do not pile up in the parents.
//!
//! Nodes live in a flat arena (root at index 0) and are addressed by
//! [`NodeId`]. An object is stored at exactly one node: the deepest node along
//! its center's octant path whose loose bounds fully contain the object.

pub mod insert;
pub mod node;
pub mod octant;
pub mod query;

pub use node::{NodeId, OctreeNode};
pub use octant::{octant_index, CHILD_COUNT, OCTANT_OFFSETS};
pub use query::Visibility;

use crate::config::OctreeConfig;
use crate::core::types::{Result, Vec3};
use crate::math::Aabb;

/// Deepest tree accepted from a config (8^9 - 1) / 7 ≈ 19M nodes
pub const MAX_DEPTH: u8 = 8;

/// Loose octree holding objects of type `T`
#[derive(Clone, Debug)]
pub struct LooseOctree<T> {
    /// All nodes, depth-first; root is at index 0
    nodes: Vec<OctreeNode<T>>,
    /// Side length of the tight root cell
    world_size: f32,
    /// Bound inflation factor (>= 1)
    looseness: f32,
    /// Depth of the leaf level (root = 0)
    max_depth: u8,
}

impl<T> LooseOctree<T> {
    /// Build a tree centered at the origin.
    pub fn new(world_size: f32, looseness: f32, max_depth: u8) -> Self {
        Self::with_center(world_size, looseness, max_depth, Vec3::ZERO)
    }

    /// Build the complete tree around `center`.
    ///
    /// Inputs are not validated; use [`LooseOctree::from_config`] for that.
    /// Memory grows as 8^max_depth.
    pub fn with_center(world_size: f32, looseness: f32, max_depth: u8, center: Vec3) -> Self {
        let capacity = Self::total_node_count(max_depth.min(MAX_DEPTH));
        let mut tree = Self {
            nodes: Vec::with_capacity(capacity),
            world_size,
            looseness,
            max_depth,
        };

        let root = tree.push_node(0, center);
        tree.split(root);

        log::debug!(
            "Built loose octree: size {} looseness {} depth {} ({} nodes)",
            world_size, looseness, max_depth, tree.nodes.len()
        );
        tree
    }

    /// Validate `config` and build the tree it describes.
    pub fn from_config(config: &OctreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_center(
            config.world_size,
            config.looseness,
            config.max_depth,
            Vec3::from_array(config.center),
        ))
    }

    /// Total number of nodes for a given depth: (8^(d+1) - 1) / 7
    pub fn total_node_count(max_depth: u8) -> usize {
        let mut count = 0usize;
        let mut level_count = 1usize;
        for _ in 0..=max_depth {
            count = count.saturating_add(level_count);
            level_count = level_count.saturating_mul(8);
        }
        count
    }

    fn push_node(&mut self, depth: u8, center: Vec3) -> NodeId {
        let length = self.looseness * self.world_size / 2f32.powi(depth as i32);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(OctreeNode::new(depth, center, length));
        id
    }

    /// Subdivide `id` and its descendants down to `max_depth`.
    fn split(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        if node.depth() >= self.max_depth {
            return;
        }

        let depth = node.depth() + 1;
        let center = node.center();
        // Offsets use the tight size so children tile the parent without gaps
        let quarter = node.length() / self.looseness / 4.0;

        let first = NodeId(self.nodes.len() as u32);
        for offset in OCTANT_OFFSETS {
            self.push_node(depth, center + offset * quarter);
        }
        self.nodes[id.index()].set_first_child(first);

        for octant in 0..CHILD_COUNT {
            self.split(first.offset(octant));
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get node by handle
    ///
    /// # Panics
    /// Panics if `id` is not a node of this tree. Use [`get`](Self::get)
    /// for handles of unknown origin.
    pub fn node(&self, id: NodeId) -> &OctreeNode<T> {
        &self.nodes[id.index()]
    }

    /// Get node by handle, if it belongs to this tree's arena
    pub fn get(&self, id: NodeId) -> Option<&OctreeNode<T>> {
        self.nodes.get(id.index())
    }

    /// Handle for an arena index, if in range
    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then(|| NodeId(index as u32))
    }

    /// Child handles in octant order, if subdivided
    pub fn children(&self, id: NodeId) -> Option<[NodeId; CHILD_COUNT]> {
        self.node(id).children()
    }

    /// All nodes in arena order
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &OctreeNode<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Objects stored across all nodes
    pub fn object_count(&self) -> usize {
        self.nodes.iter().map(|n| n.objects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.is_empty())
    }

    pub fn world_size(&self) -> f32 {
        self.world_size
    }

    pub fn looseness(&self) -> f32 {
        self.looseness
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Loose bounds of the root; anything inserted must fit inside.
    pub fn bounds(&self) -> &Aabb {
        self.node(NodeId::ROOT).bounds()
    }

    /// Un-inflated cell of a node
    pub fn tight_bounds(&self, id: NodeId) -> Aabb {
        let node = self.node(id);
        Aabb::cube(node.center(), node.length() / self.looseness)
    }

    /// Drop every object, keeping the node topology.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.objects.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Containment;

    const EPS: f32 = 1e-3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn test_depth_zero_single_node() {
        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 0);
        assert_eq!(tree.node_count(), 1);
        assert!(!tree.node(tree.root()).has_children());
        assert!(tree.children(tree.root()).is_none());
    }

    #[test]
    fn test_node_counts() {
        assert_eq!(LooseOctree::<u32>::total_node_count(0), 1);
        assert_eq!(LooseOctree::<u32>::total_node_count(1), 9);
        assert_eq!(LooseOctree::<u32>::total_node_count(3), 585);

        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 3);
        assert_eq!(tree.node_count(), 585);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_root_geometry() {
        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 2);
        let root = tree.node(tree.root());
        assert_eq!(root.depth(), 0);
        assert!(approx(root.length(), 120.0));
        assert!(approx_vec(root.bounds().min, Vec3::splat(-60.0)));
        assert!(approx_vec(root.bounds().max, Vec3::splat(60.0)));
        assert!(approx_vec(tree.tight_bounds(tree.root()).max, Vec3::splat(50.0)));
    }

    #[test]
    fn test_offset_center() {
        let center = Vec3::new(10.0, -20.0, 5.0);
        let tree: LooseOctree<u32> = LooseOctree::with_center(64.0, 1.0, 1, center);
        assert_eq!(tree.node(tree.root()).center(), center);
        let children = tree.children(tree.root()).unwrap();
        assert_eq!(tree.node(children[0]).center(), center + Vec3::new(-16.0, 16.0, -16.0));
        assert_eq!(tree.node(children[7]).center(), center + Vec3::new(16.0, -16.0, 16.0));
    }

    #[test]
    fn test_every_node_fully_subdivided_or_leaf() {
        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.5, 3);
        for (id, node) in tree.iter_nodes() {
            match node.children() {
                Some(children) => {
                    assert!(node.depth() < tree.max_depth(), "node {}", id);
                    for child in children {
                        assert_eq!(tree.node(child).depth(), node.depth() + 1);
                    }
                }
                None => assert_eq!(node.depth(), tree.max_depth(), "node {}", id),
            }
        }
    }

    #[test]
    fn test_length_halves_per_level() {
        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 4);
        for (_, node) in tree.iter_nodes() {
            let expected = 1.2 * 100.0 / 2f32.powi(node.depth() as i32);
            assert!(approx(node.length(), expected));
        }
    }

    #[test]
    fn test_children_tile_parent_tight_cell() {
        let tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 3);
        for (id, node) in tree.iter_nodes() {
            let Some(children) = node.children() else { continue };
            let parent = tree.tight_bounds(id);
            let cells: Vec<Aabb> = children.iter().map(|c| tree.tight_bounds(*c)).collect();

            // Volumes add up and every cell is inside the parent
            let parent_volume = parent.size().x * parent.size().y * parent.size().z;
            let total: f32 = cells.iter().map(|c| c.size().x * c.size().y * c.size().z).sum();
            assert!((total - parent_volume).abs() / parent_volume < 1e-4);

            for cell in &cells {
                assert!(approx_vec(cell.size(), parent.size() * 0.5));
                assert!(parent.min.x - EPS <= cell.min.x && cell.max.x <= parent.max.x + EPS);
                assert!(parent.min.y - EPS <= cell.min.y && cell.max.y <= parent.max.y + EPS);
                assert!(parent.min.z - EPS <= cell.min.z && cell.max.z <= parent.max.z + EPS);
            }

            // No two cells overlap beyond a shared face
            for a in 0..CHILD_COUNT {
                for b in (a + 1)..CHILD_COUNT {
                    let overlap = cells[a].max.min(cells[b].max) - cells[a].min.max(cells[b].min);
                    assert!(overlap.min_element() < EPS, "cells {} and {} overlap", a, b);
                }
            }
        }
    }

    #[test]
    fn test_ancestor_bounds_contain_descendants() {
        let tree: LooseOctree<u32> = LooseOctree::new(64.0, 1.5, 3);
        for (id, node) in tree.iter_nodes() {
            let Some(children) = node.children() else { continue };
            for child in children {
                let inner = tree.node(child).bounds();
                assert_eq!(
                    node.bounds().contains_aabb(inner),
                    Containment::Contains,
                    "child {} escapes parent {}",
                    child,
                    id
                );
            }
        }
    }

    #[test]
    fn test_from_config() {
        let config = OctreeConfig {
            world_size: 32.0,
            looseness: 2.0,
            max_depth: 2,
            center: [1.0, 2.0, 3.0],
        };
        let tree: LooseOctree<u32> = LooseOctree::from_config(&config).unwrap();
        assert_eq!(tree.node_count(), 73);
        assert_eq!(tree.node(tree.root()).center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(tree.node(tree.root()).length(), 64.0);

        let bad = OctreeConfig { looseness: 0.5, ..config };
        assert!(LooseOctree::<u32>::from_config(&bad).is_err());
    }

    #[test]
    fn test_clear_keeps_topology() {
        let mut tree: LooseOctree<u32> = LooseOctree::new(100.0, 1.2, 2);
        tree.add_sphere(1, Vec3::splat(10.0), 1.0).unwrap();
        tree.add_sphere(2, Vec3::ZERO, 30.0).unwrap();
        assert_eq!(tree.object_count(), 2);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 73);
    }

    #[test]
    fn test_node_id_lookup() {
        let tree: LooseOctree<u32> = LooseOctree::new(10.0, 1.0, 1);
        assert_eq!(tree.node_id(0), Some(NodeId::ROOT));
        assert!(tree.node_id(8).is_some());
        assert!(tree.node_id(9).is_none());
    }
}
