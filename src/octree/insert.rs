//! Object placement, removal and revalidation

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::math::Aabb;
use super::node::NodeId;
use super::octant::octant_index;
use super::LooseOctree;

impl<T> LooseOctree<T> {
    /// Insert `object` with world-space `bounds`.
    ///
    /// Returns the node now holding the object, or [`Error::OutOfBounds`] if
    /// the bounds are not fully inside the root (nothing is inserted).
    pub fn add(&mut self, object: T, bounds: Aabb) -> Result<NodeId> {
        self.add_at(NodeId::ROOT, object, bounds)
    }

    /// Insert an object described by a bounding sphere.
    pub fn add_sphere(&mut self, object: T, center: Vec3, radius: f32) -> Result<NodeId> {
        self.add(object, Aabb::from_sphere(center, radius))
    }

    /// Insert starting the descent at `start` instead of the root.
    ///
    /// The bounds must be fully contained by `start`.
    ///
    /// # Panics
    /// Panics if `start` is not a node of this tree.
    pub fn add_at(&mut self, start: NodeId, object: T, bounds: Aabb) -> Result<NodeId> {
        if !self.fits_in_node(start, &bounds) {
            log::debug!(
                "Object bounds {} .. {} do not fit in node {}",
                bounds.min, bounds.max, start
            );
            return Err(Error::OutOfBounds { min: bounds.min, max: bounds.max });
        }

        let target = self.find_target_node(start, &bounds);
        self.nodes[target.index()].objects.push(object);
        log::trace!("Placed object in node {} (depth {})", target, self.node(target).depth());
        Ok(target)
    }

    /// Node an object with `bounds` would be stored at, descending from `start`.
    ///
    /// Follows the octant of the bounds' center and stops at the first child
    /// that does not fully contain the bounds, or at a leaf.
    pub fn find_target_node(&self, start: NodeId, bounds: &Aabb) -> NodeId {
        let center = bounds.center();
        let mut current = start;

        while let Some(first) = self.nodes[current.index()].first_child() {
            let octant = octant_index(self.nodes[current.index()].center(), center);
            let child = first.offset(octant);
            if !self.fits_in_node(child, bounds) {
                break;
            }
            current = child;
        }
        current
    }

    /// Whether `node`'s loose bounds fully contain `bounds`, regardless of
    /// whether the node is subdivided.
    ///
    /// # Panics
    /// Panics if `node` is not a node of this tree; so do
    /// [`still_inside`](Self::still_inside) and
    /// [`find_target_node`](Self::find_target_node).
    pub fn fits_in_node(&self, node: NodeId, bounds: &Aabb) -> bool {
        self.node(node).bounds().contains_aabb(bounds).is_contained()
    }

    /// Whether updated `bounds` still belong to leaf `node`.
    ///
    /// Always false for subdivided nodes; objects held by inner nodes are not
    /// revalidated this way.
    pub fn still_inside(&self, node: NodeId, bounds: &Aabb) -> bool {
        if self.node(node).has_children() {
            return false;
        }
        self.fits_in_node(node, bounds)
    }

    /// [`still_inside`](Self::still_inside) for a bounding sphere.
    pub fn still_inside_sphere(&self, node: NodeId, center: Vec3, radius: f32) -> bool {
        self.still_inside(node, &Aabb::from_sphere(center, radius))
    }
}

impl<T: PartialEq> LooseOctree<T> {
    /// Remove the first object equal to `object` stored at `node`.
    ///
    /// Returns false, and changes nothing, if it is not there or if `node`
    /// does not belong to this tree.
    pub fn remove(&mut self, node: NodeId, object: &T) -> bool {
        let Some(target) = self.nodes.get_mut(node.index()) else {
            return false;
        };
        let objects = &mut target.objects;
        match objects.iter().position(|o| o == object) {
            Some(pos) => {
                objects.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether `object` is stored at `node`
    pub fn contains_object(&self, node: NodeId, object: &T) -> bool {
        self.get(node).is_some_and(|n| n.objects().contains(object))
    }

    /// Move an object stored at `node` after its bounds changed.
    ///
    /// A leaf that still contains the new bounds keeps the object. Otherwise
    /// the object is re-inserted from the root. If the new bounds leave the
    /// root, the object stays at `node` and [`Error::OutOfBounds`] is
    /// returned so the caller can decide whether to remove it. A `node` that
    /// does not belong to this tree reports [`Error::ObjectNotFound`].
    pub fn relocate(&mut self, node: NodeId, object: &T, new_bounds: Aabb) -> Result<NodeId> {
        let pos = self
            .get(node)
            .and_then(|n| n.objects().iter().position(|o| o == object))
            .ok_or(Error::ObjectNotFound(node.0))?;

        if self.still_inside(node, &new_bounds) {
            return Ok(node);
        }
        if !self.fits_in_node(NodeId::ROOT, &new_bounds) {
            return Err(Error::OutOfBounds { min: new_bounds.min, max: new_bounds.max });
        }

        let target = self.find_target_node(NodeId::ROOT, &new_bounds);
        if target != node {
            let moved = self.nodes[node.index()].objects.remove(pos);
            self.nodes[target.index()].objects.push(moved);
            log::trace!("Relocated object from node {} to {}", node, target);
        }
        Ok(target)
    }
}
