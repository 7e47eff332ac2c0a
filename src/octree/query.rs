//! Frustum-culling traversal

use loctree_debug::{Color, DebugDraw};

use crate::core::types::Mat4;
use crate::math::{Containment, Frustum};
use super::node::NodeId;
use super::octant::CHILD_COUNT;
use super::LooseOctree;

/// Result of a visibility query
#[derive(Debug)]
pub struct Visibility<'a, T> {
    /// Objects of every non-culled node, depth-first in octant order
    pub objects: Vec<&'a T>,
    /// Nodes that contributed at least one object
    pub visited_nodes: usize,
    /// Nodes whose classification was evaluated or inherited
    pub tested_nodes: usize,
}

impl<'a, T> Visibility<'a, T> {
    fn new() -> Self {
        Self {
            objects: Vec::new(),
            visited_nodes: 0,
            tested_nodes: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T> LooseOctree<T> {
    /// Collect objects in nodes overlapping the camera's view volume.
    ///
    /// `view` and `projection` are combined as `projection * view`. Every
    /// node that contributes objects is also drawn into `sink`.
    pub fn query<D: DebugDraw + ?Sized>(
        &self,
        view: &Mat4,
        projection: &Mat4,
        sink: &mut D,
    ) -> Visibility<'_, T> {
        let frustum = Frustum::from_view_and_projection(view, projection);
        self.query_frustum(&frustum, sink)
    }

    /// Same traversal as [`query`](Self::query) for a prebuilt frustum.
    pub fn query_frustum<D: DebugDraw + ?Sized>(
        &self,
        frustum: &Frustum,
        sink: &mut D,
    ) -> Visibility<'_, T> {
        let mut visibility = Visibility::new();
        // Anything but Contains forces the root to be classified
        self.collect_visible(NodeId::ROOT, frustum, Containment::Intersects, sink, &mut visibility);

        log::trace!(
            "Frustum query: {} objects from {} nodes ({} tested)",
            visibility.objects.len(), visibility.visited_nodes, visibility.tested_nodes
        );
        visibility
    }

    fn collect_visible<'a, D: DebugDraw + ?Sized>(
        &'a self,
        id: NodeId,
        frustum: &Frustum,
        inherited: Containment,
        sink: &mut D,
        out: &mut Visibility<'a, T>,
    ) {
        let node = &self.nodes[id.index()];
        out.tested_nodes += 1;

        // A fully visible ancestor means every descendant is fully visible
        let containment = match inherited {
            Containment::Contains => Containment::Contains,
            _ => frustum.contains_aabb(node.bounds()),
        };
        if containment == Containment::Disjoint {
            return;
        }

        if !node.objects.is_empty() {
            let (min, max) = node.bounds().to_arrays();
            sink.draw_box(min, max, Color::WHITE);
            out.objects.extend(node.objects.iter());
            out.visited_nodes += 1;
        }

        if let Some(first) = node.first_child() {
            for octant in 0..CHILD_COUNT {
                self.collect_visible(first.offset(octant), frustum, containment, sink, out);
            }
        }
    }
}
