//! View-dependent level-of-detail selection over cluster trees.
//!
//! Walks a tree top-down and keeps the coarsest nodes that are atomic at the
//! current zoom: a node is taken when it is visible and either a leaf or
//! short enough on screen that it would not visibly split. A node that is not
//! taken is descended into; its children are tested on their own merits.

use super::Hierarchy;
use super::tree::{ClusterNode, ClusterTree, NodeId};
use crate::spatial::screen_distance;
use crate::view::ViewTransform;

/// Nodes selected for one label at the current view.
#[derive(Debug, Clone)]
pub struct SelectedClusters<'a> {
    pub label: &'a str,
    pub tree: &'a ClusterTree,
    /// Selected node ids in left-to-right tree order
    pub nodes: Vec<NodeId>,
}

impl SelectedClusters<'_> {
    /// Summed weight of a selected node's members.
    pub fn weight(&self, id: NodeId) -> f64 {
        self.tree.weight(id)
    }
}

/// True when at least one corner of the node's box projects inside the viewport.
pub fn is_visible<V: ViewTransform + ?Sized>(node: &ClusterNode, view: &V) -> bool {
    let viewport = view.viewport();
    node.bbox
        .corners()
        .into_iter()
        .any(|corner| viewport.contains(view.project(corner)))
}

/// On-screen length of the node's edge in pixels.
pub fn projected_edge_length<V: ViewTransform + ?Sized>(node: &ClusterNode, view: &V) -> f64 {
    screen_distance(view.project(node.edge.0), view.project(node.edge.1))
}

/// Selection predicate for a single node.
///
/// Leaves are selected exactly when visible. Internal nodes additionally
/// need a projected edge shorter than `max_dist`; an invisible internal node
/// is never selected, whatever its edge length.
pub fn is_atomic<V: ViewTransform + ?Sized>(node: &ClusterNode, view: &V, max_dist: f64) -> bool {
    let visible = is_visible(node, view);
    if node.is_leaf() || !visible {
        return visible;
    }
    projected_edge_length(node, view) < max_dist
}

/// Select the atomic nodes of one tree.
pub fn select_nodes<V: ViewTransform + ?Sized>(
    tree: &ClusterTree,
    view: &V,
    max_dist: f64,
) -> Vec<NodeId> {
    let mut selected = Vec::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        if is_atomic(node, view, max_dist) {
            selected.push(id);
        } else if let Some((left, right)) = node.children() {
            stack.push(right);
            stack.push(left);
        }
    }

    selected
}

/// Select atomic nodes for every label, in the hierarchy's label order.
pub fn extract_clusters<'a, V: ViewTransform + ?Sized>(
    hierarchy: &'a Hierarchy,
    view: &V,
    max_dist: f64,
) -> Vec<SelectedClusters<'a>> {
    hierarchy
        .iter()
        .map(|(label, tree)| SelectedClusters {
            label,
            tree,
            nodes: select_nodes(tree, view, max_dist),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::cluster::{ClusterStrategy, SingleLinkage};
    use crate::spatial::DistanceMetric;
    use crate::view::{LinearTransform, Viewport};
    use geo::Point;
    use tagmap_types::point::WeightedPoint;

    fn tree_of(points: &[(f64, f64)]) -> ClusterTree {
        let points = points
            .iter()
            .map(|&(x, y)| WeightedPoint::new(Point::new(x, y), 1.0))
            .collect();
        SingleLinkage::new(DistanceMetric::Euclidean)
            .build(points)
            .unwrap()
    }

    fn view(scale: f64) -> LinearTransform {
        LinearTransform::centered(Point::new(0.0, 0.0), scale, Viewport::new(400.0, 400.0))
    }

    #[test]
    fn test_zoomed_out_selects_root() {
        let tree = tree_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        // edge 2 units * 5 px = 10 px < 20
        let selected = select_nodes(&tree, &view(5.0), 20.0);
        assert_eq!(selected, vec![tree.root()]);
    }

    #[test]
    fn test_zoomed_in_selects_leaves() {
        let tree = tree_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        // every internal edge is at least 1 unit * 50 px
        let selected = select_nodes(&tree, &view(50.0), 20.0);
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|&id| tree.node(id).is_leaf()));
    }

    #[test]
    fn test_boundary_is_strict() {
        let tree = tree_of(&[(0.0, 0.0), (2.0, 0.0)]);
        // edge exactly 20 px: not below the threshold, so the cluster splits
        let selected = select_nodes(&tree, &view(10.0), 20.0);
        assert_eq!(selected.len(), 2);

        let selected = select_nodes(&tree, &view(10.0), 20.000_001);
        assert_eq!(selected, vec![tree.root()]);
    }

    #[test]
    fn test_invisible_leaf_dropped() {
        let tree = tree_of(&[(0.0, 0.0), (1000.0, 0.0)]);
        let selected = select_nodes(&tree, &view(1.0), 20.0);
        assert_eq!(selected.len(), 1);
        assert_eq!(tree.members(selected[0])[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_invisible_internal_node_is_not_selected_but_descended() {
        // The root's box is wider than the viewport, so none of its corners
        // land on screen even though its middle point sits at the center.
        let tree = tree_of(&[(-1000.0, 0.0), (0.0, 0.0), (1000.0, 0.0)]);
        let view = view(1.0);
        assert!(!is_visible(tree.node(tree.root()), &view));

        // A huge threshold would merge everything, but the invisible root is
        // skipped and the visible sub-cluster is taken instead.
        let selected = select_nodes(&tree, &view, 1.0e9);
        assert_eq!(selected.len(), 1);
        assert_ne!(selected[0], tree.root());
        assert_eq!(tree.node(selected[0]).size(), 2);

        let selected = select_nodes(&tree, &view, 20.0);
        assert_eq!(selected.len(), 1);
        assert!(tree.node(selected[0]).is_leaf());
        assert_eq!(tree.members(selected[0])[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_extract_preserves_label_order() {
        let groups = vec![
            ("b".to_string(), vec![WeightedPoint::new(Point::new(0.0, 0.0), 1.0)]),
            ("a".to_string(), vec![WeightedPoint::new(Point::new(1.0, 1.0), 2.0)]),
        ];
        let hierarchy =
            Hierarchy::build(groups, &SingleLinkage::new(DistanceMetric::Euclidean)).unwrap();
        let selected = extract_clusters(&hierarchy, &view(10.0), 20.0);
        let labels: Vec<&str> = selected.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(selected[1].weight(selected[1].nodes[0]), 2.0);
    }
}
