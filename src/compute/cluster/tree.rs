//! Binary cluster tree stored as an arena.
//!
//! Node ids follow the usual dendrogram numbering: leaves are `0..n` (one per
//! input point), and the `i`-th merge creates node `n + i`. The root is the
//! last node. Points are reordered at build time so that the members of every
//! node form one contiguous slice of the point buffer.

use crate::error::{Result, TagMapError};
use crate::spatial::{DistanceMetric, farthest_pair};
use geo::Point;
use std::ops::Range;
use tagmap_types::bbox::BoundingBox2D;
use tagmap_types::point::WeightedPoint;

/// Index of a node inside its [`ClusterTree`].
pub type NodeId = usize;

/// One node of a cluster tree. Read-only once the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterNode {
    /// Geographic box enclosing every descendant position
    pub bbox: BoundingBox2D,
    /// Two member positions approximating the node's diameter
    pub edge: (Point, Point),
    children: Option<(NodeId, NodeId)>,
    members: Range<usize>,
}

impl ClusterNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// `(left, right)` for internal nodes.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// Number of points under this node.
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Per-label hierarchy of points grouped by proximity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    points: Vec<WeightedPoint>,
    nodes: Vec<ClusterNode>,
}

impl ClusterTree {
    /// Assemble a tree from a merge sequence.
    ///
    /// `merges[i] = (a, b)` joins nodes `a` and `b` into node `points.len() + i`.
    /// A valid sequence has exactly `n - 1` merges and uses every node except
    /// the last exactly once. Edges of merged nodes are the farthest pair among
    /// the children's edge endpoints under `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`TagMapError::InvalidInput`] for an empty point set or a merge
    /// sequence that does not describe a single binary tree.
    pub fn from_merges(
        points: Vec<WeightedPoint>,
        merges: &[(NodeId, NodeId)],
        metric: DistanceMetric,
    ) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(TagMapError::InvalidInput(
                "cannot build a cluster tree from zero points".into(),
            ));
        }
        if merges.len() != n - 1 {
            return Err(TagMapError::InvalidInput(format!(
                "expected {} merges for {} points, got {}",
                n - 1,
                n,
                merges.len()
            )));
        }

        let total = 2 * n - 1;
        let mut consumed = vec![false; total];
        let mut sizes = vec![1usize; total];
        for (i, &(a, b)) in merges.iter().enumerate() {
            let id = n + i;
            for child in [a, b] {
                if child >= id || consumed[child] {
                    return Err(TagMapError::InvalidInput(format!(
                        "merge {} references invalid or reused node {}",
                        i, child
                    )));
                }
                consumed[child] = true;
            }
            sizes[id] = sizes[a] + sizes[b];
        }

        // Parents always carry higher ids than their children, so walking ids
        // downward assigns every node its slice before its children need it.
        let mut starts = vec![0usize; total];
        for i in (0..merges.len()).rev() {
            let (a, b) = merges[i];
            let start = starts[n + i];
            starts[a] = start;
            starts[b] = start + sizes[a];
        }

        let mut ordered = points.clone();
        for (leaf, point) in points.iter().enumerate() {
            ordered[starts[leaf]] = *point;
        }

        let mut nodes: Vec<ClusterNode> = Vec::with_capacity(total);
        for (leaf, point) in points.iter().enumerate() {
            nodes.push(ClusterNode {
                bbox: BoundingBox2D::from_point(&point.position),
                edge: (point.position, point.position),
                children: None,
                members: starts[leaf]..starts[leaf] + 1,
            });
        }
        for (i, &(a, b)) in merges.iter().enumerate() {
            let (left, right) = (&nodes[a], &nodes[b]);
            let candidates = [left.edge.0, left.edge.1, right.edge.0, right.edge.1];
            let edge = farthest_pair(&candidates, metric).unwrap_or(left.edge);
            let bbox = left.bbox.union(&right.bbox);
            let start = starts[n + i];
            nodes.push(ClusterNode {
                bbox,
                edge,
                children: Some((a, b)),
                members: start..start + sizes[n + i],
            });
        }

        Ok(Self {
            points: ordered,
            nodes,
        })
    }

    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    /// Panics if `id` is out of range; ids only come from this tree.
    pub fn node(&self, id: NodeId) -> &ClusterNode {
        &self.nodes[id]
    }

    /// Every point reachable under `id`, in tree order.
    pub fn members(&self, id: NodeId) -> &[WeightedPoint] {
        &self.points[self.nodes[id].members.clone()]
    }

    pub fn weight(&self, id: NodeId) -> f64 {
        self.members(id).iter().map(|p| p.weight).sum()
    }

    /// All points of the tree, in leaf order.
    pub fn points(&self) -> &[WeightedPoint] {
        &self.points
    }

    /// Number of source points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
