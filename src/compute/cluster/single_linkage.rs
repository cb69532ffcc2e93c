//! Single-linkage agglomeration.
//!
//! Builds the minimum spanning tree of the label's positions with Prim's
//! algorithm, then replays its edges shortest-first through a union-find to
//! obtain the dendrogram. Cutting the MST this way yields exactly the
//! single-linkage hierarchy.
//!
//! Cost is O(n²) distance evaluations per label with O(n) memory, which is
//! what the dense MST needs anyway; labels in a tag map rarely exceed a few
//! thousand points.

use super::ClusterStrategy;
use super::tree::{ClusterTree, NodeId};
use crate::config::ClusterConfig;
use crate::error::Result;
use crate::spatial::{DistanceMetric, distance_between};
use tagmap_types::point::WeightedPoint;

/// Proximity-based agglomeration under a configurable distance metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SingleLinkage {
    pub metric: DistanceMetric,
}

impl SingleLinkage {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    pub fn from_config(config: &ClusterConfig) -> Self {
        Self::new(config.distance_metric)
    }

    /// Minimum spanning tree edges `(from, to, distance)` in insertion order.
    fn spanning_edges(&self, points: &[WeightedPoint]) -> Vec<(usize, usize, f64)> {
        let n = points.len();
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        if n < 2 {
            return edges;
        }

        let mut in_tree = vec![false; n];
        let mut best = vec![f64::INFINITY; n];
        let mut link = vec![0usize; n];
        let mut current = 0;
        in_tree[0] = true;

        for _ in 1..n {
            let mut next: Option<usize> = None;
            for j in 0..n {
                if in_tree[j] {
                    continue;
                }
                let dist = distance_between(
                    &points[current].position,
                    &points[j].position,
                    self.metric,
                );
                if dist < best[j] {
                    best[j] = dist;
                    link[j] = current;
                }
                if next.is_none_or(|k| best[j] < best[k]) {
                    next = Some(j);
                }
            }

            let Some(j) = next else { break };
            in_tree[j] = true;
            edges.push((link[j], j, best[j]));
            current = j;
        }

        edges
    }
}

impl ClusterStrategy for SingleLinkage {
    fn build(&self, points: Vec<WeightedPoint>) -> Result<ClusterTree> {
        let n = points.len();
        let mut edges = self.spanning_edges(&points);
        // Stable: equal distances merge in MST discovery order.
        edges.sort_by(|a, b| a.2.total_cmp(&b.2));

        let mut sets = DisjointSets::new(n);
        // Dendrogram node currently representing each set root.
        let mut cluster_of: Vec<NodeId> = (0..n).collect();
        let mut merges = Vec::with_capacity(n.saturating_sub(1));

        for (from, to, _) in edges {
            let (ra, rb) = (sets.find(from), sets.find(to));
            if ra == rb {
                continue;
            }
            let merged = n + merges.len();
            merges.push((cluster_of[ra], cluster_of[rb]));
            let root = sets.union(ra, rb);
            cluster_of[root] = merged;
        }

        ClusterTree::from_merges(points, &merges, self.metric)
    }
}

/// Union-find with path halving and union by size.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Joins two roots, returning the surviving root.
    fn union(&mut self, a: usize, b: usize) -> usize {
        let (big, small) = if self.size[a] >= self.size[b] {
            (a, b)
        } else {
            (b, a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }
}
