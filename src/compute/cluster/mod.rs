//! View-independent clustering of label positions.
//!
//! Points are grouped by label in first-seen order, and each group is turned
//! into a binary [`ClusterTree`] by a pluggable [`ClusterStrategy`]. The
//! resulting [`Hierarchy`] is built once per dataset and is read-only
//! afterwards, so it can be shared across any number of view-only recomputes.

pub mod extract;
pub mod single_linkage;
pub mod tree;

pub use extract::{SelectedClusters, extract_clusters, is_atomic, is_visible, select_nodes};
pub use single_linkage::SingleLinkage;
pub use tree::{ClusterNode, ClusterTree, NodeId};

use crate::compute::validation::{validate_label, validate_weighted_point};
use crate::error::{Result, TagMapError};
use geo::Point;
use rustc_hash::FxHashMap;
use tagmap_types::point::WeightedPoint;

/// Agglomeration algorithm turning one label's points into a binary tree.
///
/// Implementations see only positions and weights; weights are carried along
/// for aggregation and must not influence the hierarchy's shape.
pub trait ClusterStrategy {
    /// Build a tree over a non-empty point set.
    fn build(&self, points: Vec<WeightedPoint>) -> Result<ClusterTree>;
}

impl<S: ClusterStrategy + ?Sized> ClusterStrategy for Box<S> {
    fn build(&self, points: Vec<WeightedPoint>) -> Result<ClusterTree> {
        (**self).build(points)
    }
}

/// Records grouped by label, labels in first-seen order.
pub type LabelGroups = Vec<(String, Vec<WeightedPoint>)>;

/// Labels seen so far and the slot of each in the group list.
#[derive(Default)]
struct Grouper {
    groups: LabelGroups,
    index: FxHashMap<String, usize>,
}

impl Grouper {
    fn push(&mut self, label: &str, point: WeightedPoint) {
        match self.index.get(label) {
            Some(&slot) => self.groups[slot].1.push(point),
            None => {
                self.index.insert(label.to_string(), self.groups.len());
                self.groups.push((label.to_string(), vec![point]));
            }
        }
    }
}

fn validate_record(label: &str, point: &WeightedPoint) -> Result<()> {
    validate_label(label)?;
    validate_weighted_point(point)
}

/// Group records by label using caller-supplied accessors.
///
/// Records with an empty label, non-finite coordinates, or a negative or
/// non-finite weight are skipped with a warning.
pub fn group_by_label<T, L, P, W>(
    data: &[T],
    get_label: L,
    get_position: P,
    get_weight: W,
) -> LabelGroups
where
    L: for<'r> Fn(&'r T) -> &'r str,
    P: Fn(&T) -> Point,
    W: Fn(&T) -> f64,
{
    let mut grouper = Grouper::default();
    let mut skipped = 0usize;

    for record in data {
        let label = get_label(record);
        let point = WeightedPoint::new(get_position(record), get_weight(record));

        if let Err(e) = validate_record(label, &point) {
            log::trace!("Skipping record labeled {:?}: {}", label, e);
            skipped += 1;
            continue;
        }
        grouper.push(label, point);
    }

    if skipped > 0 {
        log::warn!(
            "Skipped {} of {} records with empty labels or invalid coordinates/weights",
            skipped,
            data.len()
        );
    }

    grouper.groups
}

/// Like [`group_by_label`], but the first malformed record fails the whole
/// grouping.
///
/// # Errors
///
/// [`TagMapError::InvalidInput`] naming the record's index and the problem.
pub fn try_group_by_label<T, L, P, W>(
    data: &[T],
    get_label: L,
    get_position: P,
    get_weight: W,
) -> Result<LabelGroups>
where
    L: for<'r> Fn(&'r T) -> &'r str,
    P: Fn(&T) -> Point,
    W: Fn(&T) -> f64,
{
    let mut grouper = Grouper::default();

    for (i, record) in data.iter().enumerate() {
        let label = get_label(record);
        let point = WeightedPoint::new(get_position(record), get_weight(record));

        validate_record(label, &point).map_err(|e| match e {
            TagMapError::InvalidInput(msg) => {
                TagMapError::InvalidInput(format!("record {i}: {msg}"))
            }
            other => other,
        })?;
        grouper.push(label, point);
    }

    Ok(grouper.groups)
}

/// Ordered mapping from label to its cluster tree.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    labels: Vec<String>,
    trees: Vec<ClusterTree>,
    index: FxHashMap<String, usize>,
}

impl Hierarchy {
    /// Build one tree per label group, preserving group order.
    pub fn build<S: ClusterStrategy + ?Sized>(groups: LabelGroups, strategy: &S) -> Result<Self> {
        let mut hierarchy = Self::default();
        hierarchy.labels.reserve(groups.len());
        hierarchy.trees.reserve(groups.len());

        for (label, points) in groups {
            let tree = strategy.build(points)?;
            hierarchy.index.insert(label.clone(), hierarchy.trees.len());
            hierarchy.labels.push(label);
            hierarchy.trees.push(tree);
        }

        Ok(hierarchy)
    }

    pub fn get(&self, label: &str) -> Option<&ClusterTree> {
        self.index.get(label).map(|&slot| &self.trees[slot])
    }

    /// `(label, tree)` pairs in first-seen label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClusterTree)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.trees.iter())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels (trees).
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of points across all trees.
    pub fn point_count(&self) -> usize {
        self.trees.iter().map(ClusterTree::len).sum()
    }
}
