//! Turning selected cluster nodes into tags.
//!
//! Aggregation happens in geographic space: every member point is folded into
//! a running weighted mean, and only the final centroid is projected to
//! pixels. The viewport therefore never affects where a centroid lands.

use super::cluster::SelectedClusters;
use crate::view::ViewTransform;
use geo::{Coord, Point};
use tagmap_types::bbox::BoundingBox2D;
use tagmap_types::point::WeightedPoint;

/// Aggregated label for one selected cluster.
///
/// Starts empty and grows one point at a time through [`Tag::add`]. Sizing
/// and placement fill in the remaining fields later in the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub term: String,
    /// Points folded into this tag, in insertion order
    pub members: Vec<WeightedPoint>,
    /// Weighted centroid in geographic coordinates
    pub centroid: Point,
    /// Screen position in pixels; the projected centroid until placement moves it
    pub center: Coord,
    /// Sum of member weights
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    /// Spiral iteration that placed this tag; `None` until placed or when
    /// force-placed after the search ran out
    pub spiral_step: Option<usize>,
}

impl Tag {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            members: Vec::new(),
            centroid: Point::new(0.0, 0.0),
            center: Coord { x: 0.0, y: 0.0 },
            weight: 0.0,
            width: 0.0,
            height: 0.0,
            font_size: 0.0,
            spiral_step: None,
        }
    }

    /// Fold one point into the centroid and weight sum in O(1).
    ///
    /// While every weight seen so far is zero the centroid is the plain mean
    /// of the positions; the first positive weight takes over completely.
    pub fn add(&mut self, point: WeightedPoint) {
        self.members.push(point);
        self.weight += point.weight;

        let share = if self.weight > 0.0 {
            point.weight / self.weight
        } else {
            1.0 / self.members.len() as f64
        };
        let (cx, cy) = self.centroid.x_y();
        self.centroid = Point::new(
            cx + (point.x() - cx) * share,
            cy + (point.y() - cy) * share,
        );
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn set_center(&mut self, center: Coord) {
        self.center = center;
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Pixel box around the current center.
    pub fn bbox(&self) -> BoundingBox2D {
        BoundingBox2D::centered(self.center, self.width, self.height)
    }
}

/// Build the tag for one node's members and project its centroid.
pub fn aggregate<V: ViewTransform + ?Sized>(
    term: &str,
    members: &[WeightedPoint],
    view: &V,
) -> Tag {
    let mut tag = Tag::new(term);
    tag.members.reserve_exact(members.len());
    for point in members {
        tag.add(*point);
    }
    tag.set_center(view.project(tag.centroid));
    tag
}

/// Aggregate every selected node and drop tags lighter than `weight_threshold`.
///
/// Tags whose weight sum overflows to infinity are dropped with a warning:
/// they cannot be scaled or placed. Output follows label order, then node
/// order within each label.
pub fn aggregate_tags<V: ViewTransform + ?Sized>(
    selected: &[SelectedClusters<'_>],
    view: &V,
    weight_threshold: f64,
) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut filtered = 0usize;

    for group in selected {
        for &id in &group.nodes {
            let tag = aggregate(group.label, group.tree.members(id), view);
            if !tag.weight.is_finite() {
                log::warn!(
                    "Dropping tag {:?}: weight of {} members overflows",
                    tag.term,
                    tag.count()
                );
                continue;
            }
            if tag.weight >= weight_threshold {
                tags.push(tag);
            } else {
                filtered += 1;
            }
        }
    }

    log::debug!(
        "Aggregated {} tags ({} below weight threshold {})",
        tags.len(),
        filtered,
        weight_threshold
    );
    tags
}
