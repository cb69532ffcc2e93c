//! Greedy spiral placement of sized tags.
//!
//! Tags are placed heaviest first. Each one tries its natural position, then
//! walks an outward spiral until its box stops colliding with everything
//! already placed. Collisions are answered by an R-tree built fresh for the
//! pass.
//!
//! ## Spiral
//!
//! | iteration | candidate center |
//! |-----------|------------------|
//! | 0         | natural center |
//! | k ≥ 1     | center + r·(cos θ, sin θ), θ = -90° + 25°·(k-1), r = 3 + (k-1) px |
//!
//! Iterations run up to [`SPIRAL_ITERATIONS`] inclusive, 13 attempts in all.

use super::aggregate::Tag;
use super::scale::FontScale;
use crate::config::OverflowPolicy;
use crate::measure::TextMeasurer;
use geo::Coord;
use rstar::{AABB, RTree, RTreeObject};
use std::cmp::Ordering;
use tagmap_types::bbox::BoundingBox2D;

/// Angle of the first displaced candidate, in degrees.
pub const SPIRAL_START_ANGLE: f64 = -90.0;
/// Rotation between consecutive candidates, in degrees.
pub const SPIRAL_ANGLE_STEP: f64 = 25.0;
/// Radius of the first displaced candidate, in pixels.
pub const SPIRAL_START_RADIUS: f64 = 3.0;
/// Radius growth between consecutive candidates, in pixels.
pub const SPIRAL_RADIUS_STEP: f64 = 1.0;
/// Last spiral iteration tried.
pub const SPIRAL_ITERATIONS: usize = 12;

/// Box occupied by a placed tag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlacedBox {
    min: [f64; 2],
    max: [f64; 2],
}

impl From<&BoundingBox2D> for PlacedBox {
    fn from(bbox: &BoundingBox2D) -> Self {
        Self {
            min: [bbox.min_x(), bbox.min_y()],
            max: [bbox.max_x(), bbox.max_y()],
        }
    }
}

impl RTreeObject for PlacedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Pixel-space index of placed tag boxes for one layout pass.
#[derive(Default)]
pub struct CollisionIndex {
    tree: RTree<PlacedBox>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bbox: &BoundingBox2D) {
        self.tree.insert(PlacedBox::from(bbox));
    }

    /// True when `bbox` touches or overlaps any inserted box.
    pub fn collides(&self, bbox: &BoundingBox2D) -> bool {
        let envelope = PlacedBox::from(bbox).envelope();
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .next()
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Candidate center for spiral iteration `step` around `center`.
pub fn spiral_candidate(center: Coord, step: usize) -> Coord {
    if step == 0 {
        return center;
    }
    let k = (step - 1) as f64;
    let radians = (SPIRAL_START_ANGLE + SPIRAL_ANGLE_STEP * k).to_radians();
    let radius = SPIRAL_START_RADIUS + SPIRAL_RADIUS_STEP * k;
    Coord {
        x: center.x + radians.cos() * radius,
        y: center.y + radians.sin() * radius,
    }
}

/// Priority order: heavier first, then shorter terms. Stable, so equal keys
/// keep their aggregation order.
pub fn order_tags(tags: &mut [Tag]) {
    tags.sort_by(compare_priority);
}

fn compare_priority(a: &Tag, b: &Tag) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| a.term.chars().count().cmp(&b.term.chars().count()))
}

/// Assign font sizes and measured pixel sizes.
pub fn size_tags<M: TextMeasurer + ?Sized>(tags: &mut [Tag], scale: &FontScale, measurer: &M) {
    for tag in tags.iter_mut() {
        tag.font_size = scale.font_size(tag.weight);
        let size = measurer.measure(tag.font_size, &tag.term);
        tag.set_size(size.width, size.height);
    }
}

/// Place tags in the given order; returns the placed ones in placement order.
///
/// Tags must already be ordered and sized. A tag whose 13 candidates all
/// collide is handled per `overflow`; a force-placed tag sits on its last
/// candidate and does not reserve its box.
pub fn place_tags(tags: Vec<Tag>, overflow: OverflowPolicy) -> Vec<Tag> {
    let total = tags.len();
    let mut index = CollisionIndex::new();
    let mut placed = Vec::with_capacity(total);
    let mut exhausted = 0usize;

    for mut tag in tags {
        if place_tag(&mut index, &mut tag) {
            placed.push(tag);
            continue;
        }

        exhausted += 1;
        match overflow {
            OverflowPolicy::Drop => {
                log::trace!("Dropping tag {:?}: no free spot within spiral", tag.term);
            }
            OverflowPolicy::ForcePlace => {
                log::trace!("Force-placing tag {:?} at its last spiral candidate", tag.term);
                tag.set_center(spiral_candidate(tag.center, SPIRAL_ITERATIONS));
                placed.push(tag);
            }
        }
    }

    if exhausted > 0 {
        log::warn!(
            "Spiral exhausted for {} of {} tags (policy: {:?})",
            exhausted,
            total,
            overflow
        );
    }

    placed
}

/// Try every spiral candidate; on success moves the tag and claims its box.
fn place_tag(index: &mut CollisionIndex, tag: &mut Tag) -> bool {
    let natural = tag.center;
    for step in 0..=SPIRAL_ITERATIONS {
        let candidate = spiral_candidate(natural, step);
        let bbox = BoundingBox2D::centered(candidate, tag.width, tag.height);
        if !index.collides(&bbox) {
            index.insert(&bbox);
            tag.set_center(candidate);
            tag.spiral_step = Some(step);
            return true;
        }
    }
    false
}
