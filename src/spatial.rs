//! Distance metrics leveraging the geo crate.
//!
//! The cluster builder measures proximity between label positions in
//! geographic space; the extractor and layout measure in pixels. Both kinds of
//! distance live here so the two spaces never get mixed up.

use geo::{Coord, Distance, Euclidean, Geodesic, Haversine, Point, Rhumb};
use serde::{Deserialize, Serialize};

/// Distance metrics for clustering label positions.
///
/// Different metrics are appropriate for different use cases:
/// - **Haversine**: Fast spherical distance, good for most lon/lat calculations
/// - **Geodesic**: More accurate ellipsoidal distance (Karney 2013), slower
/// - **Rhumb**: Constant bearing distance
/// - **Euclidean**: Planar distance, only for projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Haversine formula - assumes spherical Earth, fast and accurate enough for most uses
    #[default]
    Haversine,
    /// Geodesic distance using Karney (2013)
    Geodesic,
    /// Rhumb line (loxodrome) - maintains constant bearing
    Rhumb,
    /// Euclidean distance - for planar/projected coordinates only
    Euclidean,
}

/// Calculate the distance between two points using the specified metric.
///
/// Returns meters for the geographic metrics and coordinate units for
/// `Euclidean`.
///
/// # Examples
///
/// ```rust
/// use tagmap::spatial::{DistanceMetric, distance_between};
/// use geo::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// let la = Point::new(-118.2437, 34.0522);
///
/// let dist = distance_between(&nyc, &la, DistanceMetric::Haversine);
/// assert!(dist > 3_900_000.0); // ~3,944 km
/// ```
pub fn distance_between(point1: &Point, point2: &Point, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => Haversine.distance(*point1, *point2),
        DistanceMetric::Geodesic => Geodesic.distance(*point1, *point2),
        DistanceMetric::Rhumb => Rhumb.distance(*point1, *point2),
        DistanceMetric::Euclidean => Euclidean.distance(*point1, *point2),
    }
}

/// Straight-line distance between two pixel positions.
pub fn screen_distance(a: Coord, b: Coord) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Of the given candidates, the pair that lies farthest apart.
///
/// Used to keep a cluster's edge close to its diameter while merging: the
/// candidates are the endpoints of the two child edges. Returns `None` for an
/// empty slice; a single candidate pairs with itself.
pub fn farthest_pair(candidates: &[Point], metric: DistanceMetric) -> Option<(Point, Point)> {
    let first = *candidates.first()?;
    let mut best = (first, first);
    let mut best_dist = 0.0;

    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            let dist = distance_between(a, b, metric);
            if dist > best_dist {
                best_dist = dist;
                best = (*a, *b);
            }
        }
    }

    Some(best)
}
