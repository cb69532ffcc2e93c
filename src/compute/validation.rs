//! Validation for incoming records.

use crate::error::{Result, TagMapError};
use tagmap_types::point::WeightedPoint;

/// Validates a record's position and weight.
///
/// Coordinates must be finite (they are projected to pixels every frame) and
/// the weight must be finite and non-negative (it drives both the centroid and
/// the log font scale).
///
/// # Examples
///
/// ```
/// use tagmap::compute::validation::validate_weighted_point;
/// use tagmap_types::point::WeightedPoint;
/// use geo::Point;
///
/// assert!(validate_weighted_point(&WeightedPoint::new(Point::new(-74.0, 40.7), 2.0)).is_ok());
/// assert!(validate_weighted_point(&WeightedPoint::new(Point::new(f64::NAN, 40.7), 2.0)).is_err());
/// assert!(validate_weighted_point(&WeightedPoint::new(Point::new(-74.0, 40.7), -1.0)).is_err());
/// ```
pub fn validate_weighted_point(point: &WeightedPoint) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() || !y.is_finite() {
        return Err(TagMapError::InvalidInput(format!(
            "Coordinates must be finite, got: ({}, {})",
            x, y
        )));
    }

    if !point.weight.is_finite() {
        return Err(TagMapError::InvalidInput(format!(
            "Weight must be finite, got: {}",
            point.weight
        )));
    }

    if point.weight < 0.0 {
        return Err(TagMapError::InvalidInput(format!(
            "Weight must be non-negative, got: {}",
            point.weight
        )));
    }

    Ok(())
}

/// Validates a label; empty labels cannot be rendered as tags.
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(TagMapError::InvalidInput("Label must not be empty".into()));
    }
    Ok(())
}
