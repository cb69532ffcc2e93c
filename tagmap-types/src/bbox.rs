use geo::{Coord, Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Represents a rectangular area defined by minimum and maximum coordinates.
/// This is a wrapper around `geo::Rect` with the handful of operations the
/// clustering and layout stages need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// `geo::Rect` normalizes the corners, so swapped bounds are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagmap_types::bbox::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(-74.0, 40.7, -73.9, 40.8);
    /// assert!((bbox.width() - 0.1).abs() < 1e-9);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Degenerate box enclosing a single point.
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.x(), point.y(), point.x(), point.y())
    }

    /// Box centered at `center` with the given extent.
    ///
    /// ```
    /// use tagmap_types::bbox::BoundingBox2D;
    /// use geo::coord;
    ///
    /// let bbox = BoundingBox2D::centered(coord! { x: 10.0, y: 10.0 }, 4.0, 2.0);
    /// assert_eq!(bbox.min_x(), 8.0);
    /// assert_eq!(bbox.max_y(), 11.0);
    /// ```
    pub fn centered(center: Coord, width: f64, height: f64) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// The four corners in `(min,min)`, `(min,max)`, `(max,min)`, `(max,max)` order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x(), self.min_y()),
            Point::new(self.min_x(), self.max_y()),
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
        ]
    }

    /// Check if this bounding box intersects with another. Touching edges count.
    pub fn intersects(&self, other: &BoundingBox2D) -> bool {
        !(self.max_x() < other.min_x()
            || self.min_x() > other.max_x()
            || self.max_y() < other.min_y()
            || self.min_y() > other.max_y())
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        Self::new(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}
