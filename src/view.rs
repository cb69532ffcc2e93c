//! View transform seam between the layout engine and its host.
//!
//! The host owns projection math; the engine only needs to move points
//! between geographic and pixel space and to know the viewport size.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the visible area. Pixel `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Inclusive bounds test against `[0, width] x [0, height]`.
    pub fn contains(&self, pixel: Coord) -> bool {
        pixel.x >= 0.0 && pixel.x <= self.width && pixel.y >= 0.0 && pixel.y <= self.height
    }
}

/// Projection supplied by the host for a single frame.
///
/// Implementations must be pure for the duration of one pipeline invocation:
/// the same geographic point always maps to the same pixel.
pub trait ViewTransform {
    /// Geographic position to pixel position.
    fn project(&self, point: Point) -> Coord;

    /// Pixel position back to a geographic position.
    fn unproject(&self, pixel: Coord) -> Point;

    /// Size of the visible area in pixels.
    fn viewport(&self) -> Viewport;
}

impl<T: ViewTransform + ?Sized> ViewTransform for &T {
    fn project(&self, point: Point) -> Coord {
        (**self).project(point)
    }

    fn unproject(&self, pixel: Coord) -> Point {
        (**self).unproject(pixel)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

/// Planar transform: `pixel = (point - origin) * scale`, with y growing downward.
///
/// Suitable for pre-projected coordinates, tests and offline layout. Map hosts
/// supply their own Web Mercator implementation of [`ViewTransform`].
///
/// # Examples
///
/// ```rust
/// use tagmap::view::{LinearTransform, ViewTransform, Viewport};
/// use geo::Point;
///
/// // 10 px per unit, top-left of the screen at (0, 50)
/// let view = LinearTransform::new(Point::new(0.0, 50.0), 10.0, Viewport::new(500.0, 500.0));
/// let pixel = view.project(Point::new(5.0, 45.0));
/// assert_eq!((pixel.x, pixel.y), (50.0, 50.0));
/// assert_eq!(view.unproject(pixel), Point::new(5.0, 45.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    /// Geographic position shown at pixel `(0, 0)`
    pub origin: Point,
    /// Pixels per coordinate unit
    pub scale: f64,
    pub viewport: Viewport,
}

impl LinearTransform {
    pub fn new(origin: Point, scale: f64, viewport: Viewport) -> Self {
        Self {
            origin,
            scale,
            viewport,
        }
    }

    /// Transform whose viewport is centered on `center`.
    pub fn centered(center: Point, scale: f64, viewport: Viewport) -> Self {
        let origin = Point::new(
            center.x() - viewport.width * 0.5 / scale,
            center.y() + viewport.height * 0.5 / scale,
        );
        Self::new(origin, scale, viewport)
    }

    /// Same center, scale multiplied by `factor`.
    pub fn zoomed(&self, factor: f64) -> Self {
        let center = self.unproject(geo::coord! {
            x: self.viewport.width * 0.5,
            y: self.viewport.height * 0.5,
        });
        Self::centered(center, self.scale * factor, self.viewport)
    }
}

impl ViewTransform for LinearTransform {
    fn project(&self, point: Point) -> Coord {
        geo::coord! {
            x: (point.x() - self.origin.x()) * self.scale,
            y: (self.origin.y() - point.y()) * self.scale,
        }
    }

    fn unproject(&self, pixel: Coord) -> Point {
        Point::new(
            self.origin.x() + pixel.x / self.scale,
            self.origin.y() - pixel.y / self.scale,
        )
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_contains_is_inclusive() {
        let viewport = Viewport::new(100.0, 50.0);
        assert!(viewport.contains(geo::coord! { x: 0.0, y: 0.0 }));
        assert!(viewport.contains(geo::coord! { x: 100.0, y: 50.0 }));
        assert!(!viewport.contains(geo::coord! { x: -0.1, y: 10.0 }));
        assert!(!viewport.contains(geo::coord! { x: 10.0, y: 50.1 }));
    }

    #[test]
    fn test_linear_round_trip() {
        let view = LinearTransform::new(Point::new(-10.0, 10.0), 4.0, Viewport::new(80.0, 80.0));
        let point = Point::new(-7.5, 2.25);
        let pixel = view.project(point);
        assert_eq!((pixel.x, pixel.y), (10.0, 31.0));
        assert_eq!(view.unproject(pixel), point);
    }

    #[test]
    fn test_centered_and_zoomed() {
        let viewport = Viewport::new(200.0, 100.0);
        let view = LinearTransform::centered(Point::new(3.0, 4.0), 10.0, viewport);
        let center = view.project(Point::new(3.0, 4.0));
        assert_eq!((center.x, center.y), (100.0, 50.0));

        let zoomed = view.zoomed(2.0);
        assert_eq!(zoomed.scale, 20.0);
        let center = zoomed.project(Point::new(3.0, 4.0));
        assert_eq!((center.x, center.y), (100.0, 50.0));
    }
}
