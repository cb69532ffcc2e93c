//! # tagmap-types
//!
//! Core value types shared by the tagmap layout engine.
//!
//! - **Records**: `DataPoint` (label, position, weight) and `WeightedPoint`
//! - **Boxes**: `BoundingBox2D`, a thin wrapper over `geo::Rect`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use tagmap_types::point::DataPoint;
//! use geo::Point;
//!
//! let record = DataPoint::new("#coffee", Point::new(-122.4194, 37.7749), 3.0);
//! assert_eq!(record.label, "#coffee");
//! ```

pub mod bbox;
pub mod point;
