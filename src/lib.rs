//! Occlusion-free tag maps: hierarchical clustering, view-dependent aggregation
//! and greedy spiral label placement for weighted, geolocated labels.
//!
//! ```rust
//! use tagmap::{DataPoint, LinearTransform, Point, TagMapper, Viewport};
//!
//! let mut mapper = TagMapper::with_default_measurer()?;
//! mapper.set_data(&[
//!     DataPoint::new("#sunset", Point::new(-122.42, 37.77), 4.0),
//!     DataPoint::new("#sunset", Point::new(-122.41, 37.78), 2.0),
//!     DataPoint::new("#fog", Point::new(-122.48, 37.76), 1.0),
//! ])?;
//!
//! let view = LinearTransform::centered(Point::new(-122.44, 37.77), 2000.0, Viewport::new(800.0, 600.0));
//! for tag in mapper.tags(&view)? {
//!     println!("{} at {:?} ({} px)", tag.term, tag.position, tag.size);
//! }
//! # Ok::<(), tagmap::TagMapError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod mapper;
pub mod measure;
pub mod spatial;
pub mod view;

pub use builder::TagMapBuilder;
pub use error::{Result, TagMapError};
pub use mapper::{RenderedTag, TagMapper};

pub use geo::{Coord, Point};

pub use config::{ClusterConfig, OverflowPolicy, VisParams};

pub use measure::{MonospaceMeasurer, TextMeasurer, TextSize};

pub use spatial::{DistanceMetric, distance_between};

pub use view::{LinearTransform, ViewTransform, Viewport};

pub use compute::aggregate::Tag;
pub use compute::cluster::{
    ClusterNode, ClusterStrategy, ClusterTree, Hierarchy, NodeId, SelectedClusters, SingleLinkage,
};
pub use compute::scale::FontScale;

pub use tagmap_types::bbox::BoundingBox2D;
pub use tagmap_types::point::{DataPoint, WeightedPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, TagMapBuilder, TagMapError, TagMapper};

    pub use geo::{Coord, Point};

    pub use crate::{DataPoint, RenderedTag, WeightedPoint};

    pub use crate::{OverflowPolicy, VisParams};

    pub use crate::{LinearTransform, ViewTransform, Viewport};

    pub use crate::{MonospaceMeasurer, TextMeasurer, TextSize};
}
