use geo::Point;
use serde::{Deserialize, Serialize};

/// A single labeled, weighted, geolocated input record.
///
/// The position is stored as `(x, y)` = `(longitude, latitude)`. When
/// deserializing, the position may also be given under the `coordinates` key,
/// which is how most tag datasets ship:
///
/// ```
/// use tagmap_types::point::DataPoint;
///
/// let json = r##"{"label": "#hiring", "coordinates": {"x": -73.99, "y": 40.73}, "weight": 2}"##;
/// let record: DataPoint = serde_json::from_str(json).unwrap();
/// assert_eq!(record.weight, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category text rendered as the tag term
    pub label: String,
    /// Geographic position (longitude, latitude)
    #[serde(alias = "coordinates")]
    pub position: Point<f64>,
    /// Non-negative contribution of this record to its tag
    #[serde(default = "DataPoint::default_weight")]
    pub weight: f64,
}

impl DataPoint {
    const fn default_weight() -> f64 {
        1.0
    }

    /// Create a new record.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagmap_types::point::DataPoint;
    /// use geo::Point;
    ///
    /// let record = DataPoint::new("#job", Point::new(2.35, 48.85), 1.0);
    /// assert_eq!(record.x(), 2.35);
    /// ```
    pub fn new(label: impl Into<String>, position: Point<f64>, weight: f64) -> Self {
        Self {
            label: label.into(),
            position,
            weight,
        }
    }

    /// Get the x coordinate (longitude).
    pub fn x(&self) -> f64 {
        self.position.x()
    }

    /// Get the y coordinate (latitude).
    pub fn y(&self) -> f64 {
        self.position.y()
    }

    /// Strip the label, keeping what the clustering stage needs.
    pub fn to_weighted(&self) -> WeightedPoint {
        WeightedPoint::new(self.position, self.weight)
    }
}

/// A position with the weight it carries, without its label.
///
/// Cluster trees are built per label, so members only keep geometry and weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub position: Point<f64>,
    pub weight: f64,
}

impl WeightedPoint {
    pub fn new(position: Point<f64>, weight: f64) -> Self {
        Self { position, weight }
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }
}
