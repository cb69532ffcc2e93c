//! Configuration for the tag map pipeline.
//!
//! Visualization parameters are validated when they are set, so a malformed
//! palette or inverted font range is rejected before any layout runs.
//!
//! # Example
//!
//! ```rust
//! use tagmap::{OverflowPolicy, VisParams};
//!
//! // Create default parameters
//! let params = VisParams::default();
//! assert_eq!(params.max_dist, 20.0);
//!
//! // Load from JSON; omitted fields keep their defaults
//! let json = r##"{
//!     "min_font_size": 10,
//!     "max_font_size": 40,
//!     "weight_threshold": 2,
//!     "color_scheme": ["#ffffd9", "#41b6c4", "#081d58"],
//!     "overflow": "force_place"
//! }"##;
//! let params = VisParams::from_json_str(json).unwrap();
//! assert_eq!(params.overflow, OverflowPolicy::ForcePlace);
//! ```

use crate::compute::color::parse_palette;
use crate::error::{Result, TagMapError};
use crate::spatial::DistanceMetric;
use serde::{Deserialize, Serialize};

/// What to do with a tag whose spiral search finds no free position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Leave the tag out of the placed output.
    #[default]
    Drop,
    /// Emit the tag at its last spiral candidate without reserving its box.
    ForcePlace,
}

/// Parameters of one view-only recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisParams {
    /// Font size assigned to the lightest tag
    #[serde(default = "VisParams::default_min_font_size")]
    pub min_font_size: f64,

    /// Font size assigned to the heaviest tag
    #[serde(default = "VisParams::default_max_font_size")]
    pub max_font_size: f64,

    /// Aggregated weight a tag needs to be rendered
    #[serde(default = "VisParams::default_weight_threshold")]
    pub weight_threshold: f64,

    /// Ordered palette, lightest tags first. Any CSS colour string is accepted.
    #[serde(default = "VisParams::default_color_scheme")]
    pub color_scheme: Vec<String>,

    /// On-screen edge length (pixels) below which a cluster renders as one tag
    #[serde(default = "VisParams::default_max_dist")]
    pub max_dist: f64,

    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl VisParams {
    const fn default_min_font_size() -> f64 {
        14.0
    }

    const fn default_max_font_size() -> f64 {
        32.0
    }

    const fn default_weight_threshold() -> f64 {
        1.0
    }

    const fn default_max_dist() -> f64 {
        20.0
    }

    /// ColorBrewer YlGnBu, classes 2..=6 of the 9-class scheme, darkest first.
    fn default_color_scheme() -> Vec<String> {
        ["#1d91c0", "#41b6c4", "#7fcdbb", "#c7e9b4", "#edf8b1"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    pub fn with_font_range(mut self, min_font_size: f64, max_font_size: f64) -> Self {
        self.min_font_size = min_font_size;
        self.max_font_size = max_font_size;
        self
    }

    pub fn with_weight_threshold(mut self, threshold: f64) -> Self {
        self.weight_threshold = threshold;
        self
    }

    pub fn with_color_scheme<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_scheme = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_dist(mut self, max_dist: f64) -> Self {
        self.max_dist = max_dist;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Check the parameters against their contract.
    ///
    /// # Errors
    ///
    /// Returns [`TagMapError::InvalidConfig`] for non-finite or non-positive
    /// font sizes, `min_font_size > max_font_size`, a non-finite threshold,
    /// a negative or non-finite `max_dist`, or an empty/unparsable palette.
    pub fn validate(&self) -> Result<()> {
        self.checked_palette().map(|_| ())
    }

    /// Validate the parameters and return the palette parsed to RGBA.
    ///
    /// # Errors
    ///
    /// Same as [`VisParams::validate`].
    pub fn checked_palette(&self) -> Result<Vec<[u8; 4]>> {
        if !self.min_font_size.is_finite() || !self.max_font_size.is_finite() {
            return Err(TagMapError::InvalidConfig(format!(
                "font sizes must be finite, got [{}, {}]",
                self.min_font_size, self.max_font_size
            )));
        }

        if self.min_font_size <= 0.0 {
            return Err(TagMapError::InvalidConfig(format!(
                "min_font_size must be positive, got {}",
                self.min_font_size
            )));
        }

        if self.min_font_size > self.max_font_size {
            return Err(TagMapError::InvalidConfig(format!(
                "min_font_size ({}) must be <= max_font_size ({})",
                self.min_font_size, self.max_font_size
            )));
        }

        if !self.weight_threshold.is_finite() {
            return Err(TagMapError::InvalidConfig(format!(
                "weight_threshold must be finite, got {}",
                self.weight_threshold
            )));
        }

        if !self.max_dist.is_finite() || self.max_dist < 0.0 {
            return Err(TagMapError::InvalidConfig(format!(
                "max_dist must be a non-negative number, got {}",
                self.max_dist
            )));
        }

        parse_palette(&self.color_scheme)
    }

    /// Parse parameters from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Parse parameters from TOML and validate them.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }
}

impl Default for VisParams {
    fn default() -> Self {
        Self {
            min_font_size: Self::default_min_font_size(),
            max_font_size: Self::default_max_font_size(),
            weight_threshold: Self::default_weight_threshold(),
            color_scheme: Self::default_color_scheme(),
            max_dist: Self::default_max_dist(),
            overflow: OverflowPolicy::default(),
        }
    }
}

/// Parameters of the view-independent clustering stage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

impl ClusterConfig {
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }
}
