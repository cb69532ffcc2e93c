//! Tag mapper builder for flexible configuration
//!
//! This module provides a builder pattern for creating a [`TagMapper`] with
//! custom visualization parameters, clustering settings, or a custom
//! clustering strategy.

use crate::compute::cluster::{ClusterStrategy, SingleLinkage};
use crate::config::{ClusterConfig, VisParams};
use crate::error::Result;
use crate::mapper::TagMapper;
use crate::measure::TextMeasurer;

/// Builder for a [`TagMapper`].
pub struct TagMapBuilder {
    params: VisParams,
    cluster_config: ClusterConfig,
    strategy: Option<Box<dyn ClusterStrategy + Send + Sync>>,
}

impl TagMapBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self {
            params: VisParams::default(),
            cluster_config: ClusterConfig::default(),
            strategy: None,
        }
    }

    /// Set the visualization parameters (font range, threshold, palette, etc.).
    pub fn vis_params(mut self, params: VisParams) -> Self {
        self.params = params;
        self
    }

    /// Configure the default single-linkage strategy.
    pub fn cluster_config(mut self, config: ClusterConfig) -> Self {
        self.cluster_config = config;
        self
    }

    /// Use a custom clustering strategy; `cluster_config` is then ignored.
    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: ClusterStrategy + Send + Sync + 'static,
    {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Build the mapper. Parameters are validated here.
    pub fn build<M: TextMeasurer>(self, measurer: M) -> Result<TagMapper<M>> {
        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => Box::new(SingleLinkage::from_config(&self.cluster_config)),
        };
        TagMapper::with_parts(measurer, self.params, strategy)
    }
}

impl Default for TagMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TagMapBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagMapBuilder")
            .field("params", &self.params)
            .field("cluster_config", &self.cluster_config)
            .field("custom_strategy", &self.strategy.is_some())
            .finish()
    }
}
