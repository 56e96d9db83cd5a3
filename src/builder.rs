//! Index builder for flexible configuration
//!
//! This module provides a builder pattern for creating indexes with a
//! custom capacity or a configuration loaded elsewhere.

use crate::config::IndexConfig;
use crate::error::Result;
use crate::index::GeoIndex;
use std::path::Path;

/// Builder for index configuration.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of points.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_capacity(capacity);
        self
    }

    /// Enable or disable the truncation warning.
    pub fn warn_on_truncate(mut self, warn: bool) -> Self {
        self.config = self.config.with_warn_on_truncate(warn);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a JSON (or, with the `toml` feature,
    /// TOML) file.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = IndexConfig::from_file(path)?;
        Ok(self)
    }

    /// Validate the configuration and build the index.
    pub fn build(self) -> Result<GeoIndex> {
        GeoIndex::with_config(self.config)
    }
}
