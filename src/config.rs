//! Index configuration.
//!
//! Configuration is plain data with serde support so it can be embedded in a
//! host application's own config file, or loaded on its own from JSON or
//! (with the `toml` feature) TOML.

use crate::error::{GeoKdError, Result};
use std::path::Path;

/// Largest capacity an index may be configured with. Node links are `u32`
/// and `u32::MAX` is reserved as the "no child" marker.
pub const MAX_CAPACITY: usize = (u32::MAX - 1) as usize;

/// Index configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Maximum number of points the store can hold. Rebuild input beyond
    /// this is dropped.
    #[serde(default = "IndexConfig::default_capacity")]
    pub capacity: usize,

    /// Emit a warning when a rebuild drops points past capacity.
    #[serde(default = "IndexConfig::default_warn_on_truncate")]
    pub warn_on_truncate: bool,
}

impl IndexConfig {
    const fn default_capacity() -> usize {
        1_000_000
    }

    const fn default_warn_on_truncate() -> bool {
        true
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_warn_on_truncate(mut self, warn: bool) -> Self {
        self.warn_on_truncate = warn;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(GeoKdError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }

        if self.capacity > MAX_CAPACITY {
            return Err(GeoKdError::InvalidConfig(format!(
                "capacity {} exceeds the maximum of {}",
                self.capacity, MAX_CAPACITY
            )));
        }

        if self.capacity > 10_000_000 {
            log::warn!(
                "Index capacity of {} is very large; the store is sized for it on first rebuild",
                self.capacity
            );
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeoKdError::Config(e.to_string()))
    }

    /// Load a config file, picking the format from its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents),
            other => Err(GeoKdError::Config(format!(
                "unsupported config file extension: {:?}",
                other
            ))),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            warn_on_truncate: Self::default_warn_on_truncate(),
        }
    }
}
