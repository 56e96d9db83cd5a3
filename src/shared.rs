//! Process-wide index instance.
//!
//! Hosts that expose the index through a foreign-function or scripting
//! binding usually have no place to keep a handle between calls. They can
//! use this module instead of constructing a [`GeoIndex`] themselves.
//! Initialization is atomic and idempotent: when several threads race on
//! first use exactly one index is created and all of them observe it.

use crate::config::IndexConfig;
use crate::error::Result;
use crate::index::GeoIndex;
use once_cell::sync::OnceCell;

static SHARED: OnceCell<GeoIndex> = OnceCell::new();

/// Initialize the shared index with `config`.
///
/// The first successful call wins. Later calls return the existing index
/// unchanged, even if they pass a different configuration.
pub fn init(config: IndexConfig) -> Result<&'static GeoIndex> {
    config.validate()?;
    let index = SHARED.get_or_try_init(|| GeoIndex::with_config(config.clone()))?;

    if index.config() != &config {
        log::debug!(
            "Shared index already initialized with {:?}; ignoring {:?}",
            index.config(),
            config
        );
    }

    Ok(index)
}

/// The shared index, initialized with the default configuration if
/// [`init`] has not run yet.
pub fn get() -> &'static GeoIndex {
    SHARED.get_or_init(GeoIndex::new)
}

pub fn is_initialized() -> bool {
    SHARED.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoKdError;
    use crate::record::Coord;

    // Single test: the instance is process-wide, so ordering matters.
    #[test]
    fn test_init_is_idempotent() {
        assert!(matches!(
            init(IndexConfig::default().with_capacity(0)),
            Err(GeoKdError::InvalidConfig(_))
        ));
        assert!(!is_initialized());

        let first = init(IndexConfig::default().with_capacity(16)).unwrap();
        let second = init(IndexConfig::default().with_capacity(32)).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, get()));
        assert_eq!(get().capacity(), 16);

        get().rebuild(vec![(Coord::new(1, 1), "shared")]);
        assert_eq!(first.query(Coord::new(0, 0)).unwrap().label.as_ref(), b"shared");
    }
}
