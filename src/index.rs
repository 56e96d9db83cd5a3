//! Index lifetime management.
//!
//! `GeoIndex` owns the point store, the current tree root and the lock that
//! lets many concurrent queries coexist with wholesale rebuilds.
//!
//! - **Rebuild** takes the write lock for the whole overwrite + build, then
//!   publishes the new generation when the lock is released.
//! - **Query** takes the read lock only for the tree walk and copies the
//!   label out before releasing it.
//!
//! The store and its lock are allocated on first rebuild through a
//! `OnceCell`, so concurrent first use is safe.

use crate::compute;
use crate::config::IndexConfig;
use crate::error::{GeoKdError, Result};
use crate::record::Coord;
use crate::stats::IndexStats;
use crate::store::{PointStore, RecordSnapshot};
use bytes::Bytes;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nearest {
    /// Label of the closest point, independent of later rebuilds.
    pub label: Bytes,
    pub coord: Coord,
    pub distance_sq: u128,
    /// Time spent in the tree walk.
    pub elapsed: Duration,
    /// Tree nodes examined.
    pub visited: usize,
}

/// Outcome of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Points in the new generation.
    pub count: usize,
    /// Input went past capacity and its tail was dropped.
    pub truncated: bool,
    pub generation: u64,
    pub elapsed: Duration,
}

/// The active generation: store contents and the root built over them.
/// Only ever changed as a unit under the write lock.
struct Generation {
    store: PointStore,
    root: Option<u32>,
    number: u64,
}

/// In-memory 2D nearest-neighbor index over labeled points.
pub struct GeoIndex {
    config: IndexConfig,
    state: OnceCell<RwLock<Generation>>,
    rebuilds: AtomicU64,
    queries: AtomicU64,
    truncated_rebuilds: AtomicU64,
}

impl GeoIndex {
    /// Create an index with default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(IndexConfig::default())
    }

    /// Create an index with custom configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    pub fn builder() -> crate::builder::IndexBuilder {
        crate::builder::IndexBuilder::new()
    }

    fn from_valid_config(config: IndexConfig) -> Self {
        Self {
            config,
            state: OnceCell::new(),
            rebuilds: AtomicU64::new(0),
            queries: AtomicU64::new(0),
            truncated_rebuilds: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn state(&self) -> &RwLock<Generation> {
        self.state.get_or_init(|| {
            log::debug!("Allocating point store for {} entries", self.config.capacity);
            RwLock::new(Generation {
                store: PointStore::with_capacity(self.config.capacity),
                root: None,
                number: 0,
            })
        })
    }

    /// Replace the whole index with `points` and return the new point count.
    ///
    /// Points are stored in input order; anything past capacity is dropped
    /// and never read beyond the first extra item. An empty input clears the
    /// index, after which queries fail with [`GeoKdError::UninitializedIndex`].
    ///
    /// `points` is consumed while the exclusive lock is held, so queries
    /// wait on it and the iterator must not call back into this index (the
    /// same thread taking the lock twice deadlocks). If it panics, the index
    /// is left empty.
    pub fn rebuild<I, L>(&self, points: I) -> usize
    where
        I: IntoIterator<Item = (Coord, L)>,
        L: Into<Bytes>,
    {
        self.rebuild_with_summary(points).count
    }

    /// Like [`GeoIndex::rebuild`], reporting truncation and timing.
    pub fn rebuild_with_summary<I, L>(&self, points: I) -> RebuildSummary
    where
        I: IntoIterator<Item = (Coord, L)>,
        L: Into<Bytes>,
    {
        let started = Instant::now();

        let (outcome, generation) = {
            let mut state = self.state().write();
            let Generation {
                store,
                root,
                number,
            } = &mut *state;

            *root = None;
            let outcome = store.fill(points);
            *root = compute::build(store.records_mut(), 0);
            *number += 1;
            (outcome, *number)
        };

        let elapsed = started.elapsed();
        self.rebuilds.fetch_add(1, Ordering::Relaxed);

        if outcome.truncated {
            self.truncated_rebuilds.fetch_add(1, Ordering::Relaxed);
            if self.config.warn_on_truncate {
                log::warn!(
                    "Rebuild input exceeds capacity {}; kept the first {} points",
                    self.config.capacity,
                    outcome.count
                );
            }
        }

        log::debug!(
            "Rebuilt generation {} with {} points in {:?}",
            generation,
            outcome.count,
            elapsed
        );

        RebuildSummary {
            count: outcome.count,
            truncated: outcome.truncated,
            generation,
            elapsed,
        }
    }

    /// Find the stored point closest to `target`.
    pub fn query(&self, target: Coord) -> Result<Nearest> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let lock = self.state.get().ok_or(GeoKdError::UninitializedIndex)?;
        let state = lock.read();
        if state.store.is_empty() {
            return Err(GeoKdError::UninitializedIndex);
        }

        let records = state.store.records();
        let started = Instant::now();
        let found = compute::nearest(records, state.root, &target)
            .ok_or(GeoKdError::UninitializedIndex)?;
        let elapsed = started.elapsed();

        let record = &records[found.slot as usize];
        let result = Nearest {
            label: record.label.clone(),
            coord: record.coord,
            distance_sq: found.distance_sq,
            elapsed,
            visited: found.visited,
        };
        drop(state);

        log::trace!(
            "Query {} visited {} nodes in {:?}",
            target,
            result.visited,
            result.elapsed
        );

        Ok(result)
    }

    /// Points in the current generation.
    pub fn len(&self) -> usize {
        self.state.get().map_or(0, |lock| lock.read().store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current generation number, 0 before the first rebuild.
    pub fn generation(&self) -> u64 {
        self.state.get().map_or(0, |lock| lock.read().number)
    }

    /// Copy out stored records `from..=to`, clamped to the populated range.
    /// Slot order reflects the tree layout, not the rebuild input order.
    pub fn dump(&self, from: usize, to: usize) -> Vec<RecordSnapshot> {
        let Some(lock) = self.state.get() else {
            return Vec::new();
        };
        let snapshot = lock.read().store.snapshot(from, to);

        for record in &snapshot {
            log::debug!(
                "node {} -> {} {:?}",
                record.slot,
                record.coord,
                String::from_utf8_lossy(&record.label)
            );
        }

        snapshot
    }

    pub fn stats(&self) -> IndexStats {
        let (count, generation) = self.state.get().map_or((0, 0), |lock| {
            let state = lock.read();
            (state.store.len(), state.number)
        });

        IndexStats {
            count,
            capacity: self.config.capacity,
            generation,
            rebuilds: self.rebuilds.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            truncated_rebuilds: self.truncated_rebuilds.load(Ordering::Relaxed),
        }
    }
}

impl Default for GeoIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeoIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoIndex")
            .field("config", &self.config)
            .field("len", &self.len())
            .field("generation", &self.generation())
            .finish()
    }
}
