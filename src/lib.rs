//! In-memory 2D nearest-neighbor index over labeled geographic points.
//!
//! ## Features
//! - **Median-split k-d tree**: built in place over a fixed-capacity store by quickselect
//! - **Pruned nearest-neighbor search**: squared-distance bound on split planes
//! - **Wholesale rebuilds**: every update replaces the whole point set
//! - **Concurrent reads**: queries share a read lock, rebuilds take it exclusively
//!
//! Coordinates are fixed-point integers ([`Coord`]), scaled from degrees by
//! [`UNITS_PER_DEGREE`]. Distances are flat squared-Euclidean and are not
//! correct across the ±180° longitude seam.
//!
//! ```rust
//! use geokd::{Coord, GeoIndex};
//!
//! let index = GeoIndex::new();
//! index.rebuild(vec![
//!     (Coord::new(2, 3), "aa"),
//!     (Coord::new(5, 4), "aa1"),
//!     (Coord::new(-8, 1), "aa4"),
//! ]);
//!
//! let found = index.query(Coord::new(-9, 2))?;
//! assert_eq!(found.label.as_ref(), b"aa4");
//! assert_eq!(found.distance_sq, 2);
//! # Ok::<(), geokd::GeoKdError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod record;
pub mod shared;
pub mod stats;
pub mod store;

pub use builder::IndexBuilder;
pub use config::{IndexConfig, MAX_CAPACITY};
pub use error::{GeoKdError, Result};
pub use index::{GeoIndex, Nearest, RebuildSummary};
pub use record::{Coord, PointRecord, UNITS_PER_DEGREE};
pub use stats::IndexStats;
pub use store::RecordSnapshot;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Coord, GeoIndex, GeoKdError, IndexBuilder, IndexConfig, Nearest, Result};

    pub use bytes::Bytes;
}
