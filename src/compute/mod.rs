//! Tree construction and search algorithms over the point store.

pub mod partition;
pub mod search;
pub mod tree;

pub use partition::find_median;
pub use search::{Neighbor, nearest};
pub use tree::build;
