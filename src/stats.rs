use serde::{Deserialize, Serialize};

/// Index statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Points in the current generation
    pub count: usize,
    /// Configured store capacity
    pub capacity: usize,
    /// Current generation number (0 before the first rebuild)
    pub generation: u64,
    /// Rebuilds completed
    pub rebuilds: u64,
    /// Queries answered, successful or not
    pub queries: u64,
    /// Rebuilds whose input was cut at capacity
    pub truncated_rebuilds: u64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of capacity in use.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.count as f64 / self.capacity as f64
    }
}
