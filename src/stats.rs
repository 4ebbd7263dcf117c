//! Statistics collection for tree searches
//!
//! Both search agents fill one of these per decision and log the summary
//! at debug level.

use std::time::Duration;

/// Statistics collected during a single search decision
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of rounds performed
    pub rounds: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            rounds: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
        }
    }

    /// Returns the number of rounds per second
    pub fn rounds_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.rounds as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "rounds: {}, tree size: {} nodes, max depth: {}, time: {:.3}s ({:.0} rounds/s)",
            self.rounds,
            self.tree_size,
            self.max_depth,
            self.total_time.as_secs_f64(),
            self.rounds_per_second(),
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
