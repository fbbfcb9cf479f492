use std::time::Duration;

use crate::validation::ValidationRules;

/// Configuration for [`Statusline`](crate::Statusline).
#[derive(Debug, Clone)]
pub struct StatuslineConfig {
    /// Constraints applied to new statuses
    pub validation: ValidationRules,
    /// Max cached single-status lookups (default: 10,000)
    pub status_cache_capacity: u64,
    /// Max cached favorites lists (default: 10,000)
    pub favorites_cache_capacity: u64,
    /// Time-to-live of any cached entry (default: 10 minutes)
    pub cache_ttl: Duration,
}

impl Default for StatuslineConfig {
    fn default() -> Self {
        Self {
            validation: ValidationRules::default(),
            status_cache_capacity: 10_000,
            favorites_cache_capacity: 10_000,
            cache_ttl: Duration::from_secs(600),
        }
    }
}

impl StatuslineConfig {
    /// Create config for testing (tiny caches).
    pub fn for_testing() -> Self {
        Self {
            status_cache_capacity: 64,
            favorites_cache_capacity: 64,
            ..Self::default()
        }
    }
}
