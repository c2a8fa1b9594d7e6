//! Request-handling configuration.

use serde::{Deserialize, Serialize};

/// Largest number of distinct symbols accepted in one request.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 999;

/// Settings applied to every mapping request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Maximum number of normalized symbols per request.
    pub max_batch_size: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl MapperConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch size cap.
    #[must_use]
    pub const fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}
