//! Bus configuration.

use serde::{Deserialize, Serialize};

/// Default retention bound for the notification store.
pub const DEFAULT_CAPACITY: usize = 50;

/// Configuration for a [`NotificationBus`](crate::bus::NotificationBus).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Maximum number of retained records. Insertion beyond this bound
    /// evicts the oldest record. A configured value of 0 is clamped to 1
    /// at store construction.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
