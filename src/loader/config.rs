//! Configuration for book loading.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};

/// Configuration for the shard fan-out of a book load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of shard tasks in flight for one book.
    pub max_concurrent_shards: usize,

    /// Per-shard fetch timeout in milliseconds. `None` waits indefinitely.
    pub shard_timeout_ms: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_shards: num_cpus::get() * 2,
            shard_timeout_ms: None,
        }
    }
}

impl LoaderConfig {
    /// Set the shard concurrency limit.
    pub fn with_max_concurrent_shards(mut self, max: usize) -> Self {
        self.max_concurrent_shards = max;
        self
    }

    /// Set the per-shard timeout.
    pub fn with_shard_timeout(mut self, timeout: Duration) -> Self {
        self.shard_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn shard_timeout(&self) -> Option<Duration> {
        self.shard_timeout_ms.map(Duration::from_millis)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_shards == 0 {
            return Err(HelpdexError::invalid_config(
                "max_concurrent_shards must be greater than 0",
            ));
        }

        if self.shard_timeout_ms == Some(0) {
            return Err(HelpdexError::invalid_config(
                "shard_timeout_ms must be greater than 0 when set",
            ));
        }

        Ok(())
    }
}
