//! Configuration management and validation.
//!
//! Provides [`ReaderConfig`], the tuning knobs for the streaming engine:
//! how many rows may be buffered between producer and consumer, how large
//! the read buffer around each source is, and what the worker is called.

use crate::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_READ_BUFFER_SIZE, DEFAULT_WORKER_NAME};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::debug;

/// Streaming engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum number of rows buffered ahead of the consumer
    pub channel_capacity: usize,

    /// Capacity in bytes of the buffered reader wrapped around the source
    pub read_buffer_size: usize,

    /// Thread name for the producer worker
    pub worker_name: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            worker_name: DEFAULT_WORKER_NAME.to_string(),
        }
    }
}

impl ReaderConfig {
    /// Set the handoff buffer capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the read buffer size
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Set the producer thread name
    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Check that the configuration can drive a reader
    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(Error::configuration("channel_capacity must be at least 1"));
        }
        if self.channel_capacity > Semaphore::MAX_PERMITS {
            return Err(Error::configuration(format!(
                "channel_capacity must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::configuration("read_buffer_size must be at least 1"));
        }
        if self.worker_name.contains('\0') {
            return Err(Error::configuration(
                "worker_name must not contain NUL bytes",
            ));
        }

        debug!(
            "Reader config validated: capacity={}, read_buffer={}",
            self.channel_capacity, self.read_buffer_size
        );
        Ok(())
    }
}
