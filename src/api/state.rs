//! Application State
//!
//! Shared state accessible by all handlers.
//! The table is loaded before the state exists and never changes afterwards,
//! so handlers share it through `Arc` without locking.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::data::PriceTable;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable prediction table
    pub table: Arc<PriceTable>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(table: Arc<PriceTable>, config: ServerConfig) -> Self {
        Self {
            table,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
