//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.
//! Chart responses reuse [`crate::dashboard::ChartDescription`] directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// DASHBOARD DTOs
// ============================================

/// Selector options
#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    /// Distinct symbols in first-seen order
    pub symbols: Vec<String>,
    /// Initial selection
    pub default: String,
}

/// Query string for the chart endpoint
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Symbol to chart; the default symbol when absent
    #[serde(default)]
    pub symbol: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Rows in the loaded table
    pub rows: usize,
    /// Distinct symbols in the loaded table
    pub symbols: usize,
    /// Earliest date in the table
    pub first_date: NaiveDate,
    /// Latest date in the table
    pub last_date: NaiveDate,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
