//! # Stockcast
//!
//! Stock price prediction dashboard: loads a CSV of actual vs. predicted
//! next-day closes and serves a single page with a symbol dropdown and a
//! live chart.
//!
//! ## Modules
//!
//! - [`data`]: CSV loader and the immutable prediction table
//! - [`dashboard`]: chart builder and page rendering
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: reactive selection → chart channel
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use stockcast::dashboard::build_chart;
//! use stockcast::data::PriceLoader;
//!
//! let table = PriceLoader::new()
//!     .load_str("symbol,Date,Next_Close,prediction\nAAPL,2024-01-02,100.0,101.5")
//!     .unwrap();
//!
//! let chart = build_chart(&table, table.default_symbol());
//! assert_eq!(chart.title(), "Predictions for AAPL");
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod websocket;

// Re-export top-level types for convenience
pub use data::{ColumnMapping, DataError, DataResult, PriceLoader, PricePoint, PriceTable};

pub use dashboard::{build_chart, render_page, ChartDescription, Series};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{
    generate_default_config, Config, ConfigError, ConfigLoad, DataConfig, LoggingConfig,
    ServerConfig,
};
