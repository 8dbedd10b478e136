//! Stockcast Data Layer
//!
//! Loads the prediction CSV once at startup into an immutable in-memory table.
//!
//! - **types**: Core data structures (PricePoint, PriceTable)
//! - **loader**: CSV reader with configurable column mapping
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use stockcast::data::PriceLoader;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = PriceLoader::new().load(Path::new("predicted_stock_prices.csv"))?;
//!
//!     println!("{} rows across {} symbols", table.len(), table.symbols().len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DataError, DataResult};
pub use loader::{ColumnMapping, PriceLoader};
pub use types::{PricePoint, PriceTable};
