//! Core data types for the prediction table
//!
//! - `PricePoint`: one row of the prediction file
//! - `PriceTable`: the immutable, load-once table of rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single prediction row
///
/// Prices are optional: a blank cell in the source file is a missing
/// observation and renders as a gap in the chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    /// Ticker symbol, never empty
    pub symbol: String,
    /// Trading date
    pub date: NaiveDate,
    /// Observed next-day close
    pub actual_next_close: Option<f64>,
    /// Model prediction for the next-day close
    pub predicted_next_close: Option<f64>,
}

impl PricePoint {
    /// Create a row with both prices present
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        actual_next_close: f64,
        predicted_next_close: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            actual_next_close: Some(actual_next_close),
            predicted_next_close: Some(predicted_next_close),
        }
    }
}

/// Immutable in-memory prediction table
///
/// Built once at startup and shared read-only between all requests.
/// Always holds at least one row, so the symbol list is never empty.
#[derive(Debug, Clone)]
pub struct PriceTable {
    rows: Vec<PricePoint>,
    /// Distinct symbols in first-seen order
    symbols: Vec<String>,
}

impl PriceTable {
    /// Build a table from rows in file order
    ///
    /// Returns `None` when `rows` is empty.
    pub fn new(rows: Vec<PricePoint>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let symbols = {
            let mut seen = HashSet::new();
            rows.iter()
                .filter(|row| seen.insert(row.symbol.as_str()))
                .map(|row| row.symbol.clone())
                .collect()
        };

        Some(Self { rows, symbols })
    }

    /// All rows in file order
    pub fn rows(&self) -> &[PricePoint] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symbols in first-seen order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Initial selector value: the first distinct symbol
    pub fn default_symbol(&self) -> &str {
        // Non-empty by construction
        &self.symbols[0]
    }

    /// Case-sensitive membership check
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Rows whose symbol equals `symbol` exactly, in file order
    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a PricePoint> + 'a {
        self.rows.iter().filter(move |row| row.symbol == symbol)
    }

    /// Earliest and latest date in the table
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let first = self.rows[0].date;
        self.rows
            .iter()
            .fold((first, first), |(lo, hi), row| (lo.min(row.date), hi.max(row.date)))
    }
}
