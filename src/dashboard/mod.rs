//! Dashboard
//!
//! The page and the selection → chart mapping behind it.
//!
//! - **chart**: pure `build_chart(table, symbol)` producing the figure
//! - **page**: HTML for the dashboard with dropdown and chart container

pub mod chart;
pub mod page;

pub use chart::{
    build_chart, chart_title, ChartDescription, Series, ACTUAL_SERIES, PREDICTED_SERIES,
};
pub use page::{escape_html, render_page};
