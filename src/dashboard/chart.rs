//! Chart Builder
//!
//! Turns a symbol selection into a chart description. The description
//! serializes to a Plotly figure (`{"data": [...], "layout": {...}}`) so the
//! page can hand it to `Plotly.react` unchanged.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::{PricePoint, PriceTable};

/// Name of the observed-price line
pub const ACTUAL_SERIES: &str = "Actual";
/// Name of the predicted-price line
pub const PREDICTED_SERIES: &str = "Predicted";

/// One line on the chart: parallel x (date) and y (price) sequences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    /// Missing prices serialize as `null` and render as gaps
    pub y: Vec<Option<f64>>,
}

impl Series {
    fn line(name: &str, x: Vec<NaiveDate>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: name.to_string(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// Title plus the series to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub data: Vec<Series>,
    pub layout: Layout,
}

impl ChartDescription {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Look up a series by name
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.data.iter().find(|s| s.name == name)
    }
}

/// Chart title for a selection
pub fn chart_title(symbol: &str) -> String {
    format!("Predictions for {}", symbol)
}

/// Build the chart for `symbol`
///
/// Pure function of its inputs. Rows are ordered by date (ties keep file
/// order). An unknown symbol yields both series empty.
pub fn build_chart(table: &PriceTable, symbol: &str) -> ChartDescription {
    let mut rows: Vec<&PricePoint> = table.rows_for(symbol).collect();
    rows.sort_by_key(|row| row.date);

    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
    let actual = rows.iter().map(|row| row.actual_next_close).collect();
    let predicted = rows.iter().map(|row| row.predicted_next_close).collect();

    ChartDescription {
        data: vec![
            Series::line(ACTUAL_SERIES, dates.clone(), actual),
            Series::line(PREDICTED_SERIES, dates, predicted),
        ],
        layout: Layout {
            title: Title {
                text: chart_title(symbol),
            },
            xaxis: Axis {
                title: Title {
                    text: "Date".to_string(),
                },
            },
            yaxis: Axis {
                title: Title {
                    text: "Next close".to_string(),
                },
            },
        },
    }
}
