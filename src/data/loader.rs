//! CSV Loader
//!
//! Reads the prediction export into a [`PriceTable`].
//! Column names and the delimiter are configurable; any additional columns
//! in the file are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::error::{DataError, DataResult};
use super::types::{PricePoint, PriceTable};

/// Header names of the required columns
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_symbol_column")]
    pub symbol: String,

    #[serde(default = "default_date_column")]
    pub date: String,

    #[serde(default = "default_actual_column")]
    pub actual: String,

    #[serde(default = "default_predicted_column")]
    pub predicted: String,
}

fn default_symbol_column() -> String {
    "symbol".to_string()
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_actual_column() -> String {
    "Next_Close".to_string()
}

fn default_predicted_column() -> String {
    "prediction".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            symbol: default_symbol_column(),
            date: default_date_column(),
            actual: default_actual_column(),
            predicted: default_predicted_column(),
        }
    }
}

/// Resolved header positions for one file
struct ColumnIndex {
    symbol: usize,
    date: usize,
    actual: usize,
    predicted: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMapping) -> DataResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            symbol: find(&columns.symbol)?,
            date: find(&columns.date)?,
            actual: find(&columns.actual)?,
            predicted: find(&columns.predicted)?,
        })
    }
}

/// Prediction CSV loader
#[derive(Debug, Clone)]
pub struct PriceLoader {
    columns: ColumnMapping,
    delimiter: u8,
}

impl Default for PriceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceLoader {
    /// Create a loader for the default column layout
    pub fn new() -> Self {
        Self {
            columns: ColumnMapping::default(),
            delimiter: b',',
        }
    }

    /// Set the column mapping
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load the table from a file
    pub fn load(&self, path: &Path) -> DataResult<PriceTable> {
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }

        let reader = self.reader_builder().from_path(path)?;
        let table = self.read_table(reader, &path.display().to_string())?;

        let (first, last) = table.date_range();
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            symbols = table.symbols().len(),
            first_date = %first,
            last_date = %last,
            "Loaded prediction table"
        );

        Ok(table)
    }

    /// Load the table from an in-memory CSV string
    pub fn load_str(&self, csv_data: &str) -> DataResult<PriceTable> {
        let reader = self.reader_builder().from_reader(csv_data.as_bytes());
        self.read_table(reader, "<memory>")
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::Headers);
        builder
    }

    fn read_table<R: Read>(&self, mut reader: csv::Reader<R>, source: &str) -> DataResult<PriceTable> {
        let headers = reader.headers()?.clone();
        let index = ColumnIndex::resolve(&headers, &self.columns)?;

        let mut rows = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row_num as u64 + 2);

            rows.push(self.parse_record(&record, &index, line)?);
        }

        PriceTable::new(rows).ok_or_else(|| DataError::Empty(source.to_string()))
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        index: &ColumnIndex,
        line: u64,
    ) -> DataResult<PricePoint> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        // Symbols are kept verbatim; " AAPL" and "AAPL" are different entries
        let symbol = field(index.symbol);
        if symbol.trim().is_empty() {
            return Err(DataError::Parse {
                line,
                message: format!("empty {} value", self.columns.symbol),
            });
        }

        let date_str = field(index.date).trim();
        let date = parse_date(date_str).ok_or_else(|| DataError::Parse {
            line,
            message: format!("invalid {} value '{}'", self.columns.date, date_str),
        })?;

        let actual_next_close = parse_price(field(index.actual).trim()).map_err(|value| DataError::Parse {
            line,
            message: format!("invalid {} value '{}'", self.columns.actual, value),
        })?;

        let predicted_next_close =
            parse_price(field(index.predicted).trim()).map_err(|value| DataError::Parse {
                line,
                message: format!("invalid {} value '{}'", self.columns.predicted, value),
            })?;

        Ok(PricePoint {
            symbol: symbol.to_string(),
            date,
            actual_next_close,
            predicted_next_close,
        })
    }
}

/// Parse an ISO-style date or date-time, keeping the calendar date
fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a price cell; blank and NaN-like cells are missing values.
/// On failure the offending text is returned.
fn parse_price(s: &str) -> Result<Option<f64>, String> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    match s.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "symbol,Date,Close,Next_Close,prediction
AAPL,2024-01-02,99.0,100.0,101.5
AAPL,2024-01-03,100.0,101.5,102.0
MSFT,2024-01-02,298.0,300.0,299.0";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_str_sample() {
        let table = PriceLoader::new().load_str(SAMPLE).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.symbols(), &["AAPL".to_string(), "MSFT".to_string()]);

        let first = &table.rows()[0];
        assert_eq!(first.symbol, "AAPL");
        assert_eq!(first.date, date("2024-01-02"));
        assert_eq!(first.actual_next_close, Some(100.0));
        assert_eq!(first.predicted_next_close, Some(101.5));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = PriceLoader::new().load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.default_symbol(), "AAPL");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predicted_stock_prices.csv");

        let err = PriceLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, DataError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = PriceLoader::new().load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Io(_)), "got {:?}", err);
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_missing_column() {
        let csv_data = "symbol,Date,Next_Close
AAPL,2024-01-02,100.0";

        let err = PriceLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "prediction"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let csv_data = "symbol,Date,Next_Close,prediction
AAPL,2024-01-02,100.0,101.5
AAPL,not-a-date,101.5,102.0";

        let err = PriceLoader::new().load_str(csv_data).unwrap_err();
        match err {
            DataError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("not-a-date"));
            }
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_symbol_is_fatal() {
        let csv_data = "symbol,Date,Next_Close,prediction
,2024-01-02,100.0,101.5";

        let err = PriceLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_whitespace_symbol_is_fatal() {
        let csv_data = "symbol,Date,Next_Close,prediction
  ,2024-01-02,100.0,101.5";

        let err = PriceLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_symbols_kept_verbatim() {
        let csv_data = " symbol , Date ,Next_Close,prediction
AAPL,2024-01-02,100.0,101.5
 AAPL, 2024-01-03 , 101.5 ,102.0";

        let table = PriceLoader::new().load_str(csv_data).unwrap();
        assert_eq!(table.symbols(), &["AAPL".to_string(), " AAPL".to_string()]);
        assert_eq!(table.rows_for("AAPL").count(), 1);
        assert_eq!(table.rows()[1].date, date("2024-01-03"));
        assert_eq!(table.rows()[1].actual_next_close, Some(101.5));
    }

    #[test]
    fn test_invalid_price_is_fatal() {
        let csv_data = "symbol,Date,Next_Close,prediction
AAPL,2024-01-02,abc,101.5";

        let err = PriceLoader::new().load_str(csv_data).unwrap_err();
        assert!(err.to_string().contains("Next_Close"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = PriceLoader::new()
            .load_str("symbol,Date,Next_Close,prediction\n")
            .unwrap_err();
        assert!(matches!(err, DataError::Empty(_)));
    }

    #[test]
    fn test_blank_prices_are_missing() {
        let csv_data = "symbol,Date,Next_Close,prediction
AAPL,2024-01-02,,101.5
AAPL,2024-01-03,101.5,NaN";

        let table = PriceLoader::new().load_str(csv_data).unwrap();
        assert_eq!(table.rows()[0].actual_next_close, None);
        assert_eq!(table.rows()[0].predicted_next_close, Some(101.5));
        assert_eq!(table.rows()[1].predicted_next_close, None);
    }

    #[test]
    fn test_datetime_dates_keep_calendar_day() {
        let csv_data = "symbol,Date,Next_Close,prediction
AAPL,2024-01-02 00:00:00,100.0,101.5
AAPL,2024-01-03T00:00:00.000,101.5,102.0
AAPL,2024-01-04T16:00:00Z,102.0,102.5";

        let table = PriceLoader::new().load_str(csv_data).unwrap();
        let dates: Vec<_> = table.rows().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-02"), date("2024-01-03"), date("2024-01-04")]
        );
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let csv_data = "ticker;day;actual;predicted
TSLA;2024-02-01;190.5;188.0";

        let columns = ColumnMapping {
            symbol: "ticker".to_string(),
            date: "day".to_string(),
            actual: "actual".to_string(),
            predicted: "predicted".to_string(),
        };
        let table = PriceLoader::new()
            .with_columns(columns)
            .with_delimiter(b';')
            .load_str(csv_data)
            .unwrap();

        assert_eq!(table.default_symbol(), "TSLA");
        assert_eq!(table.rows()[0].actual_next_close, Some(190.5));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12.5"), Ok(Some(12.5)));
        assert_eq!(parse_price(""), Ok(None));
        assert_eq!(parse_price("null"), Ok(None));
        assert_eq!(parse_price("inf"), Err("inf".to_string()));
    }
}
