//! Data loading error types
//!
//! Every variant is fatal at startup: the server never reaches the ready
//! state with a partially loaded table.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the prediction table
#[derive(Error, Debug)]
pub enum DataError {
    /// Input file does not exist
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    /// File exists but could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (unbalanced quotes, bad UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(csv::Error),

    /// A required header is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A row could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    /// File parsed but contained no data rows
    #[error("No rows found in {0}")]
    Empty(String),
}

impl DataError {
    /// True for the error kinds caused by the file's content rather than its absence
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DataError::Csv(_) | DataError::MissingColumn(_) | DataError::Parse { .. }
        )
    }
}

// The csv reader reports read failures as its own error kind; keep them apart
// from malformed content
impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return DataError::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => DataError::Io(io),
            kind => DataError::Io(std::io::Error::other(format!("{:?}", kind))),
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::MissingColumn("Next_Close".to_string());
        assert_eq!(err.to_string(), "Missing required column: Next_Close");

        let err = DataError::Parse {
            line: 4,
            message: "invalid date 'yesterday'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error on line 4: invalid date 'yesterday'"
        );
    }

    #[test]
    fn test_parse_error_kinds() {
        assert!(DataError::MissingColumn("Date".to_string()).is_parse_error());
        assert!(!DataError::FileNotFound(PathBuf::from("x.csv")).is_parse_error());
        assert!(!DataError::Empty("x.csv".to_string()).is_parse_error());
    }

    #[test]
    fn test_csv_io_failure_is_not_parse_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DataError::from(csv::Error::from(io));

        assert!(
            matches!(err, DataError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied)
        );
        assert!(!err.is_parse_error());
    }
}
