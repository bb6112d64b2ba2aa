//! Error Handling Module
//!
//! Provides structured error types for the analytics pipeline.
//! Uses `thiserror` for ergonomic error definitions.
//!
//! # Design Principles
//! 1. All errors are typed and descriptive
//! 2. Filtering errors fail fast; aggregation never errors
//! 3. Per-row absences are handled where the row is consumed, not here
//! 4. No panics in library code - use Result<T, AnalyticsError>

use chrono::NaiveDateTime;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Main error type for the analytics crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    // Window Errors
    #[error("Invalid date window: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid timestamp '{value}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { value: String },

    // Data Loading Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Failed to read file: {0}")]
    ReadError(String),

    // Configuration Errors
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // IO Errors
    #[error("IO error: {0}")]
    IoError(String),

    // Polars Errors (wrapped)
    #[error("Polars error: {0}")]
    PolarsError(String),
}

impl AnalyticsError {
    /// True for errors the caller can fix by choosing another window.
    pub fn is_window_error(&self) -> bool {
        matches!(
            self,
            AnalyticsError::InvalidRange { .. } | AnalyticsError::InvalidTimestamp { .. }
        )
    }
}

/// Create a Result type alias for convenience.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

// ============================================================================
// Error Conversion Implementations
// ============================================================================

impl From<std::io::Error> for AnalyticsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AnalyticsError::FileNotFound {
                path: "unknown".to_string(),
            }
        } else {
            AnalyticsError::IoError(err.to_string())
        }
    }
}

impl From<polars::error::PolarsError> for AnalyticsError {
    fn from(err: polars::error::PolarsError) -> Self {
        AnalyticsError::PolarsError(err.to_string())
    }
}

impl From<toml::de::Error> for AnalyticsError {
    fn from(err: toml::de::Error) -> Self {
        AnalyticsError::ConfigError(err.to_string())
    }
}

// ============================================================================
// Error Construction Helpers
// ============================================================================

impl AnalyticsError {
    /// Create an invalid range error.
    pub fn invalid_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        AnalyticsError::InvalidRange { start, end }
    }

    /// Create an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        AnalyticsError::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AnalyticsError::FileNotFound { path: path.into() }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        AnalyticsError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        AnalyticsError::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AnalyticsError::ConfigError(message.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::invalid_range(ts(3), ts(1));
        assert_eq!(
            err.to_string(),
            "Invalid date window: start 2023-01-03 00:00:00 is after end 2023-01-01 00:00:00"
        );

        let err = AnalyticsError::missing_column("price");
        assert_eq!(err.to_string(), "Missing required column: price");

        let err = AnalyticsError::file_not_found("data/orders.csv");
        assert_eq!(err.to_string(), "File not found: data/orders.csv");
    }

    #[test]
    fn test_window_errors_are_flagged() {
        assert!(AnalyticsError::invalid_range(ts(2), ts(1)).is_window_error());
        assert!(AnalyticsError::invalid_timestamp("yesterday").is_window_error());
        assert!(!AnalyticsError::missing_column("order_id").is_window_error());
        assert!(!AnalyticsError::config("bad").is_window_error());
    }

    #[test]
    fn test_from_io_error_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AnalyticsError = io_err.into();

        match err {
            AnalyticsError::FileNotFound { .. } => {}
            _ => panic!("Expected FileNotFound error"),
        }
    }

    #[test]
    fn test_from_io_error_other() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: AnalyticsError = io_err.into();

        match err {
            AnalyticsError::IoError(msg) => {
                assert!(msg.contains("access denied"));
            }
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Table>("top_n = [").unwrap_err();
        let err: AnalyticsError = toml_err.into();
        assert!(matches!(err, AnalyticsError::ConfigError(_)));
    }
}
