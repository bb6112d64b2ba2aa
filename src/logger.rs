//! Structured logging module for storefront analytics.
//!
//! Provides a named logger with levels and per-run correlation IDs.
//! Events are emitted through `tracing`; the binary installs the subscriber.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;

/// Log levels matching common logging conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a level name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Matching `tracing` level.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Global correlation ID counter.
static CORRELATION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Structured logger with correlation ID support.
#[derive(Debug, Clone)]
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Current correlation ID for tracing related events
    correlation_id: u64,
    /// Logger name/context
    name: String,
}

impl Logger {
    /// Create a new logger with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            min_level: LogLevel::Info,
            correlation_id: 0,
            name: name.to_string(),
        }
    }

    /// Set the minimum log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Generate a new correlation ID.
    pub fn new_correlation_id() -> u64 {
        CORRELATION_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    /// Set a new correlation ID and return it.
    pub fn start_correlation(&mut self) -> u64 {
        self.correlation_id = Self::new_correlation_id();
        self.correlation_id
    }

    /// Get the current correlation ID.
    pub fn correlation_id(&self) -> u64 {
        self.correlation_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether a message at `level` passes this logger's threshold.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Log a message at the given level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let name = self.name.as_str();
        let cid = self.correlation_id;
        match level {
            LogLevel::Trace => tracing::trace!(logger = name, cid, "{}", message),
            LogLevel::Debug => tracing::debug!(logger = name, cid, "{}", message),
            LogLevel::Info => tracing::info!(logger = name, cid, "{}", message),
            LogLevel::Warn => tracing::warn!(logger = name, cid, "{}", message),
            LogLevel::Error => tracing::error!(logger = name, cid, "{}", message),
        }
    }

    /// Log at TRACE level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Log at DEBUG level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log at INFO level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log at WARN level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Log at ERROR level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    // Structured logging methods for specific events

    /// Log a data loading event.
    pub fn log_data_loaded(
        &self,
        total_rows: usize,
        valid_rows: usize,
        missing_price_rows: usize,
    ) {
        self.info(&format!(
            "DATA_LOADED: total={}, valid={}, skipped={}, missing_price={}",
            total_rows,
            valid_rows,
            total_rows.saturating_sub(valid_rows),
            missing_price_rows
        ));
        if valid_rows < total_rows {
            self.warn(&format!(
                "DATA_ROWS_SKIPPED: count={}",
                total_rows - valid_rows
            ));
        }
    }

    /// Log a window being applied to the table.
    pub fn log_window_applied(&self, start: NaiveDateTime, end: NaiveDateTime, rows: usize) {
        self.info(&format!(
            "WINDOW_APPLIED: start={}, end={}, rows={}",
            start, end, rows
        ));
    }

    /// Log a rejected window.
    pub fn log_invalid_window(&self, start: NaiveDateTime, end: NaiveDateTime) {
        self.warn(&format!("WINDOW_REJECTED: start={} is after end={}", start, end));
    }

    /// Log a window that selected no rows.
    pub fn log_empty_window(&self, start: NaiveDateTime, end: NaiveDateTime) {
        self.debug(&format!("WINDOW_EMPTY: start={}, end={}", start, end));
    }

    /// Log the sizes of the four summaries.
    pub fn log_summaries_built(
        &self,
        days: usize,
        categories: usize,
        cities: usize,
        customers: usize,
    ) {
        self.info(&format!(
            "SUMMARIES_BUILT: days={}, categories={}, cities={}, customers={}",
            days, categories, cities, customers
        ));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("storefront-analytics")
    }
}
