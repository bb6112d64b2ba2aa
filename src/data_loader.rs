//! Transaction loading module using Polars.
//!
//! Reads the order-item log from CSV or Parquet, validates the required
//! columns, parses timestamps and prices, and builds a sorted
//! `TransactionTable` together with a load quality report.

use std::path::Path;

use chrono::NaiveDateTime;
use polars::prelude::*;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::precision::parse_money;
use crate::table::TransactionTable;
use crate::types::Transaction;
use crate::window::parse_timestamp;

pub const ORDER_ID: &str = "order_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const CUSTOMER_CITY: &str = "customer_city";
pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const PRICE: &str = "price";

/// Category columns in order of preference.
pub const CATEGORY_COLUMNS: [&str; 2] =
    ["product_category_name_english", "product_category_name"];

const REQUIRED_COLUMNS: [&str; 5] = [
    ORDER_ID,
    CUSTOMER_ID,
    CUSTOMER_CITY,
    PURCHASE_TIMESTAMP,
    PRICE,
];

/// Data quality figures for one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Rows present in the source
    pub total_rows: usize,
    /// Rows kept in the table
    pub valid_rows: usize,
    /// Rows dropped for a missing order id or purchase timestamp
    pub skipped_rows: usize,
    /// Kept rows whose price was missing or unreadable
    pub missing_price_rows: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

/// Result of a load.
#[derive(Debug)]
pub struct LoadResult {
    pub table: TransactionTable,
    pub report: LoadReport,
}

/// Loader for the transaction log.
#[derive(Debug, Default)]
pub struct TransactionLoader {
    /// Overrides the category column lookup when set
    category_column: Option<String>,
}

impl TransactionLoader {
    /// Create a new TransactionLoader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read categories from `column` instead of the default candidates.
    pub fn with_category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    /// Load data from a file (CSV or Parquet).
    ///
    /// # Arguments
    /// * `path` - Path to the data file
    ///
    /// # Returns
    /// * `Ok(LoadResult)` - Sorted table with quality report
    /// * `Err(AnalyticsError)` - If the file cannot be read or lacks a column
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> AnalyticsResult<LoadResult> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AnalyticsError::file_not_found(path.display().to_string()));
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let df = match extension.to_lowercase().as_str() {
            "csv" => self.load_csv(path)?,
            "parquet" => self.load_parquet(path)?,
            _ => return Err(AnalyticsError::unsupported_format(extension)),
        };

        self.from_dataframe(df)
    }

    /// Load CSV file using Polars.
    fn load_csv(&self, path: &Path) -> AnalyticsResult<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| AnalyticsError::ReadError(e.to_string()))?
            .finish()
            .map_err(AnalyticsError::from)
    }

    /// Load Parquet file using Polars.
    fn load_parquet(&self, path: &Path) -> AnalyticsResult<DataFrame> {
        let file =
            std::fs::File::open(path).map_err(|e| AnalyticsError::ReadError(e.to_string()))?;

        ParquetReader::new(file).finish().map_err(AnalyticsError::from)
    }

    /// Build a table from an in-memory frame.
    pub fn from_dataframe(&self, df: DataFrame) -> AnalyticsResult<LoadResult> {
        let category_column = self.resolve_category_column(&df)?;
        for column in REQUIRED_COLUMNS {
            if df.column(column).is_err() {
                return Err(AnalyticsError::missing_column(column));
            }
        }

        // Project to the needed columns as text; parsing happens row by row
        let text = df
            .lazy()
            .select([
                col(ORDER_ID).cast(DataType::String),
                col(CUSTOMER_ID).cast(DataType::String),
                col(CUSTOMER_CITY).cast(DataType::String),
                col(category_column.as_str())
                    .cast(DataType::String)
                    .alias("category"),
                col(PURCHASE_TIMESTAMP).cast(DataType::String),
                col(PRICE).cast(DataType::String),
            ])
            .collect()?;

        let order_ids = extract_text_column(&text, ORDER_ID)?;
        let customer_ids = extract_text_column(&text, CUSTOMER_ID)?;
        let cities = extract_text_column(&text, CUSTOMER_CITY)?;
        let categories = extract_text_column(&text, "category")?;
        let timestamps = extract_text_column(&text, PURCHASE_TIMESTAMP)?;
        let prices = extract_text_column(&text, PRICE)?;

        let total_rows = order_ids.len();
        let mut rows = Vec::with_capacity(total_rows);
        let mut missing_price_rows = 0usize;

        for i in 0..total_rows {
            let Some(order_id) = order_ids[i].clone() else {
                continue;
            };
            let Some(purchased_at) = timestamps[i].as_deref().and_then(parse_timestamp) else {
                continue;
            };

            let price = prices[i].as_deref().and_then(parse_money);
            if price.is_none() {
                missing_price_rows += 1;
            }

            rows.push(Transaction {
                order_id,
                customer_id: customer_ids[i].clone(),
                customer_city: cities[i].clone(),
                product_category_name: categories[i].clone(),
                order_purchase_timestamp: purchased_at,
                price,
            });
        }

        let table = TransactionTable::new(rows);
        let report = LoadReport {
            total_rows,
            valid_rows: table.len(),
            skipped_rows: total_rows - table.len(),
            missing_price_rows,
            first_timestamp: table.min_timestamp(),
            last_timestamp: table.max_timestamp(),
        };

        Ok(LoadResult { table, report })
    }

    /// Pick the category column to read.
    fn resolve_category_column(&self, df: &DataFrame) -> AnalyticsResult<String> {
        if let Some(column) = &self.category_column {
            return match df.column(column) {
                Ok(_) => Ok(column.clone()),
                Err(_) => Err(AnalyticsError::missing_column(column.as_str())),
            };
        }
        CATEGORY_COLUMNS
            .iter()
            .find(|name| df.column(name).is_ok())
            .map(|name| name.to_string())
            .ok_or_else(|| AnalyticsError::missing_column(CATEGORY_COLUMNS[1]))
    }
}

/// Extract a string column, treating blank cells as missing.
fn extract_text_column(df: &DataFrame, name: &str) -> AnalyticsResult<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| AnalyticsError::missing_column(name))?;

    let chunked = column.str()?;

    Ok(chunked
        .into_iter()
        .map(|opt| {
            opt.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect())
}
