//! Property-based tests for error propagation in the loader.
//!
//! For any malformed input file, the loader returns an error or skips the
//! offending rows rather than panicking.

use proptest::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

use storefront_analytics::data_loader::TransactionLoader;
use storefront_analytics::error::AnalyticsError;

/// A valid CSV header
fn valid_header() -> &'static str {
    concat!(
        "order_id,customer_id,customer_city,",
        "product_category_name_english,order_purchase_timestamp,price"
    )
}

/// CSV without the customer_city column
fn generate_missing_column_csv(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("missing_col.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(
        file,
        "order_id,customer_id,product_category_name_english,order_purchase_timestamp,price"
    )
    .unwrap();
    writeln!(file, "{}", content).unwrap();
    path
}

/// CSV whose single row carries a bad purchase timestamp
fn generate_bad_timestamp_csv(dir: &TempDir, bad_value: &str) -> PathBuf {
    let path = dir.path().join("bad_timestamp.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{}", valid_header()).unwrap();
    writeln!(file, "o1,c1,x,toys,{},10.0", bad_value).unwrap();
    writeln!(file, "o2,c2,y,toys,2017-10-02 10:56:33,20.0").unwrap();
    path
}

/// CSV whose single row carries a bad price
fn generate_bad_price_csv(dir: &TempDir, bad_value: &str) -> PathBuf {
    let path = dir.path().join("bad_price.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{}", valid_header()).unwrap();
    writeln!(file, "o1,c1,x,toys,2017-10-02 10:56:33,{}", bad_value).unwrap();
    path
}

/// An empty CSV file
fn generate_empty_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("empty.csv");
    fs::File::create(&path).unwrap();
    path
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// Missing column CSV returns MissingColumn, not a panic
    #[test]
    fn missing_column_returns_error_not_panic(
        row_data in "o[0-9]{1,4},c[0-9]{1,4},toys,2017-10-0[1-9] 10:00:00,[0-9]{1,4}\\.[0-9]{2}"
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = generate_missing_column_csv(&temp_dir, &row_data);

        let result = TransactionLoader::new().load_from_file(&path);

        prop_assert!(
            matches!(
                result,
                Err(AnalyticsError::MissingColumn { ref column }) if column == "customer_city"
            ),
            "Expected MissingColumn error, got {:?}", result
        );
    }

    /// Unparseable timestamps skip the row and keep the rest
    #[test]
    fn bad_timestamp_skips_row(bad_value in "[a-z]{1,10}") {
        let temp_dir = TempDir::new().unwrap();
        let path = generate_bad_timestamp_csv(&temp_dir, &bad_value);

        let result = TransactionLoader::new().load_from_file(&path).unwrap();

        prop_assert_eq!(result.report.total_rows, 2);
        prop_assert_eq!(result.report.skipped_rows, 1);
        prop_assert_eq!(result.table.len(), 1);
        prop_assert_eq!(result.table.rows()[0].order_id.as_str(), "o2");
    }

    /// Unparseable prices keep the row with no price
    #[test]
    fn bad_price_keeps_row_without_price(bad_value in "[a-z]{1,10}") {
        let temp_dir = TempDir::new().unwrap();
        let path = generate_bad_price_csv(&temp_dir, &bad_value);

        let result = TransactionLoader::new().load_from_file(&path).unwrap();

        prop_assert_eq!(result.report.valid_rows, 1);
        prop_assert_eq!(result.report.missing_price_rows, 1);
        prop_assert_eq!(result.table.rows()[0].price, None);
    }
}

#[test]
fn empty_file_returns_error_not_panic() {
    let temp_dir = TempDir::new().unwrap();
    let path = generate_empty_csv(&temp_dir);

    let result = TransactionLoader::new().load_from_file(&path);
    assert!(result.is_err(), "Expected error for empty file, got {:?}", result);
}

#[test]
fn header_only_file_loads_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("header_only.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{}", valid_header()).unwrap();
    drop(file);

    // Polars may reject a header-only file; either way, no panic
    match TransactionLoader::new().load_from_file(&path) {
        Ok(result) => {
            assert!(result.table.is_empty());
            assert_eq!(result.report.first_timestamp, None);
        }
        Err(_) => {}
    }
}

#[test]
fn nonexistent_file_returns_file_not_found() {
    let result = TransactionLoader::new().load_from_file("/nonexistent/path/orders.csv");
    assert!(matches!(result, Err(AnalyticsError::FileNotFound { .. })));
}

#[test]
fn csv_file_loads_sorted_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orders.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{}", valid_header()).unwrap();
    writeln!(file, "o2,c2,rio de janeiro,books,2017-10-03 08:00:00,20.50").unwrap();
    writeln!(file, "o1,c1,sao paulo,toys,2017-10-01 10:56:33,10.00").unwrap();
    writeln!(file, "o1,c1,sao paulo,,2017-10-01 10:56:33,4.25").unwrap();
    drop(file);

    let result = TransactionLoader::new().load_from_file(&path).unwrap();
    assert_eq!(result.report.total_rows, 3);
    assert_eq!(result.report.valid_rows, 3);

    let rows = result.table.rows();
    assert_eq!(rows[0].order_id, "o1");
    assert_eq!(rows[2].order_id, "o2");
    assert_eq!(rows[1].product_category_name, None);
    assert_eq!(rows[2].price, Some(rust_decimal_macros::dec!(20.5)));
}
