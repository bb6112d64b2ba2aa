//! Storefront Analytics Core
//!
//! Descriptive analytics over an e-commerce order transaction log.
//! Filters the log to a date window and derives four summary tables:
//! daily orders, category performance, city distribution and RFM
//! customer segmentation.

pub mod error;
pub mod types;
pub mod window;
pub mod table;
pub mod daily;
pub mod category;
pub mod city;
pub mod rfm;
pub mod precision;
pub mod logger;
pub mod pipeline;
pub mod views;
pub mod data_loader;

pub use error::{AnalyticsError, AnalyticsResult};
pub use types::*;
pub use window::{filter, DateWindow};
pub use table::TransactionTable;
pub use daily::daily_orders;
pub use category::category_performance;
pub use city::city_distribution;
pub use rfm::{rfm, DenseRank};
pub use logger::{LogLevel, Logger};
pub use pipeline::{AnalyticsPipeline, PipelineConfig, Summaries};
pub use views::DashboardReport;
pub use data_loader::{LoadReport, LoadResult, TransactionLoader};
