//! Analytics pipeline: window filter plus the four summaries.
//!
//! `AnalyticsPipeline` is the session context. It owns the read-only
//! transaction table and the configuration; the window is passed to every
//! run, and every run recomputes all four summaries from scratch.

use std::path::Path;

use serde::Deserialize;

use crate::category::category_performance;
use crate::city::city_distribution;
use crate::daily::daily_orders;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::logger::{LogLevel, Logger};
use crate::rfm::rfm;
use crate::table::TransactionTable;
use crate::types::{CategoryPerformance, CityDistribution, DailyOrders, RfmRow};
use crate::views::DashboardReport;
use crate::window::DateWindow;

/// Configuration for the pipeline and its dashboard views
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Categories shown in the best and worst views
    pub top_n_categories: usize,
    /// Cities shown in the customer distribution view
    pub top_n_cities: usize,
    /// Customers shown in each RFM view
    pub top_n_customers: usize,
    /// Symbol placed before formatted amounts
    pub currency_symbol: String,
    /// Minimum level for pipeline log events
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n_categories: 5,
            top_n_cities: 10,
            top_n_customers: 5,
            currency_symbol: "R$".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> AnalyticsResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalyticsError::file_not_found(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if LogLevel::parse(&self.log_level).is_none() {
            return Err(AnalyticsError::config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Use the same limit for every top-N view.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n_categories = n;
        self.top_n_cities = n;
        self.top_n_customers = n;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parsed log level, `Info` when unrecognised.
    pub fn level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

/// The four summary tables computed for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Summaries {
    pub window: DateWindow,
    pub daily_orders: Vec<DailyOrders>,
    pub category_performance: Vec<CategoryPerformance>,
    pub city_distribution: Vec<CityDistribution>,
    pub rfm: Vec<RfmRow>,
}

impl Summaries {
    /// True when the window selected no rows.
    pub fn is_empty(&self) -> bool {
        self.daily_orders.is_empty()
    }
}

/// The main analytics processor
#[derive(Debug)]
pub struct AnalyticsPipeline {
    table: TransactionTable,
    config: PipelineConfig,
    logger: Logger,
}

impl AnalyticsPipeline {
    /// Create a new AnalyticsPipeline with the given configuration
    pub fn new(table: TransactionTable, config: PipelineConfig) -> Self {
        let logger = Logger::new("pipeline").with_level(config.level());
        Self {
            table,
            config,
            logger,
        }
    }

    /// Create a new AnalyticsPipeline with default configuration
    pub fn with_defaults(table: TransactionTable) -> Self {
        Self::new(table, PipelineConfig::default())
    }

    pub fn table(&self) -> &TransactionTable {
        &self.table
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full data range; the window a session starts with.
    pub fn default_window(&self) -> Option<DateWindow> {
        self.table.full_window()
    }

    /// Filter the table to `window` and compute all four summaries.
    ///
    /// Fails only for an inverted window. A window that selects nothing
    /// yields four empty summaries.
    pub fn run(&self, window: &DateWindow) -> AnalyticsResult<Summaries> {
        let mut logger = self.logger.clone();
        logger.start_correlation();

        let rows = match self.table.filter(window) {
            Ok(rows) => rows,
            Err(err) => {
                logger.log_invalid_window(window.start, window.end);
                return Err(err);
            }
        };
        logger.log_window_applied(window.start, window.end, rows.len());
        if rows.is_empty() {
            logger.log_empty_window(window.start, window.end);
        }

        let summaries = Summaries {
            window: *window,
            daily_orders: daily_orders(rows),
            category_performance: category_performance(rows),
            city_distribution: city_distribution(rows),
            rfm: rfm(rows, window.end),
        };

        logger.log_summaries_built(
            summaries.daily_orders.len(),
            summaries.category_performance.len(),
            summaries.city_distribution.len(),
            summaries.rfm.len(),
        );
        Ok(summaries)
    }

    /// Run for `window` and build the dashboard views.
    pub fn report(&self, window: &DateWindow) -> AnalyticsResult<DashboardReport> {
        let summaries = self.run(window)?;
        Ok(DashboardReport::build(&summaries, &self.config))
    }
}
