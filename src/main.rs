use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use storefront_analytics::window::{parse_bound, WindowBound};
use storefront_analytics::{
    AnalyticsPipeline, AnalyticsResult, DateWindow, LogLevel, Logger, PipelineConfig,
    TransactionLoader,
};

const ENV_LOG: &str = "STOREFRONT_LOG";

#[derive(Parser, Debug)]
#[command(name = "storefront-analytics")]
#[command(
    version,
    about = "Order, category, city and RFM analytics for an order log",
    long_about = None
)]
struct Cli {
    /// Order-item log (.csv or .parquet)
    data: PathBuf,

    /// Window start, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS (default: first purchase)
    #[arg(long)]
    start: Option<String>,

    /// Window end, inclusive; a bare date covers the whole day (default: last purchase)
    #[arg(long)]
    end: Option<String>,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Rows shown in every ranked view
    #[arg(long)]
    top: Option<usize>,
}

fn init_logging(level: LogLevel) {
    let default_filter = format!(
        "warn,storefront_analytics={}",
        LevelFilter::from_level(level.to_tracing())
    );

    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or(default_filter);

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn load_config(cli: &Cli) -> AnalyticsResult<PipelineConfig> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    Ok(match cli.top {
        Some(n) => config.with_top_n(n),
        None => config,
    })
}

fn run(cli: Cli, config: PipelineConfig) -> AnalyticsResult<()> {
    let logger = Logger::new("cli").with_level(config.level());

    let loaded = TransactionLoader::new().load_from_file(&cli.data)?;
    logger.log_data_loaded(
        loaded.report.total_rows,
        loaded.report.valid_rows,
        loaded.report.missing_price_rows,
    );

    let pipeline = AnalyticsPipeline::new(loaded.table, config);
    let Some(full) = pipeline.default_window() else {
        println!("No transactions in {}", cli.data.display());
        return Ok(());
    };

    let start = match cli.start.as_deref() {
        Some(value) => parse_bound(value, WindowBound::Start)?,
        None => full.start,
    };
    let end = match cli.end.as_deref() {
        Some(value) => parse_bound(value, WindowBound::End)?,
        None => full.end,
    };
    let window = DateWindow::new(start, end)?;

    let report = pipeline.report(&window)?;
    print!("{}", report);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.level());

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "analytics run failed");
            eprintln!("error: {}", err);
            if err.is_window_error() {
                eprintln!("hint: --start and --end take YYYY-MM-DD [HH:MM:SS], start before end");
            }
            ExitCode::FAILURE
        }
    }
}
