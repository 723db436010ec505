mod cleaner;
mod config;
mod fetcher;
mod model;
mod pipeline;
mod standardizer;
mod storage;
mod utils;

use clap::Parser;
use config::{load_config, AppConfig};
use fetcher::YahooProvider;
use pipeline::RunOutcome;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(about = "Daily price ETL: Yahoo Finance -> local SQLite table")]
struct Args {
    /// Start of the date range, YYYY-MM-DD. Defaults to the configured start date.
    #[arg(long)]
    start_date: Option<String>,

    /// End of the date range, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    end_date: Option<String>,

    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            info!(
                "Config '{}' not loaded ({e}); using built-in defaults.",
                args.config
            );
            AppConfig::default()
        }
    };

    let start_str = args
        .start_date
        .unwrap_or_else(|| config.default_start_date.clone());
    let Some(start) = utils::parse_date(&start_str) else {
        error!("Invalid start date '{start_str}', expected YYYY-MM-DD.");
        return;
    };

    let end = match &args.end_date {
        Some(s) => match utils::parse_date(s) {
            Some(d) => d,
            None => {
                error!("Invalid end date '{s}', expected YYYY-MM-DD.");
                return;
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    if end < start {
        error!("End date {end} is before start date {start}.");
        return;
    }

    let provider = match YahooProvider::new() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            return;
        }
    };

    match pipeline::run(&provider, &config, start, end).await {
        Ok(RunOutcome::Persisted { rows, columns }) => {
            info!("Run complete: {rows} rows x {columns} columns persisted.");
        }
        Ok(RunOutcome::NoData) => {
            warn!("Run ended with no data to persist.");
        }
        Ok(RunOutcome::PersistFailed) => {
            warn!("Run ended without persisting; see warnings above.");
        }
        Err(e) => {
            error!("Pipeline aborted: {e}");
        }
    }
}
