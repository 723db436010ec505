// Pipeline orchestration: fetch -> clean -> persist
use crate::cleaner::clean_data;
use crate::config::AppConfig;
use crate::fetcher::QuoteProvider;
use crate::model::CleanError;
use crate::storage::save_to_db;
use chrono::NaiveDate;
use tracing::{info, warn};

/// How a run ended. Only a validation failure is an error; everything else
/// is a logged, non-fatal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Persisted { rows: usize, columns: usize },
    /// Fetch failed or came back empty; cleaner and persister were skipped.
    NoData,
    /// Table was cleaned but could not be written.
    PersistFailed,
}

/// Runs one full ETL pass over `[start, end]`.
pub async fn run(
    provider: &dyn QuoteProvider,
    config: &AppConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RunOutcome, CleanError> {
    info!("--- STARTING DAILY PRICE PIPELINE ---");
    info!("Fetching OHLC data for tickers: {:?}", config.tickers);

    let raw = match provider.fetch_history(&config.tickers, start, end).await {
        Ok(table) => table,
        Err(e) => {
            warn!("Fetch failed: {e}. Pipeline stopped.");
            return Ok(RunOutcome::NoData);
        }
    };

    if raw.is_empty() {
        warn!("No data returned for {:?}. Pipeline stopped.", config.tickers);
        return Ok(RunOutcome::NoData);
    }

    let single_symbol = config.tickers.first().map(String::as_str).unwrap_or("");
    let table = raw.flatten(single_symbol);

    let clean = clean_data(table, &config.ticker_map)?;

    let rows = clean.rows.len();
    let columns = clean.columns.len() + 2; // data + semana_do_mes
    if let Err(e) = save_to_db(&clean, &config.table_name, &config.db_path) {
        warn!("Failed to persist table '{}': {e}", config.table_name);
        return Ok(RunOutcome::PersistFailed);
    }

    info!("--- DAILY PRICE PIPELINE FINISHED ---");
    Ok(RunOutcome::Persisted { rows, columns })
}
