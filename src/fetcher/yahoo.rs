// Yahoo Finance v8 chart API client
use crate::fetcher::traits::QuoteProvider;
use crate::model::{ColumnKey, Field, FetchError, RawColumn, RawTable};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

/// Adjusted close and volume are deliberately not deserialized; only OHLC
/// reaches the pipeline.
#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

/// One symbol's history, keyed by date. A date missing for a symbol becomes a
/// `None` cell when the symbols are aligned into one table.
struct SymbolSeries {
    symbol: String,
    rows: BTreeMap<NaiveDate, [Option<f64>; 4]>,
}

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com".into(),
        })
    }

    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Option<String> {
        let start_ts = start.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
        let end_ts = end.and_hms_opt(23, 59, 59)?.and_utc().timestamp();
        Some(format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, start_ts, end_ts
        ))
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SymbolSeries, FetchError> {
        let url = self
            .chart_url(symbol, start, end)
            .ok_or_else(|| FetchError::BadResponse(format!("invalid date range for {symbol}")))?;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| FetchError::BadResponse(format!("{symbol}: {e}")))?;

        Self::parse_response(symbol, chart)
    }

    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<SymbolSeries, FetchError> {
        if let Some(err) = resp.chart.error {
            return Err(FetchError::Provider {
                code: err.code,
                description: err.description,
            });
        }

        let data = resp
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| FetchError::BadResponse(format!("{symbol}: empty result")))?;

        // No timestamps means no trading days in range, not a malformed response
        let timestamps = data.timestamp.unwrap_or_default();

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::BadResponse(format!("{symbol}: no quote data")))?;

        let mut rows = BTreeMap::new();
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    FetchError::BadResponse(format!("{symbol}: invalid timestamp {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();

            // Rows with no values at all are non-trading days, absent upstream
            if open.is_none() && high.is_none() && low.is_none() && close.is_none() {
                continue;
            }

            rows.insert(date, [open, high, low, close]);
        }

        Ok(SymbolSeries {
            symbol: symbol.to_string(),
            rows,
        })
    }

    /// Aligns per-symbol series on the union of their dates. With several
    /// symbols, columns are keyed `(field, symbol)`; a single symbol collapses
    /// to field-only keys, matching the provider's one-dimensional shape.
    fn assemble(series: Vec<SymbolSeries>) -> RawTable {
        let dates: BTreeSet<NaiveDate> = series
            .iter()
            .flat_map(|s| s.rows.keys().copied())
            .collect();
        let dates: Vec<NaiveDate> = dates.into_iter().collect();

        if dates.is_empty() {
            return RawTable::default();
        }

        let single = series.len() == 1;
        let mut columns = Vec::new();
        for (fi, field) in Field::ALL.iter().enumerate() {
            for s in &series {
                let key = if single {
                    ColumnKey::Field(*field)
                } else {
                    ColumnKey::FieldAndSymbol(*field, s.symbol.clone())
                };
                let values = dates
                    .iter()
                    .map(|d| s.rows.get(d).and_then(|row| row[fi]))
                    .collect();
                columns.push(RawColumn { key, values });
            }
        }

        RawTable { dates, columns }
    }
}

#[async_trait::async_trait]
impl QuoteProvider for YahooProvider {
    async fn fetch_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawTable, FetchError> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            info!("Fetching daily history for {symbol}...");
            series.push(self.fetch_symbol(symbol, start, end).await?);
        }
        Ok(Self::assemble(series))
    }
}
