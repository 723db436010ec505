use crate::model::{FetchError, RawTable};
use chrono::NaiveDate;

/// Seam to the external quote provider, mockable in tests.
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches daily history for `symbols` over `[start, end]` and returns
    /// one table with all symbols aligned on the union of observed dates.
    async fn fetch_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawTable, FetchError>;
}
