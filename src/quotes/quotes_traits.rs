use async_trait::async_trait;

use super::quotes_model::{IntradayHistory, QuoteUpdate};
use crate::errors::Result;

/// Contract for the market price collaborator.
///
/// `foreign` routes the request to the overseas endpoint; which venue a
/// symbol belongs to is decided by the holding's flags, never inferred here.
/// Batch calls report per-symbol failures inside the returned updates.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches live quotes for a batch of symbols.
    async fn fetch_quotes(&self, symbols: &[String], foreign: bool) -> Result<Vec<QuoteUpdate>>;

    /// Fetches the intraday price series for one symbol.
    async fn fetch_history(&self, symbol: &str, foreign: bool) -> Result<IntradayHistory>;
}
