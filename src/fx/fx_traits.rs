use async_trait::async_trait;
use log::warn;

use super::fx_model::ExchangeRateSet;
use crate::errors::Result;

/// Contract for the FX rate collaborator.
///
/// Implementations fetch TRY-denominated rate pairs for the supported
/// currencies, deriving the previous rate from whatever the feed exposes
/// (typically a change percent, see [`RatePair::from_change_percent`]).
///
/// [`RatePair::from_change_percent`]: super::RatePair::from_change_percent
#[async_trait]
pub trait FxRateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<ExchangeRateSet>;
}

/// Fetches rates, degrading to the identity set on failure. The dashboard
/// must keep rendering through a rates outage; foreign holdings are then
/// valued as base-currency until the feed recovers.
pub async fn rates_or_identity(source: &dyn FxRateSource) -> ExchangeRateSet {
    match source.fetch_rates().await {
        Ok(rates) => rates,
        Err(e) => {
            warn!("Exchange rate fetch failed, using identity rates: {}", e);
            ExchangeRateSet::default()
        }
    }
}
