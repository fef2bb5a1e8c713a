//! Live valuation orchestration: refresh prices, compute, persist totals.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error, warn};

use crate::errors::Result;
use crate::fx::{rates_or_identity, FxRateSource};
use crate::portfolio::holdings::Holding;
use crate::portfolio::store::PortfolioStore;
use crate::portfolio::valuation::{
    calculate_holding_valuations, calculate_snapshot, HoldingValuation, PortfolioSnapshot,
};
use crate::quotes::{PriceSource, QuoteUpdate};

/// Snapshot totals plus the per-holding rows, as consumed by the detail
/// surface.
#[derive(Debug, Clone)]
pub struct LiveValuation {
    pub snapshot: PortfolioSnapshot,
    pub holdings: Vec<HoldingValuation>,
}

/// Values one portfolio against live quotes and rates.
///
/// Meant to be driven by an external scheduler (the dashboard polls once a
/// minute per watched portfolio); every call is independent and idempotent
/// for identical collaborator responses.
pub struct LiveValuationService {
    store: Arc<dyn PortfolioStore>,
    price_source: Arc<dyn PriceSource>,
    fx_source: Arc<dyn FxRateSource>,
}

impl LiveValuationService {
    pub fn new(
        store: Arc<dyn PortfolioStore>,
        price_source: Arc<dyn PriceSource>,
        fx_source: Arc<dyn FxRateSource>,
    ) -> Self {
        Self {
            store,
            price_source,
            fx_source,
        }
    }

    /// Refreshes prices for one portfolio, computes the blended valuation,
    /// and writes the totals back to the store.
    ///
    /// Collaborator failures degrade instead of aborting: a failed quote
    /// batch leaves prices stale, a failed rates fetch values foreign
    /// holdings at identity, and a failed totals write only loses the
    /// overview sync, not the returned valuation.
    pub async fn value_portfolio(&self, code: &str) -> Result<LiveValuation> {
        let mut config = self.store.get_portfolio(code).await?;

        refresh_holdings(self.price_source.as_ref(), &mut config.holdings).await;
        let rates = rates_or_identity(self.fx_source.as_ref()).await;

        let snapshot = calculate_snapshot(&config.holdings, &rates, &config.weights);
        let holdings = calculate_holding_valuations(&config.holdings, &rates, &config.weights);

        if let Err(e) = self.store.save_totals(code, &snapshot.rounded()).await {
            error!("Failed to persist totals for {}: {}", code, e);
        }

        Ok(LiveValuation { snapshot, holdings })
    }
}

/// Fetches live quotes for the non-manual holdings and applies the
/// successful updates in place. Local and foreign symbols go through
/// separate fetches; a failed batch is logged and the affected holdings keep
/// their previous prices.
pub(crate) async fn refresh_holdings(price_source: &dyn PriceSource, holdings: &mut [Holding]) {
    let mut updates: Vec<QuoteUpdate> = Vec::new();

    for foreign in [false, true] {
        let symbols = unique_symbols(holdings, foreign);
        if symbols.is_empty() {
            continue;
        }
        match price_source.fetch_quotes(&symbols, foreign).await {
            Ok(batch) => updates.extend(batch),
            Err(e) => warn!(
                "Quote fetch failed for {} symbols (foreign: {}): {}",
                symbols.len(),
                foreign,
                e
            ),
        }
    }

    apply_quote_updates(holdings, &updates);
}

/// Applies successful quote updates to the matching holdings: the current
/// price moves to the live quote and the cost basis syncs with the previous
/// close for daily tracking. Manual holdings and symbols the provider failed
/// on are left untouched.
pub fn apply_quote_updates(holdings: &mut [Holding], updates: &[QuoteUpdate]) {
    for update in updates {
        if !update.success {
            debug!("Skipping failed quote update for {}", update.code);
            continue;
        }
        for holding in holdings
            .iter_mut()
            .filter(|h| !h.is_manual && h.code == update.code)
        {
            holding.current_price = update.current_price;
            holding.cost = update.prev_close;
        }
    }
}

fn unique_symbols(holdings: &[Holding], foreign: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    holdings
        .iter()
        .filter(|h| !h.is_manual && h.is_foreign == foreign)
        .filter(|h| seen.insert(h.code.clone()))
        .map(|h| h.code.clone())
        .collect()
}
