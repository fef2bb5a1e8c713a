//! Intraday orchestration: history assembly for the return curve, and the
//! periodic snapshot job that appends to the stored series.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::warn;

use crate::errors::Result;
use crate::fx::{rates_or_identity, FxRateSource};
use crate::portfolio::holdings::Holding;
use crate::portfolio::intraday::{build_return_curve, synthesize_manual_history, TimeSeriesPoint};
use crate::portfolio::store::PortfolioStore;
use crate::portfolio::valuation::{calculate_snapshot, refresh_holdings};
use crate::quotes::{IntradayHistory, PriceSource};
use crate::utils::decimal_utils::round_valuation;
use crate::utils::time_utils::{foreign_session_range, hhmm_label, session_day};

/// Builds intraday return curves and records snapshot points for a
/// portfolio. The recording cadence (once a minute, per watched portfolio)
/// belongs to the external scheduler; every call here is self-contained.
pub struct IntradayService {
    store: Arc<dyn PortfolioStore>,
    price_source: Arc<dyn PriceSource>,
    fx_source: Arc<dyn FxRateSource>,
}

impl IntradayService {
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

    /// Builds the intraday blended-return curve for one portfolio.
    pub async fn return_curve(&self, code: &str) -> Result<Vec<TimeSeriesPoint>> {
        let config = self.store.get_portfolio(code).await?;
        if config.holdings.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let histories = self.fetch_histories(&config.holdings, now).await;
        let rates = rates_or_identity(self.fx_source.as_ref()).await;

        Ok(build_return_curve(
            &histories,
            &config.holdings,
            &rates,
            &config.weights,
            now,
        ))
    }

    /// Computes the current blended return against live quotes and appends
    /// it to the stored intraday series for the session day.
    pub async fn record_snapshot(&self, code: &str) -> Result<TimeSeriesPoint> {
        let mut config = self.store.get_portfolio(code).await?;

        refresh_holdings(self.price_source.as_ref(), &mut config.holdings).await;
        let rates = rates_or_identity(self.fx_source.as_ref()).await;
        let snapshot = calculate_snapshot(&config.holdings, &rates, &config.weights);

        let now = Utc::now();
        let point = TimeSeriesPoint {
            timestamp: now.timestamp_millis(),
            time: hhmm_label(now.timestamp_millis()),
            return_percent: round_valuation(snapshot.return_percent),
        };
        self.store
            .append_intraday_point(code, session_day(now), &point)
            .await?;
        Ok(point)
    }

    /// One history per holding: manual holdings synthesize a flat series
    /// locally, everything else is fetched concurrently. A failed fetch
    /// leaves an empty history, which the replay treats as flat at the
    /// previous close.
    async fn fetch_histories(
        &self,
        holdings: &[Holding],
        now: DateTime<Utc>,
    ) -> HashMap<String, IntradayHistory> {
        let fetches = holdings.iter().map(|holding| async move {
            if holding.is_manual {
                return (holding.code.clone(), synthesize_manual_history(holding, now));
            }
            match self
                .price_source
                .fetch_history(&holding.code, holding.is_foreign)
                .await
            {
                Ok(history) => (holding.code.clone(), history),
                Err(e) => {
                    warn!("Intraday history fetch failed for {}: {}", holding.code, e);
                    (holding.code.clone(), IntradayHistory::default())
                }
            }
        });
        let mut histories: HashMap<String, IntradayHistory> =
            join_all(fetches).await.into_iter().collect();

        // A portfolio holding foreign assets charts the overseas session
        // window instead of the local day.
        if holdings.iter().any(|h| h.is_foreign) {
            let (start, end) = foreign_session_range(now);
            for history in histories.values_mut() {
                history
                    .data
                    .retain(|point| point.timestamp >= start && point.timestamp <= end);
            }
        }

        // The replay fills forward with a reverse scan and needs ascending
        // samples.
        for history in histories.values_mut() {
            history.data.sort_by_key(|point| point.timestamp);
        }

        histories
    }
}
