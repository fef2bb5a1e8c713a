//! Storage contract for portfolio configuration and derived series.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::portfolio::holdings::PortfolioConfig;
use crate::portfolio::intraday::TimeSeriesPoint;
use crate::portfolio::valuation::PortfolioSnapshot;

/// Document-store contract the services read configuration from and write
/// derived numbers to. The calculation engine itself persists nothing; this
/// trait is implemented by the storage layer.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Loads one portfolio's holdings and weight configuration.
    async fn get_portfolio(&self, code: &str) -> Result<PortfolioConfig>;

    /// Persists the latest snapshot totals for the overview surface.
    async fn save_totals(&self, code: &str, snapshot: &PortfolioSnapshot) -> Result<()>;

    /// Appends one point to the portfolio's intraday series for `day`.
    async fn append_intraday_point(
        &self,
        code: &str,
        day: NaiveDate,
        point: &TimeSeriesPoint,
    ) -> Result<()>;
}
