//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::Currency;
use crate::utils::decimal_utils::round_valuation;

/// Snapshot totals for one portfolio at a point in time.
///
/// `total_value` is the unblended mark-to-market sum of the holdings, while
/// `total_profit` and `return_percent` carry the weight blend: the dashboard
/// shows the actual market value next to the synthetic contractual return.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub return_percent: Decimal,
}

impl PortfolioSnapshot {
    /// Copy rounded to the persisted precision.
    pub fn rounded(&self) -> Self {
        Self {
            total_value: round_valuation(self.total_value),
            total_cost: round_valuation(self.total_cost),
            total_profit: round_valuation(self.total_profit),
            return_percent: round_valuation(self.return_percent),
        }
    }
}

/// Per-holding valuation row for the detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub code: String,
    pub currency: Currency,
    /// Market value in TRY at the current rate.
    pub current_value: Decimal,
    /// Cost basis in TRY at the previous rate.
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub return_percent: Decimal,
    /// Profit after the stock weight is applied; the figure shown in the
    /// table next to the blended totals.
    pub weighted_profit: Decimal,
    /// This holding's contribution to the portfolio's blended return, in
    /// percentage points of the portfolio cost basis.
    pub impact_percent: Decimal,
}
