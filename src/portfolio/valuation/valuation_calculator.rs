//! Return aggregation for a single point in time.
//!
//! Pure functions over fully materialized inputs: holdings, TRY rate pairs,
//! and the blend weights. Data-quality problems degrade to defined numbers
//! (identity rates, zero returns) instead of errors, so the dashboard always
//! has something to render through an upstream outage.

use rust_decimal::Decimal;

use crate::fx::{ExchangeRateSet, RatePair};
use crate::portfolio::holdings::{Holding, WeightConfig};
use crate::portfolio::valuation::{HoldingValuation, PortfolioSnapshot};

/// Computes blended snapshot totals for one portfolio.
///
/// Each holding is valued at the current rate and costed at the previous
/// rate, totals are summed, and the raw equity profit passes through the
/// three-sleeve blend. `total_value` stays the unblended market value; only
/// profit and return carry the blend. An empty holdings list yields the
/// all-zero snapshot.
pub fn calculate_snapshot(
    holdings: &[Holding],
    rates: &ExchangeRateSet,
    weights: &WeightConfig,
) -> PortfolioSnapshot {
    let mut total_value = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for holding in holdings {
        let rate = rates.resolve(holding.currency);
        total_value += current_value(holding, rate);
        total_cost += cost_basis(holding, rate);
    }

    let raw_profit = total_value - total_cost;
    let total_profit = blend_profit(raw_profit, total_cost, weights);

    PortfolioSnapshot {
        total_value,
        total_cost,
        total_profit,
        return_percent: percent_of(total_profit, total_cost),
    }
}

/// Per-holding valuation rows for the detail table.
///
/// `weighted_profit` applies the stock weight to the holding's own profit and
/// `impact_percent` relates it to the whole portfolio's cost basis, so the
/// rows explain where the blended total came from.
pub fn calculate_holding_valuations(
    holdings: &[Holding],
    rates: &ExchangeRateSet,
    weights: &WeightConfig,
) -> Vec<HoldingValuation> {
    let portfolio_cost: Decimal = holdings
        .iter()
        .map(|holding| cost_basis(holding, rates.resolve(holding.currency)))
        .sum();

    holdings
        .iter()
        .map(|holding| {
            let rate = rates.resolve(holding.currency);
            let value = current_value(holding, rate);
            let cost = cost_basis(holding, rate);
            let profit = value - cost;
            let weighted_profit = if weights.blending_enabled() {
                profit * weights.stock_weight
            } else {
                profit
            };
            HoldingValuation {
                code: holding.code.clone(),
                currency: holding.currency,
                current_value: value,
                total_cost: cost,
                profit,
                return_percent: percent_of(profit, cost),
                weighted_profit,
                impact_percent: percent_of(weighted_profit, portfolio_cost),
            }
        })
        .collect()
}

/// Market value in TRY: quantity x price at the current rate. TRY holdings
/// carry the identity pair, collapsing to plain quantity x price.
fn current_value(holding: &Holding, rate: RatePair) -> Decimal {
    holding.quantity * holding.current_price * rate.current
}

/// Cost basis in TRY: quantity x previous reference price at the previous
/// rate, so FX moves show up in the profit the same way the underlying does.
fn cost_basis(holding: &Holding, rate: RatePair) -> Decimal {
    holding.quantity * holding.cost * rate.prev
}

/// Applies the three-sleeve blend to a raw equity profit.
///
/// The equity sleeve contributes `raw_profit x stock_weight`; the fixed
/// income and real-estate sleeves contribute their period rate over the cost
/// basis at their resolved weights. A zero stock weight skips the blend and
/// the raw profit passes through unchanged.
pub(crate) fn blend_profit(
    raw_profit: Decimal,
    total_cost: Decimal,
    weights: &WeightConfig,
) -> Decimal {
    if !weights.blending_enabled() {
        return raw_profit;
    }

    let ppf_weight = weights.ppf_weight_resolved();
    let gyf_weight = weights.gyf_weight_resolved();
    let ppf_profit = total_cost * weights.ppf_rate * ppf_weight;
    let gyf_profit = total_cost * weights.gyf_rate * gyf_weight;

    raw_profit * weights.stock_weight + ppf_profit + gyf_profit
}

/// Percent of `amount` over a cost basis, zero whenever the basis is not
/// positive. This is the single division in the engine and the guard keeps
/// every degenerate input on a defined path.
pub(crate) fn percent_of(amount: Decimal, basis: Decimal) -> Decimal {
    if basis > Decimal::ZERO {
        amount / basis * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
