//! Replays the blended portfolio return across a session of irregular
//! per-symbol histories.
//!
//! Symbols sample at different rates and venues: one series may carry
//! five-minute bars, another may start half an hour late, a manual holding
//! has no feed at all. The replay aligns them on the union of every distinct
//! timestamp, filling forward where a symbol has no sample, and measures
//! every point against one fixed previous-close cost basis so the curve is a
//! pure function of the inputs.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use crate::constants::{MANUAL_SAMPLE_INTERVAL_MS, MAX_TRAILING_GAP_MS};
use crate::fx::ExchangeRateSet;
use crate::portfolio::holdings::{Holding, WeightConfig};
use crate::portfolio::intraday::TimeSeriesPoint;
use crate::portfolio::valuation::{blend_profit, percent_of};
use crate::quotes::{IntradayHistory, PricePoint};
use crate::utils::time_utils::{hhmm_label, session_cutoff_on, session_window};

/// Rebuilds how the blended portfolio return evolved across the session.
///
/// The output is ordered ascending by timestamp and ends with a synthesized
/// "current" point taken from the live prices, so the curve lands exactly on
/// the figure the snapshot card shows. Holdings with an empty or missing
/// history contribute their previous close at every point; they never break
/// the alignment for the others.
pub fn build_return_curve(
    histories: &HashMap<String, IntradayHistory>,
    holdings: &[Holding],
    rates: &ExchangeRateSet,
    weights: &WeightConfig,
    now: DateTime<Utc>,
) -> Vec<TimeSeriesPoint> {
    // Fixed denominator for the whole curve, computed once.
    let total_prev_cost: Decimal = holdings
        .iter()
        .map(|holding| {
            let prev_close = histories
                .get(&holding.code)
                .and_then(|h| h.prev_close)
                .unwrap_or(holding.cost);
            holding.quantity * prev_close * rates.resolve(holding.currency).prev
        })
        .sum();

    // The time axis is the union of all distinct timestamps; no single
    // symbol's series is authoritative.
    let timestamps: BTreeSet<i64> = histories
        .values()
        .flat_map(|history| history.data.iter().map(|point| point.timestamp))
        .collect();

    let mut curve: Vec<TimeSeriesPoint> = timestamps
        .into_iter()
        .map(|timestamp| {
            let mut value = Decimal::ZERO;
            for holding in holdings {
                let price = price_at(histories.get(&holding.code), holding, timestamp);
                value += price * holding.quantity * rates.resolve(holding.currency).current;
            }
            let profit = blend_profit(value - total_prev_cost, total_prev_cost, weights);
            TimeSeriesPoint {
                timestamp,
                time: hhmm_label(timestamp),
                return_percent: percent_of(profit, total_prev_cost),
            }
        })
        .collect();

    append_current_point(&mut curve, holdings, rates, weights, total_prev_cost, now);
    curve
}

/// Price of one holding at `timestamp`: the exact sample when there is one,
/// else the latest earlier sample (fill-forward), else the reference
/// previous close. Relies on `data` being ascending by timestamp.
fn price_at(history: Option<&IntradayHistory>, holding: &Holding, timestamp: i64) -> Decimal {
    let Some(history) = history else {
        return holding.cost;
    };
    history
        .data
        .iter()
        .rev()
        .find(|point| point.timestamp <= timestamp)
        .map(|point| point.price)
        .unwrap_or_else(|| history.prev_close.unwrap_or(holding.cost))
}

/// Synthesizes the trailing "current" point from the live prices.
///
/// Past the session cutoff the point is pinned to the cutoff of the last
/// data point's own day (so weekend views close on Friday's session), inside
/// the session it carries the wall clock. The point is only appended when it
/// lands strictly after the last historical point and within the maximum
/// gap; stale multi-day data gets no misleading tail.
fn append_current_point(
    curve: &mut Vec<TimeSeriesPoint>,
    holdings: &[Holding],
    rates: &ExchangeRateSet,
    weights: &WeightConfig,
    total_prev_cost: Decimal,
    now: DateTime<Utc>,
) {
    if holdings.is_empty() || total_prev_cost <= Decimal::ZERO {
        return;
    }

    let value: Decimal = holdings
        .iter()
        .map(|h| h.current_price * h.quantity * rates.resolve(h.currency).current)
        .sum();
    let profit = blend_profit(value - total_prev_cost, total_prev_cost, weights);
    let return_percent = percent_of(profit, total_prev_cost);
    let now_ms = now.timestamp_millis();

    match curve.last().map(|point| point.timestamp) {
        Some(last_ts) => {
            let cutoff = session_cutoff_on(last_ts);
            let timestamp = if now_ms > cutoff { cutoff } else { now_ms };

            let gap = timestamp - last_ts;
            if timestamp > last_ts && gap < MAX_TRAILING_GAP_MS {
                curve.push(TimeSeriesPoint {
                    timestamp,
                    time: hhmm_label(timestamp),
                    return_percent,
                });
            } else {
                debug!(
                    "Trailing point skipped: {}ms from the last history point",
                    gap
                );
            }
        }
        None => {
            // No history at all, but live prices exist: a single current
            // point still gives the chart something to show.
            curve.push(TimeSeriesPoint {
                timestamp: now_ms,
                time: hhmm_label(now_ms),
                return_percent,
            });
        }
    }
}

/// Flat intraday series for a manual holding: its static price sampled every
/// five minutes across the session window, capped at `now`. Manual holdings
/// never hit the price source, but this keeps the replay loop uniform.
pub fn synthesize_manual_history(holding: &Holding, now: DateTime<Utc>) -> IntradayHistory {
    let (open, close) = session_window(now);
    let now_ms = now.timestamp_millis();

    let mut data = Vec::new();
    let mut timestamp = open;
    while timestamp <= close && timestamp <= now_ms {
        data.push(PricePoint {
            timestamp,
            price: holding.current_price,
        });
        timestamp += MANUAL_SAMPLE_INTERVAL_MS;
    }

    IntradayHistory {
        prev_close: Some(holding.cost),
        data,
    }
}
