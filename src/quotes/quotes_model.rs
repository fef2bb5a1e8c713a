//! Quote and intraday-history domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_utils::decimal_or_zero;

/// One sample in a symbol's intraday series. Timestamps are epoch
/// milliseconds, matching the chart consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: Decimal,
}

impl PricePoint {
    /// Builds a point from adapter-supplied floats, clamping non-finite
    /// prices to zero at the boundary.
    pub fn from_f64(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price: decimal_or_zero(price),
        }
    }
}

/// Result of a live quote fetch for one symbol.
///
/// A symbol the provider could not answer is reported with
/// `success == false`; callers leave the holding's previous prices in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    pub code: String,
    pub current_price: Decimal,
    pub prev_close: Decimal,
    pub success: bool,
}

impl QuoteUpdate {
    pub fn failed(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            current_price: Decimal::ZERO,
            prev_close: Decimal::ZERO,
            success: false,
        }
    }
}

/// Intraday history for one symbol as delivered by the price source.
///
/// `data` is expected ascending by timestamp; the services sort after fetch
/// so the replay can fill forward with a reverse scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayHistory {
    /// Previous session close, when the provider reports one.
    pub prev_close: Option<Decimal>,
    pub data: Vec<PricePoint>,
}
