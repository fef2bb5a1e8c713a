use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the intraday blended-return curve, ordered ascending by
/// timestamp in the produced series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub timestamp: i64,
    /// Wall-clock label in the reporting timezone, HH:MM.
    pub time: String,
    pub return_percent: Decimal,
}
