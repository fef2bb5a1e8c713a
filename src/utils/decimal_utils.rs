use num_traits::FromPrimitive;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;

/// Converts an adapter-supplied float to a `Decimal`, clamping anything that
/// cannot be represented (NaN, infinities, out-of-range values) to zero.
/// Upstream feeds occasionally deliver garbage; it must degrade to a defined
/// number before it reaches the persistence or display boundary.
pub fn decimal_or_zero(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Rounds a valuation figure to the persisted precision.
pub fn round_valuation(value: Decimal) -> Decimal {
    value.round_dp(DECIMAL_PRECISION)
}
