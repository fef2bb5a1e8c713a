//! FX domain models: supported currencies and TRY-denominated rate pairs.

use std::collections::HashMap;
use std::str::FromStr;

use log::debug;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;

/// Currencies the engine understands. TRY is the reporting currency; every
/// rate pair is quoted against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    TRY,
    USD,
    EUR,
    CHF,
    CAD,
    DKK,
    NOK,
    GBP,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::TRY,
        Currency::USD,
        Currency::EUR,
        Currency::CHF,
        Currency::CAD,
        Currency::DKK,
        Currency::NOK,
        Currency::GBP,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::TRY => "TRY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::DKK => "DKK",
            Currency::NOK => "NOK",
            Currency::GBP => "GBP",
        }
    }

    /// Whether this is the reporting currency.
    pub fn is_base(&self) -> bool {
        matches!(self, Currency::TRY)
    }
}

impl FromStr for Currency {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRY" => Ok(Currency::TRY),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "DKK" => Ok(Currency::DKK),
            "NOK" => Ok(Currency::NOK),
            "GBP" => Ok(Currency::GBP),
            other => Err(FxError::UnsupportedCurrency(other.to_string())),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current and previous-close TRY rate for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePair {
    pub current: Decimal,
    pub prev: Decimal,
}

impl RatePair {
    /// The base-currency pair; also the fallback when a rate is missing.
    pub const IDENTITY: RatePair = RatePair {
        current: Decimal::ONE,
        prev: Decimal::ONE,
    };

    /// Derives the pair from a spot rate and its daily change percent, the
    /// shape most rate feeds deliver: `prev = current / (1 + change / 100)`.
    /// Inputs that cannot yield positive rates collapse to the identity pair.
    pub fn from_change_percent(current: f64, change_percent: f64) -> RatePair {
        let current = match Decimal::from_f64(current) {
            Some(rate) if rate > Decimal::ZERO => rate,
            _ => return RatePair::IDENTITY,
        };
        let change = Decimal::from_f64(change_percent).unwrap_or(Decimal::ZERO);
        let divisor = Decimal::ONE + change / Decimal::ONE_HUNDRED;
        let prev = if divisor > Decimal::ZERO {
            current / divisor
        } else {
            current
        };
        RatePair { current, prev }
    }
}

/// TRY-denominated rate pairs keyed by currency, supplied fresh per
/// calculation call.
///
/// Lookup never fails: TRY and any currency absent from the set resolve to
/// the identity pair, so a rates outage means a foreign holding is valued as
/// if it were base-currency instead of the whole calculation failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRateSet {
    rates: HashMap<Currency, RatePair>,
}

impl ExchangeRateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. The base currency is pinned to identity and cannot be
    /// overridden; non-positive rates are rejected as invalid.
    pub fn insert(&mut self, currency: Currency, pair: RatePair) -> Result<(), FxError> {
        if currency.is_base() {
            return Ok(());
        }
        if pair.current <= Decimal::ZERO || pair.prev <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "{}: current {} prev {}",
                currency, pair.current, pair.prev
            )));
        }
        self.rates.insert(currency, pair);
        Ok(())
    }

    /// The rate pair for `currency`, falling back to identity for the base
    /// currency and for anything missing from the set.
    pub fn resolve(&self, currency: Currency) -> RatePair {
        if currency.is_base() {
            return RatePair::IDENTITY;
        }
        match self.rates.get(&currency) {
            Some(pair) => *pair,
            None => {
                debug!("No rate for {}, treating as base currency", currency);
                RatePair::IDENTITY
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(Currency, RatePair)> for ExchangeRateSet {
    /// Collects pairs, silently dropping invalid ones. Rate feeds are allowed
    /// to be partially broken without taking the whole set down.
    fn from_iter<I: IntoIterator<Item = (Currency, RatePair)>>(iter: I) -> Self {
        let mut set = ExchangeRateSet::new();
        for (currency, pair) in iter {
            if set.insert(currency, pair).is_err() {
                debug!("Dropping invalid rate pair for {}", currency);
            }
        }
        set
    }
}
