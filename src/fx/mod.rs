//! FX module - supported currencies, rate pairs, and the rate-source contract.

mod fx_errors;
mod fx_model;
mod fx_traits;

pub use fx_errors::FxError;
pub use fx_model::{Currency, ExchangeRateSet, RatePair};
pub use fx_traits::{rates_or_identity, FxRateSource};
