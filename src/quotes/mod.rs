//! Quote module - live quote and intraday-history models, the price-source
//! contract, and the TTL cache decorator.

mod quote_cache;
mod quotes_errors;
mod quotes_model;
mod quotes_traits;

pub use quote_cache::CachedPriceSource;
pub use quotes_errors::PriceSourceError;
pub use quotes_model::{IntradayHistory, PricePoint, QuoteUpdate};
pub use quotes_traits::PriceSource;
