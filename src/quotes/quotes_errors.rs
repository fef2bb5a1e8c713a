use thiserror::Error;

/// Errors raised by price-source collaborators.
///
/// Per-symbol failures inside a batch are not errors: they travel as
/// [`QuoteUpdate`] values with `success == false` so one dead symbol never
/// takes down the refresh of the rest. `Err` is for whole-call failures.
///
/// [`QuoteUpdate`]: super::QuoteUpdate
#[derive(Error, Debug)]
pub enum PriceSourceError {
    #[error("Failed to fetch quotes: {0}")]
    FetchFailed(String),

    #[error("No data found for symbol {0}")]
    SymbolNotFound(String),

    #[error("Provider returned an invalid payload: {0}")]
    InvalidPayload(String),
}
