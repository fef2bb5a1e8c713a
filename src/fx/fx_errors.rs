use thiserror::Error;

/// Errors raised by the FX collaborator surface.
///
/// A missing rate inside the engine is not an error: lookups fall back to the
/// identity pair so a rates outage degrades the numbers instead of the
/// render. These variants exist for the fetching/parsing layer.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Failed to fetch exchange rates: {0}")]
    FetchFailed(String),
}
