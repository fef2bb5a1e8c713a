//! Core error types for the fonfolio engine.
//!
//! The calculation engine itself never fails on data-quality issues: missing
//! rates fall back to identity, a non-positive cost basis yields a zero
//! return, and empty input yields empty output. These error types cover the
//! collaborator surfaces only (price source, FX source, document store).

use thiserror::Error;

use crate::fx::FxError;
use crate::quotes::PriceSourceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the fund-tracking application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Price source operation failed: {0}")]
    PriceSource(#[from] PriceSourceError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Portfolio '{0}' not found")]
    PortfolioNotFound(String),

    #[error("Portfolio store operation failed: {0}")]
    Store(String),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
