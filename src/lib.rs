//! Fonfolio Core - blended fund-return aggregation.
//!
//! This crate contains the calculation engine behind the fund dashboard:
//! point-in-time return aggregation across multi-currency holdings and the
//! intraday replay that rebuilds the blended return curve from per-symbol
//! histories. It performs no I/O of its own; price sources, FX rates, and the
//! document store are collaborator traits implemented elsewhere.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod portfolio;
pub mod quotes;
pub mod utils;

// Re-export common types from the portfolio module
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
