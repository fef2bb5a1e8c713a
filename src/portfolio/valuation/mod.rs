//! Point-in-time valuation: the return aggregation engine and the live
//! valuation service that feeds it.

mod valuation_calculator;
mod valuation_model;
mod valuation_service;

pub use valuation_calculator::{calculate_holding_valuations, calculate_snapshot};
pub(crate) use valuation_calculator::{blend_profit, percent_of};
pub use valuation_model::{HoldingValuation, PortfolioSnapshot};
pub use valuation_service::{apply_quote_updates, LiveValuation, LiveValuationService};
pub(crate) use valuation_service::refresh_holdings;


#[cfg(test)]
mod valuation_service_tests;
