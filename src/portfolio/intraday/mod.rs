//! Intraday replay: the return-curve engine and the service that feeds it.

mod intraday_model;
mod intraday_service;
mod replay_calculator;

pub use intraday_model::TimeSeriesPoint;
pub use intraday_service::IntradayService;
pub use replay_calculator::{build_return_curve, synthesize_manual_history};
