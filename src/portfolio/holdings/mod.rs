//! Holding and weighting domain models.

mod holdings_model;

pub use holdings_model::{Holding, PortfolioConfig, WeightConfig};
