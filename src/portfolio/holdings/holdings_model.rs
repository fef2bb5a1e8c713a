use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetKind;
use crate::fx::Currency;

/// One position in a portfolio.
///
/// Holdings are inputs to a calculation call; the engine keeps no holding
/// state between calls, and persistence belongs to the store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker or fund code, unique within a portfolio.
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: AssetKind,
    pub quantity: Decimal,
    pub current_price: Decimal,
    /// Previous reference price, kept in sync with the provider's previous
    /// close on each refresh.
    pub cost: Decimal,
    #[serde(default)]
    pub currency: Currency,
    /// Manual holdings are never refreshed from the price source; their
    /// prices are authoritative as entered.
    #[serde(default)]
    pub is_manual: bool,
    /// Routed to the overseas quote endpoint by the price adapter.
    #[serde(default)]
    pub is_foreign: bool,
}

/// Blended-return parameters for a portfolio.
///
/// Three sleeves share the return: equity at `stock_weight`, fixed income at
/// `ppf_weight`, and the real-estate sleeve absorbing whatever remains,
/// clamped at zero. The weights are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightConfig {
    /// Fraction of the raw equity profit counted toward the blended return.
    /// Zero disables blending entirely and the raw profit passes through.
    #[serde(default = "default_stock_weight")]
    pub stock_weight: Decimal,
    /// Fixed-income rate of return for the period.
    #[serde(default)]
    pub ppf_rate: Decimal,
    /// Explicit fixed-income weight; `None` derives `1 - stock_weight`.
    #[serde(default)]
    pub ppf_weight: Option<Decimal>,
    /// Real-estate-fund rate of return for the period.
    #[serde(default)]
    pub gyf_rate: Decimal,
}

fn default_stock_weight() -> Decimal {
    Decimal::ONE
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            stock_weight: Decimal::ONE,
            ppf_rate: Decimal::ZERO,
            ppf_weight: None,
            gyf_rate: Decimal::ZERO,
        }
    }
}

impl WeightConfig {
    /// The fixed-income weight, derived from the stock weight when not set
    /// explicitly.
    pub fn ppf_weight_resolved(&self) -> Decimal {
        self.ppf_weight
            .unwrap_or_else(|| Decimal::ONE - self.stock_weight)
    }

    /// The real-estate weight: whatever the other sleeves leave, never
    /// negative even when the explicit weights over-allocate.
    pub fn gyf_weight_resolved(&self) -> Decimal {
        (Decimal::ONE - self.stock_weight - self.ppf_weight_resolved()).max(Decimal::ZERO)
    }

    /// A zero stock weight means "no blending applied".
    pub fn blending_enabled(&self) -> bool {
        !self.stock_weight.is_zero()
    }
}

/// Per-portfolio configuration as read from the config-store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub holdings: Vec<Holding>,
    #[serde(flatten)]
    pub weights: WeightConfig,
}
