//! Category analysis output.

use finplan_core::AssetClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FundPosition;

/// Gold/silver split of precious-metal invested capital, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetalSplit {
    /// Gold share of precious-metal capital.
    pub gold_pct: f64,
    /// Silver share of precious-metal capital.
    pub silver_pct: f64,
}

impl MetalSplit {
    /// Absolute deviation of the gold share from `target_gold_pct`.
    #[must_use]
    pub fn deviation_from(&self, target_gold_pct: f64) -> f64 {
        (self.gold_pct - target_gold_pct).abs()
    }
}

/// Result of analyzing one asset class.
///
/// `action_required` is true exactly when `blended_xirr < benchmark_xirr`, or,
/// for precious metals, when the gold share deviates from target by more
/// than the configured tolerance. An asset class with no transactions is
/// always flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Asset class analyzed.
    pub asset_class: AssetClass,
    /// Number of distinct funds with transactions.
    pub funds_analyzed: usize,
    /// Sum of BUY quantities across funds.
    pub total_invested: Decimal,
    /// Sum of per-fund current values.
    pub current_value: Decimal,
    /// Capital-weighted XIRR in percent.
    pub blended_xirr: f64,
    /// Fixed benchmark in percent.
    pub benchmark_xirr: f64,
    /// Advice text.
    pub recommendation: String,
    /// Suggested alternative funds.
    pub recommended_funds: Vec<String>,
    /// Whether corrective action is warranted.
    pub action_required: bool,
    /// Per-fund breakdown ordered by fund code.
    pub positions: Vec<FundPosition>,
    /// Gold/silver split; only set for precious metals.
    pub metal_split: Option<MetalSplit>,
}

impl CategoryResult {
    /// Blended XIRR minus benchmark, in percentage points.
    #[must_use]
    pub fn performance_gap(&self) -> f64 {
        self.blended_xirr - self.benchmark_xirr
    }

    /// Returns true if the asset class had no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funds_analyzed == 0
    }
}
