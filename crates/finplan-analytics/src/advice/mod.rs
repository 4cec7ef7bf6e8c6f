//! Advisory text.
//!
//! Every numeric field of an analysis is computed without an [`Advisor`].
//! The advisor only narrates: it turns finished figures into recommendation
//! text. [`RuleBasedAdvisor`] is the deterministic default; an LLM-backed
//! collaborator can implement the same trait.

mod rule_based;

pub use rule_based::RuleBasedAdvisor;

use finplan_core::AssetClass;
use rust_decimal::Decimal;

use crate::analysis::AllocationAnalysis;
use crate::types::{FundPosition, MetalSplit};

/// Maximum length of an action item's recommendation excerpt.
pub const ACTION_ITEM_MAX_CHARS: usize = 100;

/// Label used for allocation action items.
pub const ALLOCATION_LABEL: &str = "Allocation";

/// Figures an advisor sees when narrating one asset class.
#[derive(Debug, Clone, Copy)]
pub struct CategoryAdviceInput<'a> {
    /// Asset class analyzed.
    pub asset_class: AssetClass,
    /// Number of funds with transactions.
    pub funds_analyzed: usize,
    /// Sum of BUY quantities.
    pub total_invested: Decimal,
    /// Sum of current values.
    pub current_value: Decimal,
    /// Capital-weighted XIRR in percent.
    pub blended_xirr: f64,
    /// Benchmark in percent.
    pub benchmark_xirr: f64,
    /// Per-fund breakdown.
    pub positions: &'a [FundPosition],
    /// Gold/silver split for precious metals.
    pub metal_split: Option<MetalSplit>,
}

impl CategoryAdviceInput<'_> {
    /// Blended XIRR minus benchmark, in percentage points.
    #[must_use]
    pub fn performance_gap(&self) -> f64 {
        self.blended_xirr - self.benchmark_xirr
    }
}

/// Figures an advisor sees when narrating the whole portfolio.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAdviceInput<'a> {
    /// Total invested across asset classes.
    pub total_invested: Decimal,
    /// Total current value across asset classes.
    pub current_value: Decimal,
    /// Capital-weighted XIRR across asset classes.
    pub overall_xirr: f64,
    /// Sum of penalty points for flagged analyses.
    pub risk_score: u32,
    /// Highest reachable risk score.
    pub max_risk_score: u32,
    /// Action items raised by the analyses.
    pub action_items: &'a [String],
}

/// Produces recommendation text from finished analysis figures.
pub trait Advisor: Send + Sync {
    /// Recommendation for an asset class that has at least one fund.
    fn category_advice(&self, input: &CategoryAdviceInput<'_>) -> String;

    /// Recommendation for the allocation analysis.
    fn allocation_advice(&self, analysis: &AllocationAnalysis) -> String;

    /// Overall recommendation for the portfolio.
    fn portfolio_advice(&self, input: &PortfolioAdviceInput<'_>) -> String;
}

/// Fixed recommendation for an asset class with no transactions.
#[must_use]
pub fn no_exposure_recommendation(class: AssetClass) -> &'static str {
    match class {
        AssetClass::Equity => "No equity funds found in portfolio. Consider adding equity exposure.",
        AssetClass::Debt => {
            "No debt funds found in portfolio. Consider adding debt exposure for stability."
        }
        AssetClass::Hybrid => {
            "No hybrid funds found in portfolio. Consider adding balanced funds for moderate risk exposure."
        }
        AssetClass::PreciousMetals => {
            "No precious metal funds found. Consider adding gold/silver in 50:50 ratio for portfolio hedging."
        }
    }
}

/// Formats an action item as `"<label>: <recommendation>..."`.
///
/// The recommendation is cut to [`ACTION_ITEM_MAX_CHARS`] characters and
/// always followed by `...`.
///
/// ```rust
/// use finplan_analytics::advice::format_action_item;
///
/// assert_eq!(format_action_item("Debt", "Rebalance."), "Debt: Rebalance....");
/// let long = "x".repeat(150);
/// assert_eq!(format_action_item("Equity", &long).len(), "Equity: ".len() + 103);
/// ```
#[must_use]
pub fn format_action_item(label: &str, recommendation: &str) -> String {
    let cut = recommendation
        .char_indices()
        .nth(ACTION_ITEM_MAX_CHARS)
        .map_or(recommendation.len(), |(index, _)| index);
    format!("{label}: {}...", &recommendation[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_item_short() {
        assert_eq!(
            format_action_item("Hybrid", "Keep going."),
            "Hybrid: Keep going...."
        );
    }

    #[test]
    fn test_action_item_exact_limit_kept_whole() {
        let text = "a".repeat(ACTION_ITEM_MAX_CHARS);
        let item = format_action_item("Debt", &text);
        assert_eq!(item, format!("Debt: {text}..."));
    }

    #[test]
    fn test_action_item_truncated() {
        let text = "b".repeat(ACTION_ITEM_MAX_CHARS + 1);
        let item = format_action_item("Gold/Silver", &text);
        assert_eq!(
            item,
            format!("Gold/Silver: {}...", "b".repeat(ACTION_ITEM_MAX_CHARS))
        );
    }

    #[test]
    fn test_action_item_multibyte() {
        let text = "₹".repeat(ACTION_ITEM_MAX_CHARS + 5);
        let item = format_action_item("Equity", &text);
        assert!(item.ends_with("..."));
        assert_eq!(item.chars().count(), "Equity: ".len() + ACTION_ITEM_MAX_CHARS + 3);
    }

    #[test]
    fn test_no_exposure_texts() {
        assert!(no_exposure_recommendation(AssetClass::Debt).starts_with("No debt funds"));
        assert!(no_exposure_recommendation(AssetClass::PreciousMetals).contains("50:50"));
        for class in AssetClass::all() {
            assert!(no_exposure_recommendation(*class).contains("Consider adding"));
        }
    }
}
