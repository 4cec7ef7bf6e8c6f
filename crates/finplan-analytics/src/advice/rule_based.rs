//! Deterministic advisor.

use finplan_core::AssetClass;

use super::{Advisor, CategoryAdviceInput, PortfolioAdviceInput};
use crate::analysis::AllocationAnalysis;

/// Risk score above which the portfolio needs immediate attention.
const HIGH_PRIORITY_SCORE: u32 = 60;

/// Risk score above which the portfolio needs gradual changes.
const MODERATE_PRIORITY_SCORE: u32 = 30;

/// Fixed-text advisor keyed on the sign of the performance gap, the
/// rebalancing flag and the risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    /// Creates the advisor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Advisor for RuleBasedAdvisor {
    fn category_advice(&self, input: &CategoryAdviceInput<'_>) -> String {
        let lagging = input.performance_gap() < 0.0;
        let text = match input.asset_class {
            AssetClass::Equity if lagging => {
                "Your equity portfolio is underperforming the benchmark. Consider switching to \
                 low-cost index funds like UTI Nifty Index Fund or SBI Sensex Index Fund for \
                 better long-term returns. These funds have lower expense ratios and track \
                 market indices closely."
            }
            AssetClass::Equity => {
                "Your equity portfolio is performing well. Continue your SIP investments \
                 and maintain diversification across large-cap index funds."
            }
            AssetClass::Debt if lagging => {
                "Your debt portfolio returns are below expectations. Consider moving to \
                 higher-yielding debt funds like SBI Magnum Gilt Fund or HDFC Short Term \
                 Debt Fund. Also ensure adequate liquidity with liquid funds."
            }
            AssetClass::Debt => {
                "Your debt portfolio provides stable returns. Maintain allocation for \
                 capital preservation and portfolio stability."
            }
            AssetClass::Hybrid if lagging => {
                "Your hybrid funds are underperforming. Consider switching to balanced \
                 advantage funds like HDFC Balanced Advantage Fund or ICICI Balanced \
                 Advantage Fund which dynamically adjust equity-debt allocation."
            }
            AssetClass::Hybrid => {
                "Your hybrid funds provide good balanced exposure. Continue investments \
                 for moderate risk-adjusted returns."
            }
            AssetClass::PreciousMetals if input.metal_split.is_some() => {
                "Maintain a 50:50 gold-silver allocation for optimal portfolio hedging. \
                 Consider Nippon India Gold Savings Fund and Kotak Silver ETF Fund for \
                 exposure to precious metals as inflation hedge."
            }
            AssetClass::PreciousMetals => {
                "Add precious metals exposure (5% of portfolio) for diversification and \
                 inflation protection through gold and silver funds."
            }
        };
        text.to_string()
    }

    fn allocation_advice(&self, analysis: &AllocationAnalysis) -> String {
        if analysis.rebalancing_required {
            "Your portfolio allocation deviates from optimal targets. Rebalance by \
             adjusting SIP amounts or switching investments to align with your age \
             and risk profile. Focus on systematic rebalancing quarterly."
                .to_string()
        } else {
            "Your asset allocation is well-balanced for your age and risk profile. \
             Continue current investment strategy with periodic reviews."
                .to_string()
        }
    }

    fn portfolio_advice(&self, input: &PortfolioAdviceInput<'_>) -> String {
        let text = if input.risk_score > HIGH_PRIORITY_SCORE {
            "HIGH PRIORITY: Your portfolio requires immediate attention. Multiple fund \
             categories are underperforming and allocation is suboptimal. Focus on: \
             1) Switch underperforming funds to marquee index funds, \
             2) Rebalance asset allocation, \
             3) Increase SIP amounts in better-performing categories."
        } else if input.risk_score > MODERATE_PRIORITY_SCORE {
            "MODERATE PRIORITY: Your portfolio has some areas for improvement. \
             Consider gradual rebalancing and switching 1-2 underperforming funds \
             to better alternatives. Maintain your SIP discipline."
        } else {
            "GOOD: Your portfolio is well-structured and performing adequately. \
             Continue current investment strategy with annual reviews and minor \
             adjustments as needed."
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AllocationSnapshot, MetalSplit};
    use finplan_core::{AgeGroup, RiskProfile};
    use rust_decimal::Decimal;

    fn input(class: AssetClass, blended: f64, benchmark: f64) -> CategoryAdviceInput<'static> {
        CategoryAdviceInput {
            asset_class: class,
            funds_analyzed: 1,
            total_invested: Decimal::ONE_HUNDRED,
            current_value: Decimal::ONE_HUNDRED,
            blended_xirr: blended,
            benchmark_xirr: benchmark,
            positions: &[],
            metal_split: None,
        }
    }

    fn portfolio(score: u32) -> PortfolioAdviceInput<'static> {
        PortfolioAdviceInput {
            total_invested: Decimal::ZERO,
            current_value: Decimal::ZERO,
            overall_xirr: 0.0,
            risk_score: score,
            max_risk_score: 80,
            action_items: &[],
        }
    }

    #[test]
    fn test_category_text_follows_gap_sign() {
        let advisor = RuleBasedAdvisor::new();

        let lagging = advisor.category_advice(&input(AssetClass::Equity, 8.0, 12.0));
        assert!(lagging.starts_with("Your equity portfolio is underperforming"));

        let ahead = advisor.category_advice(&input(AssetClass::Equity, 14.0, 12.0));
        assert!(ahead.starts_with("Your equity portfolio is performing well"));

        let on_par = advisor.category_advice(&input(AssetClass::Debt, 7.5, 7.5));
        assert!(on_par.starts_with("Your debt portfolio provides stable returns"));

        let hybrid = advisor.category_advice(&input(AssetClass::Hybrid, 2.0, 10.0));
        assert!(hybrid.contains("balanced advantage funds"));
    }

    #[test]
    fn test_precious_metals_text() {
        let advisor = RuleBasedAdvisor::new();
        let mut pm = input(AssetClass::PreciousMetals, 1.0, 8.5);
        assert!(advisor.category_advice(&pm).starts_with("Add precious metals"));

        pm.metal_split = Some(MetalSplit {
            gold_pct: 100.0,
            silver_pct: 0.0,
        });
        assert!(advisor.category_advice(&pm).starts_with("Maintain a 50:50"));
    }

    #[test]
    fn test_allocation_text() {
        let advisor = RuleBasedAdvisor::new();
        let mut analysis = AllocationAnalysis {
            age_group: AgeGroup::From30To40,
            risk_profile: RiskProfile::Moderate,
            current: AllocationSnapshot::zero(),
            optimal: AllocationSnapshot::zero(),
            gap: AllocationSnapshot::zero(),
            rebalancing_required: false,
            recommendation: String::new(),
        };
        assert!(advisor
            .allocation_advice(&analysis)
            .starts_with("Your asset allocation is well-balanced"));

        analysis.rebalancing_required = true;
        assert!(advisor
            .allocation_advice(&analysis)
            .starts_with("Your portfolio allocation deviates"));
    }

    #[test]
    fn test_portfolio_priority_bands() {
        let advisor = RuleBasedAdvisor::new();
        assert!(advisor.portfolio_advice(&portfolio(65)).starts_with("HIGH PRIORITY"));
        assert!(advisor.portfolio_advice(&portfolio(60)).starts_with("MODERATE PRIORITY"));
        assert!(advisor.portfolio_advice(&portfolio(45)).starts_with("MODERATE PRIORITY"));
        assert!(advisor.portfolio_advice(&portfolio(30)).starts_with("GOOD"));
        assert!(advisor.portfolio_advice(&portfolio(0)).starts_with("GOOD"));
    }
}
