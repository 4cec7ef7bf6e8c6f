//! Per-asset-class analysis against a fixed benchmark.

use finplan_core::{AssetClass, Date, FundBook, FundCategory, Transaction};
use log::debug;
use rust_decimal::Decimal;

use crate::advice::{no_exposure_recommendation, Advisor, CategoryAdviceInput, RuleBasedAdvisor};
use crate::aggregation::aggregate_positions;
use crate::config::AnalysisConfig;
use crate::returns::capital_weighted_rate;
use crate::types::amount::{percent_of, saturating_sum};
use crate::types::{CategoryResult, FundPosition, MetalSplit};

static DEFAULT_ADVISOR: RuleBasedAdvisor = RuleBasedAdvisor;

/// Analyzes one asset class of a portfolio.
///
/// Holds no state between calls: analyzing the same inputs twice yields
/// identical results.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::analysis::CategoryAnalyzer;
/// use finplan_analytics::config::AnalysisConfig;
/// use finplan_core::{AssetClass, Date, FundBook};
///
/// let config = AnalysisConfig::default();
/// let analyzer = CategoryAnalyzer::new(AssetClass::Debt, &config)
///     .as_of(Date::from_ymd(2025, 1, 1).unwrap());
///
/// let result = analyzer.analyze(&[], &FundBook::new());
/// assert_eq!(result.funds_analyzed, 0);
/// assert!(result.action_required);
/// ```
#[derive(Clone, Copy)]
pub struct CategoryAnalyzer<'a> {
    asset_class: AssetClass,
    config: &'a AnalysisConfig,
    advisor: &'a dyn Advisor,
    as_of: Date,
}

impl<'a> CategoryAnalyzer<'a> {
    /// Creates an analyzer valuing holdings as of today with the rule-based advisor.
    #[must_use]
    pub fn new(asset_class: AssetClass, config: &'a AnalysisConfig) -> Self {
        Self {
            asset_class,
            config,
            advisor: &DEFAULT_ADVISOR,
            as_of: Date::today(),
        }
    }

    /// Sets the advisor used for recommendation text.
    #[must_use]
    pub fn with_advisor(mut self, advisor: &'a dyn Advisor) -> Self {
        self.advisor = advisor;
        self
    }

    /// Sets the valuation date for the terminal cash flow.
    #[must_use]
    pub fn as_of(mut self, date: Date) -> Self {
        self.as_of = date;
        self
    }

    /// Asset class this analyzer covers.
    #[must_use]
    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    /// Analyzes the transactions belonging to this asset class.
    ///
    /// Transactions for funds missing from `funds` match no asset class.
    #[must_use]
    pub fn analyze(&self, transactions: &[Transaction], funds: &FundBook) -> CategoryResult {
        let class = self.asset_class;
        let positions = aggregate_positions(
            transactions,
            funds,
            |category| class.contains(category),
            self.config,
            self.as_of,
        );

        if positions.is_empty() {
            debug!("no {} exposure", class.name());
            return self.no_exposure();
        }

        let total_invested = saturating_sum(positions.iter().map(|p| p.invested));
        let current_value = saturating_sum(positions.iter().map(|p| p.current_value));
        let blended_xirr = capital_weighted_rate(positions.iter().map(|p| (p.xirr, p.invested)));
        let benchmark_xirr = self.config.benchmarks.for_asset_class(class);

        let metal_split = match class {
            AssetClass::PreciousMetals => Some(metal_split(&positions, total_invested)),
            _ => None,
        };

        let split_off_target = metal_split.is_some_and(|split| {
            split.deviation_from(self.config.gold_target_pct) > self.config.gold_tolerance_pct
        });
        let action_required = blended_xirr < benchmark_xirr || split_off_target;

        let recommendation = self.advisor.category_advice(&CategoryAdviceInput {
            asset_class: class,
            funds_analyzed: positions.len(),
            total_invested,
            current_value,
            blended_xirr,
            benchmark_xirr,
            positions: &positions,
            metal_split,
        });

        CategoryResult {
            asset_class: class,
            funds_analyzed: positions.len(),
            total_invested,
            current_value,
            blended_xirr,
            benchmark_xirr,
            recommendation,
            recommended_funds: self.config.marquee_funds.for_asset_class(class),
            action_required,
            positions,
            metal_split,
        }
    }

    fn no_exposure(&self) -> CategoryResult {
        let class = self.asset_class;
        CategoryResult {
            asset_class: class,
            funds_analyzed: 0,
            total_invested: Decimal::ZERO,
            current_value: Decimal::ZERO,
            blended_xirr: 0.0,
            benchmark_xirr: self.config.benchmarks.for_asset_class(class),
            recommendation: no_exposure_recommendation(class).to_string(),
            recommended_funds: self.config.marquee_funds.for_asset_class(class),
            action_required: true,
            positions: Vec::new(),
            metal_split: (class == AssetClass::PreciousMetals).then(MetalSplit::default),
        }
    }
}

impl std::fmt::Debug for CategoryAnalyzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryAnalyzer")
            .field("asset_class", &self.asset_class)
            .field("as_of", &self.as_of)
            .finish_non_exhaustive()
    }
}

/// Analyzes one asset class with the rule-based advisor.
#[must_use]
pub fn analyze_category(
    asset_class: AssetClass,
    transactions: &[Transaction],
    funds: &FundBook,
    config: &AnalysisConfig,
    as_of: Date,
) -> CategoryResult {
    CategoryAnalyzer::new(asset_class, config)
        .as_of(as_of)
        .analyze(transactions, funds)
}

fn metal_split(positions: &[FundPosition], total_invested: Decimal) -> MetalSplit {
    if total_invested <= Decimal::ZERO {
        return MetalSplit::default();
    }

    let share = |category: FundCategory| {
        let invested = saturating_sum(
            positions
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.invested),
        );
        percent_of(invested, total_invested)
    };

    MetalSplit {
        gold_pct: share(FundCategory::Gold),
        silver_pct: share(FundCategory::Silver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use finplan_core::Fund;
    use rust_decimal_macros::dec;

    fn as_of() -> Date {
        Date::from_ymd(2025, 3, 31).unwrap()
    }

    fn book() -> FundBook {
        FundBook::new()
            .with_fund(
                Fund::new("EQ_A", "UTI Nifty Index Fund", FundCategory::Equity)
                    .with_current_price(dec!(110)),
            )
            .with_fund(
                Fund::new("EQ_B", "SBI Sensex Index Fund", FundCategory::Equity)
                    .with_current_price(dec!(120)),
            )
            .with_fund(
                Fund::new("GOLD", "Nippon India Gold Savings Fund", FundCategory::Gold)
                    .with_current_price(dec!(112)),
            )
            .with_fund(
                Fund::new("SILVER", "Kotak Silver ETF Fund", FundCategory::Silver)
                    .with_current_price(dec!(109)),
            )
    }

    #[test]
    fn test_capital_weighted_blend() {
        // 100 at +10% and 300 at +20% over one year.
        let txs = vec![
            Transaction::buy(as_of() - 365, "EQ_A", "UTI Nifty Index Fund", dec!(100)),
            Transaction::buy(as_of() - 365, "EQ_B", "SBI Sensex Index Fund", dec!(300)),
        ];

        let result = analyze_category(
            AssetClass::Equity,
            &txs,
            &book(),
            &AnalysisConfig::default(),
            as_of(),
        );

        assert_eq!(result.funds_analyzed, 2);
        assert_eq!(result.total_invested, dec!(400));
        assert_eq!(result.current_value, dec!(470));
        assert_relative_eq!(result.blended_xirr, 17.5, epsilon = 1e-6);
        assert!((result.blended_xirr - 15.0).abs() > 1.0);
        assert!(!result.action_required);
        assert!(result.metal_split.is_none());
        assert!(result.recommendation.contains("performing well"));
        assert_eq!(result.recommended_funds.len(), 3);
    }

    #[test]
    fn test_underperformance_flags_action() {
        let txs = vec![Transaction::buy(
            as_of() - 365,
            "EQ_A",
            "UTI Nifty Index Fund",
            dec!(1000),
        )];

        let result = analyze_category(
            AssetClass::Equity,
            &txs,
            &book(),
            &AnalysisConfig::default(),
            as_of(),
        );

        assert_relative_eq!(result.blended_xirr, 10.0, epsilon = 1e-6);
        assert_relative_eq!(result.performance_gap(), -2.0, epsilon = 1e-6);
        assert!(result.action_required);
        assert!(result.recommendation.contains("underperforming"));
    }

    #[test]
    fn test_no_exposure() {
        let config = AnalysisConfig::default();
        let result = analyze_category(AssetClass::Debt, &[], &book(), &config, as_of());

        assert!(result.is_empty());
        assert_eq!(result.total_invested, Decimal::ZERO);
        assert_relative_eq!(result.blended_xirr, 0.0);
        assert_relative_eq!(result.benchmark_xirr, 7.5);
        assert!(result.action_required);
        assert_eq!(result.recommendation, no_exposure_recommendation(AssetClass::Debt));
        assert_eq!(result.recommended_funds, config.marquee_funds.debt);
    }

    #[test]
    fn test_precious_metal_balanced_split() {
        let txs = vec![
            Transaction::buy(as_of() - 365, "GOLD", "Nippon India Gold Savings Fund", dec!(500)),
            Transaction::buy(as_of() - 365, "SILVER", "Kotak Silver ETF Fund", dec!(500)),
        ];

        let result = analyze_category(
            AssetClass::PreciousMetals,
            &txs,
            &book(),
            &AnalysisConfig::default(),
            as_of(),
        );

        let split = result.metal_split.unwrap();
        assert_relative_eq!(split.gold_pct, 50.0, epsilon = 1e-9);
        assert_relative_eq!(split.silver_pct, 50.0, epsilon = 1e-9);
        // 12% and 9% on equal capital.
        assert_relative_eq!(result.blended_xirr, 10.5, epsilon = 1e-6);
        assert_relative_eq!(result.benchmark_xirr, 8.5);
        assert!(!result.action_required);
        assert!(result.recommendation.starts_with("Maintain a 50:50"));
        assert_eq!(result.recommended_funds.len(), 5);
    }

    #[test]
    fn test_precious_metal_skewed_split_flags_action() {
        let txs = vec![
            Transaction::buy(as_of() - 365, "GOLD", "Nippon India Gold Savings Fund", dec!(900)),
            Transaction::buy(as_of() - 365, "SILVER", "Kotak Silver ETF Fund", dec!(100)),
        ];

        let result = analyze_category(
            AssetClass::PreciousMetals,
            &txs,
            &book(),
            &AnalysisConfig::default(),
            as_of(),
        );

        assert!(result.blended_xirr > result.benchmark_xirr);
        assert_relative_eq!(result.metal_split.unwrap().gold_pct, 90.0, epsilon = 1e-9);
        assert!(result.action_required);
    }

    #[test]
    fn test_idempotent() {
        let txs = vec![
            Transaction::buy(as_of() - 400, "EQ_A", "UTI Nifty Index Fund", dec!(250)),
            Transaction::sell(as_of() - 100, "EQ_A", "UTI Nifty Index Fund", dec!(50)),
            Transaction::buy(as_of() - 200, "EQ_B", "SBI Sensex Index Fund", dec!(75)),
        ];
        let config = AnalysisConfig::default();
        let analyzer = CategoryAnalyzer::new(AssetClass::Equity, &config).as_of(as_of());

        let first = analyzer.analyze(&txs, &book());
        let second = analyzer.analyze(&txs, &book());
        assert_eq!(first, second);
        assert_eq!(first.blended_xirr.to_bits(), second.blended_xirr.to_bits());
    }

    #[test]
    fn test_custom_advisor() {
        struct Quiet;
        impl Advisor for Quiet {
            fn category_advice(&self, _: &CategoryAdviceInput<'_>) -> String {
                "quiet".into()
            }
            fn allocation_advice(&self, _: &crate::analysis::AllocationAnalysis) -> String {
                String::new()
            }
            fn portfolio_advice(&self, _: &crate::advice::PortfolioAdviceInput<'_>) -> String {
                String::new()
            }
        }

        let txs = vec![Transaction::buy(
            as_of() - 365,
            "EQ_A",
            "UTI Nifty Index Fund",
            dec!(10),
        )];
        let config = AnalysisConfig::default();
        let result = CategoryAnalyzer::new(AssetClass::Equity, &config)
            .with_advisor(&Quiet)
            .as_of(as_of())
            .analyze(&txs, &book());

        assert_eq!(result.recommendation, "quiet");
    }
}
