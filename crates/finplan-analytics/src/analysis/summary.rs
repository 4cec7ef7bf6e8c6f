//! Portfolio-level summary combining every analysis.

use std::fmt;

use finplan_core::{AgeGroup, AssetClass, Date, FundBook, RiskProfile, Transaction};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{analyze_allocation, AllocationAnalysis, CategoryAnalyzer};
use crate::advice::{
    format_action_item, Advisor, PortfolioAdviceInput, RuleBasedAdvisor, ALLOCATION_LABEL,
};
use crate::aggregation::unknown_fund_codes;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::returns::capital_weighted_rate;
use crate::types::amount::{percent_of, saturating_sum};
use crate::types::CategoryResult;

static DEFAULT_ADVISOR: RuleBasedAdvisor = RuleBasedAdvisor;

// =============================================================================
// RISK LEVEL
// =============================================================================

/// Coarse band of the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score up to 20.
    Low,
    /// Score up to 50.
    Moderate,
    /// Score above 50.
    High,
}

impl RiskLevel {
    /// Bands a risk score.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=20 => Self::Low,
            21..=50 => Self::Moderate,
            _ => Self::High,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// PORTFOLIO SUMMARY
// =============================================================================

/// Result of a full portfolio analysis for one investor profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Investor age band.
    pub age_group: AgeGroup,
    /// Investor risk profile.
    pub risk_profile: RiskProfile,
    /// Valuation date.
    pub as_of: Date,

    /// Sum of the four categories' invested capital.
    pub total_invested: Decimal,
    /// Sum of the four categories' current value.
    pub current_value: Decimal,
    /// `current_value - total_invested`.
    pub gain_loss: Decimal,
    /// Gain or loss as a percentage of invested capital; `0.0` when nothing is invested.
    pub gain_loss_pct: f64,
    /// Capital-weighted blend of the categories' XIRRs, in percent.
    pub overall_xirr: f64,

    /// Equity analysis.
    pub equity: CategoryResult,
    /// Debt analysis.
    pub debt: CategoryResult,
    /// Hybrid analysis.
    pub hybrid: CategoryResult,
    /// Gold/silver analysis.
    pub precious_metals: CategoryResult,
    /// Allocation drift analysis.
    pub allocation: AllocationAnalysis,

    /// Sum of risk weights for every flagged analysis.
    pub risk_score: u32,
    /// Highest score the configured weights can reach.
    pub max_risk_score: u32,
    /// Band of `risk_score`.
    pub risk_level: RiskLevel,

    /// One entry per flagged analysis, in report order.
    pub action_items: Vec<String>,
    /// Overall advice text.
    pub overall_recommendation: String,
    /// Fund codes referenced by transactions but absent from the fund book.
    pub unknown_fund_codes: Vec<String>,
}

impl PortfolioSummary {
    /// The four category results in report order.
    #[must_use]
    pub fn categories(&self) -> [&CategoryResult; 4] {
        [&self.equity, &self.debt, &self.hybrid, &self.precious_metals]
    }

    /// Result for one asset class.
    #[must_use]
    pub fn category(&self, class: AssetClass) -> &CategoryResult {
        match class {
            AssetClass::Equity => &self.equity,
            AssetClass::Debt => &self.debt,
            AssetClass::Hybrid => &self.hybrid,
            AssetClass::PreciousMetals => &self.precious_metals,
        }
    }

    /// Total number of funds analyzed across categories.
    #[must_use]
    pub fn funds_analyzed(&self) -> usize {
        self.categories().iter().map(|c| c.funds_analyzed).sum()
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Runs the four category analyses and the allocation analysis over one
/// dataset and combines them.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::analysis::PortfolioCoordinator;
/// use finplan_analytics::config::AnalysisConfig;
/// use finplan_core::{AgeGroup, Date, Fund, FundBook, FundCategory, RiskProfile, Transaction};
/// use rust_decimal_macros::dec;
///
/// let as_of = Date::from_ymd(2025, 1, 1).unwrap();
/// let funds = FundBook::new()
///     .with_fund(Fund::new("EQ", "Index Fund", FundCategory::Equity).with_current_price(dec!(115)));
/// let txs = vec![Transaction::buy(as_of - 365, "EQ", "Index Fund", dec!(1000))];
///
/// let config = AnalysisConfig::default();
/// let summary = PortfolioCoordinator::new(&config)
///     .as_of(as_of)
///     .analyze(&txs, &funds, AgeGroup::From30To40, RiskProfile::Moderate)
///     .unwrap();
///
/// assert_eq!(summary.total_invested, dec!(1000));
/// assert!((summary.overall_xirr - 15.0).abs() < 1e-6);
/// ```
#[derive(Clone, Copy)]
pub struct PortfolioCoordinator<'a> {
    config: &'a AnalysisConfig,
    advisor: &'a dyn Advisor,
    as_of: Date,
}

impl<'a> PortfolioCoordinator<'a> {
    /// Creates a coordinator valuing holdings as of today with the rule-based advisor.
    #[must_use]
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            advisor: &DEFAULT_ADVISOR,
            as_of: Date::today(),
        }
    }

    /// Sets the advisor used for every recommendation text.
    #[must_use]
    pub fn with_advisor(mut self, advisor: &'a dyn Advisor) -> Self {
        self.advisor = advisor;
        self
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn as_of(mut self, date: Date) -> Self {
        self.as_of = date;
        self
    }

    /// Analyzes a portfolio for one investor profile.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyPortfolio`] if `transactions` is empty
    /// - [`AnalysisError::MissingAllocationTarget`] if the allocation table
    ///   has no cell for the profile
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        funds: &FundBook,
        age_group: AgeGroup,
        risk_profile: RiskProfile,
    ) -> AnalysisResult<PortfolioSummary> {
        if transactions.is_empty() {
            return Err(AnalysisError::EmptyPortfolio);
        }

        let unknown: Vec<String> = unknown_fund_codes(transactions, funds).into_iter().collect();
        for code in &unknown {
            warn!("transactions reference unknown fund {code}; excluded from analysis");
        }

        let allocation = analyze_allocation(
            transactions,
            funds,
            age_group,
            risk_profile,
            self.config,
            self.advisor,
        )?;

        let analyze = |class: AssetClass| {
            CategoryAnalyzer::new(class, self.config)
                .with_advisor(self.advisor)
                .as_of(self.as_of)
                .analyze(transactions, funds)
        };
        let equity = analyze(AssetClass::Equity);
        let debt = analyze(AssetClass::Debt);
        let hybrid = analyze(AssetClass::Hybrid);
        let precious_metals = analyze(AssetClass::PreciousMetals);

        let categories = [&equity, &debt, &hybrid, &precious_metals];
        let total_invested = saturating_sum(categories.iter().map(|c| c.total_invested));
        let current_value = saturating_sum(categories.iter().map(|c| c.current_value));
        let overall_xirr =
            capital_weighted_rate(categories.iter().map(|c| (c.blended_xirr, c.total_invested)));

        let weights = &self.config.risk_weights;
        let mut risk_score = 0;
        let mut action_items = Vec::new();
        for result in categories {
            if result.action_required {
                risk_score += weights.for_asset_class(result.asset_class);
                action_items.push(format_action_item(
                    result.asset_class.name(),
                    &result.recommendation,
                ));
            }
        }
        if allocation.action_required() {
            risk_score += weights.allocation;
            action_items.push(format_action_item(
                ALLOCATION_LABEL,
                &allocation.recommendation,
            ));
        }

        let overall_recommendation = self.advisor.portfolio_advice(&PortfolioAdviceInput {
            total_invested,
            current_value,
            overall_xirr,
            risk_score,
            max_risk_score: weights.max_score(),
            action_items: &action_items,
        });

        let gain_loss = current_value.saturating_sub(total_invested);
        let gain_loss_pct = percent_of(gain_loss, total_invested);

        let risk_level = RiskLevel::from_score(risk_score);
        info!(
            "analyzed {} transactions: invested {total_invested}, xirr {overall_xirr:.2}%, risk {risk_score} ({risk_level})",
            transactions.len()
        );

        Ok(PortfolioSummary {
            age_group,
            risk_profile,
            as_of: self.as_of,
            total_invested,
            current_value,
            gain_loss,
            gain_loss_pct,
            overall_xirr,
            equity,
            debt,
            hybrid,
            precious_metals,
            allocation,
            risk_score,
            max_risk_score: weights.max_score(),
            risk_level,
            action_items,
            overall_recommendation,
            unknown_fund_codes: unknown,
        })
    }
}

impl fmt::Debug for PortfolioCoordinator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortfolioCoordinator")
            .field("as_of", &self.as_of)
            .finish_non_exhaustive()
    }
}

/// Analyzes a portfolio with the rule-based advisor.
///
/// # Errors
///
/// See [`PortfolioCoordinator::analyze`].
pub fn analyze_portfolio(
    transactions: &[Transaction],
    funds: &FundBook,
    age_group: AgeGroup,
    risk_profile: RiskProfile,
    config: &AnalysisConfig,
    as_of: Date,
) -> AnalysisResult<PortfolioSummary> {
    PortfolioCoordinator::new(config)
        .as_of(as_of)
        .analyze(transactions, funds, age_group, risk_profile)
}
