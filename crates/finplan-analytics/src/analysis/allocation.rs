//! Allocation drift against the age/risk target table.

use finplan_core::{AgeGroup, FundBook, RiskProfile, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

use crate::advice::Advisor;
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::types::AllocationSnapshot;

/// Current vs target split of invested capital for one investor profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationAnalysis {
    /// Investor age band.
    pub age_group: AgeGroup,
    /// Investor risk profile.
    pub risk_profile: RiskProfile,
    /// Share of BUY capital per asset class.
    pub current: AllocationSnapshot,
    /// Target share from the allocation table.
    pub optimal: AllocationSnapshot,
    /// `current - optimal`, signed.
    pub gap: AllocationSnapshot,
    /// True iff the largest absolute gap exceeds the rebalancing threshold.
    pub rebalancing_required: bool,
    /// Advice text.
    pub recommendation: String,
}

impl AllocationAnalysis {
    /// Same as `rebalancing_required`; allocation is flagged only for drift.
    #[must_use]
    pub fn action_required(&self) -> bool {
        self.rebalancing_required
    }

    /// Largest absolute gap in percentage points.
    #[must_use]
    pub fn max_drift(&self) -> f64 {
        self.gap.max_abs()
    }
}

/// Current allocation from BUY transactions.
///
/// BUY quantities are summed by magnitude per asset class (gold and silver
/// share a bucket), matching the aggregator's invested capital.
/// Transactions for unknown funds are ignored. No capital yields all zeros.
#[must_use]
pub fn current_allocation(transactions: &[Transaction], funds: &FundBook) -> AllocationSnapshot {
    AllocationSnapshot::from_amounts(transactions.iter().filter_map(|tx| {
        if tx.transaction_type != TransactionType::Buy {
            return None;
        }
        funds
            .category_of(&tx.fund_code)
            .map(|category| (category.asset_class(), tx.quantity.abs()))
    }))
}

/// Compares the current allocation with the target for a profile.
///
/// # Errors
///
/// Returns [`crate::AnalysisError::MissingAllocationTarget`] if the
/// configured table has no cell for `(age_group, risk_profile)`.
pub fn analyze_allocation(
    transactions: &[Transaction],
    funds: &FundBook,
    age_group: AgeGroup,
    risk_profile: RiskProfile,
    config: &AnalysisConfig,
    advisor: &dyn Advisor,
) -> AnalysisResult<AllocationAnalysis> {
    let optimal = config.allocation_table.lookup(age_group, risk_profile)?;
    let current = current_allocation(transactions, funds);
    let gap = current.gap_from(&optimal);

    let mut analysis = AllocationAnalysis {
        age_group,
        risk_profile,
        current,
        optimal,
        gap,
        rebalancing_required: gap.max_abs() > config.rebalance_threshold,
        recommendation: String::new(),
    };
    analysis.recommendation = advisor.allocation_advice(&analysis);
    Ok(analysis)
}
