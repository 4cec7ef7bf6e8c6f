//! Target allocation table keyed by age group and risk profile.

use finplan_core::{AgeGroup, RiskProfile};
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::AllocationSnapshot;

/// Allowed deviation of a target row from 100%.
const TARGET_SUM_TOLERANCE: f64 = 0.01;

/// One cell of the allocation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationTarget {
    /// Investor age band.
    pub age_group: AgeGroup,
    /// Investor risk profile.
    pub risk_profile: RiskProfile,
    /// Target split (sums to 100).
    pub target: AllocationSnapshot,
}

/// Target allocation per (age group, risk profile).
///
/// The default table has all 18 cells. Overridden tables may omit cells;
/// looking one of those up is an error rather than a silent default.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::config::AllocationTable;
/// use finplan_core::{AgeGroup, RiskProfile};
///
/// let table = AllocationTable::default();
/// let target = table.lookup(AgeGroup::From30To40, RiskProfile::Moderate).unwrap();
/// assert_eq!(target.equity, 65.0);
/// assert_eq!(target.debt, 20.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationTable {
    targets: Vec<AllocationTarget>,
}

impl AllocationTable {
    /// Creates a table from explicit cells.
    #[must_use]
    pub fn new(targets: Vec<AllocationTarget>) -> Self {
        Self { targets }
    }

    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Sets (or replaces) one cell.
    #[must_use]
    pub fn with_target(
        mut self,
        age_group: AgeGroup,
        risk_profile: RiskProfile,
        target: AllocationSnapshot,
    ) -> Self {
        self.targets
            .retain(|t| !(t.age_group == age_group && t.risk_profile == risk_profile));
        self.targets.push(AllocationTarget {
            age_group,
            risk_profile,
            target,
        });
        self
    }

    /// Looks up the target split for a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingAllocationTarget`] if the cell is absent.
    pub fn lookup(
        &self,
        age_group: AgeGroup,
        risk_profile: RiskProfile,
    ) -> AnalysisResult<AllocationSnapshot> {
        self.targets
            .iter()
            .find(|t| t.age_group == age_group && t.risk_profile == risk_profile)
            .map(|t| t.target)
            .ok_or(AnalysisError::MissingAllocationTarget {
                age_group,
                risk_profile,
            })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if the table has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterates over the cells.
    pub fn iter(&self) -> impl Iterator<Item = &AllocationTarget> {
        self.targets.iter()
    }

    pub(crate) fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        for (i, cell) in self.targets.iter().enumerate() {
            let field = format!(
                "allocation_table[{}/{}]",
                cell.age_group, cell.risk_profile
            );

            let sum = cell.target.total();
            if (sum - 100.0).abs() > TARGET_SUM_TOLERANCE {
                errors.push(ValidationError::with_rule(
                    field.clone(),
                    format!("target shares sum to {sum}, expected 100"),
                    "sum_to_100",
                ));
            }
            if cell.target.iter().any(|(_, v)| !v.is_finite() || v < 0.0) {
                errors.push(ValidationError::with_rule(
                    field.clone(),
                    "target shares must be finite and non-negative",
                    "non_negative",
                ));
            }
            let duplicated = self.targets[..i].iter().any(|earlier| {
                earlier.age_group == cell.age_group && earlier.risk_profile == cell.risk_profile
            });
            if duplicated {
                errors.push(ValidationError::with_rule(
                    field,
                    "duplicate cell",
                    "unique_cell",
                ));
            }
        }
    }
}

impl Default for AllocationTable {
    fn default() -> Self {
        use AgeGroup::{From20To30, From30To40, From40To50, From50To60, Over60, UpTo20};
        use RiskProfile::{Aggressive, Conservative, Moderate};

        // (age, risk, equity, debt, hybrid, gold/silver)
        let rows = [
            (UpTo20, Conservative, 40.0, 40.0, 15.0, 5.0),
            (UpTo20, Moderate, 60.0, 25.0, 10.0, 5.0),
            (UpTo20, Aggressive, 80.0, 10.0, 5.0, 5.0),
            (From20To30, Conservative, 50.0, 30.0, 15.0, 5.0),
            (From20To30, Moderate, 70.0, 15.0, 10.0, 5.0),
            (From20To30, Aggressive, 85.0, 5.0, 5.0, 5.0),
            (From30To40, Conservative, 45.0, 35.0, 15.0, 5.0),
            (From30To40, Moderate, 65.0, 20.0, 10.0, 5.0),
            (From30To40, Aggressive, 80.0, 10.0, 5.0, 5.0),
            (From40To50, Conservative, 35.0, 45.0, 15.0, 5.0),
            (From40To50, Moderate, 55.0, 30.0, 10.0, 5.0),
            (From40To50, Aggressive, 70.0, 20.0, 5.0, 5.0),
            (From50To60, Conservative, 25.0, 55.0, 15.0, 5.0),
            (From50To60, Moderate, 40.0, 40.0, 15.0, 5.0),
            (From50To60, Aggressive, 55.0, 30.0, 10.0, 5.0),
            (Over60, Conservative, 15.0, 65.0, 15.0, 5.0),
            (Over60, Moderate, 25.0, 55.0, 15.0, 5.0),
            (Over60, Aggressive, 40.0, 40.0, 15.0, 5.0),
        ];

        Self::new(
            rows.iter()
                .map(|&(age_group, risk_profile, eq, dt, hy, pm)| AllocationTarget {
                    age_group,
                    risk_profile,
                    target: AllocationSnapshot::new(eq, dt, hy, pm),
                })
                .collect(),
        )
    }
}
