//! Four-way allocation split across asset classes.

use finplan_core::AssetClass;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::percent_of;

/// Percentages of invested capital per asset class.
///
/// Used for current allocations, target allocations and the signed gap
/// between them. Current and target snapshots sum to 100, or are all zero
/// when there is no capital; gaps sum to zero.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::types::AllocationSnapshot;
///
/// let current = AllocationSnapshot::new(70.0, 10.0, 10.0, 10.0);
/// let target = AllocationSnapshot::new(50.0, 30.0, 15.0, 5.0);
/// let gap = current.gap_from(&target);
///
/// assert_eq!(gap, AllocationSnapshot::new(20.0, -20.0, -5.0, 5.0));
/// assert_eq!(gap.max_abs(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationSnapshot {
    /// Equity share in percent.
    pub equity: f64,
    /// Debt share in percent.
    pub debt: f64,
    /// Hybrid share in percent.
    pub hybrid: f64,
    /// Gold and silver share in percent.
    pub precious_metals: f64,
}

impl AllocationSnapshot {
    /// Creates a snapshot from explicit percentages.
    #[must_use]
    pub const fn new(equity: f64, debt: f64, hybrid: f64, precious_metals: f64) -> Self {
        Self {
            equity,
            debt,
            hybrid,
            precious_metals,
        }
    }

    /// All-zero snapshot.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Builds percentages from per-class amounts.
    ///
    /// Amounts for the same class accumulate. A zero (or negative) grand total
    /// yields [`AllocationSnapshot::zero`].
    #[must_use]
    pub fn from_amounts<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (AssetClass, Decimal)>,
    {
        let mut sums = [Decimal::ZERO; 4];
        for (class, amount) in amounts {
            let slot = &mut sums[Self::index(class)];
            *slot = slot.saturating_add(amount);
        }

        // A grand total beyond Decimal range is split in floating point.
        let shares = match sums
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        {
            Some(total) if total <= Decimal::ZERO => return Self::zero(),
            Some(total) => sums.map(|amount| percent_of(amount, total)),
            None => {
                let amounts = sums.map(|amount| amount.to_f64().unwrap_or(0.0));
                let total: f64 = amounts.iter().sum();
                if total <= 0.0 {
                    return Self::zero();
                }
                amounts.map(|amount| amount / total * 100.0)
            }
        };
        Self::new(shares[0], shares[1], shares[2], shares[3])
    }

    /// Returns the share for one asset class.
    #[must_use]
    pub fn get(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Hybrid => self.hybrid,
            AssetClass::PreciousMetals => self.precious_metals,
        }
    }

    /// Sum of the four shares.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.equity + self.debt + self.hybrid + self.precious_metals
    }

    /// Signed difference `self - target` per class.
    #[must_use]
    pub fn gap_from(&self, target: &Self) -> Self {
        Self::new(
            self.equity - target.equity,
            self.debt - target.debt,
            self.hybrid - target.hybrid,
            self.precious_metals - target.precious_metals,
        )
    }

    /// Largest absolute share.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max)
    }

    /// Iterates `(class, share)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::all().iter().map(move |c| (*c, self.get(*c)))
    }

    fn index(class: AssetClass) -> usize {
        match class {
            AssetClass::Equity => 0,
            AssetClass::Debt => 1,
            AssetClass::Hybrid => 2,
            AssetClass::PreciousMetals => 3,
        }
    }
}
