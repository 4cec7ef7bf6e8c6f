//! Per-fund position derived from a transaction history.

use finplan_core::{FundCategory, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fund's aggregated history and its solved rate of return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPosition {
    /// Fund code.
    pub fund_code: String,
    /// Fund display name from the fund book.
    pub fund_name: String,
    /// Category of the fund.
    pub category: FundCategory,
    /// Transactions for this fund, ordered by date.
    pub transactions: Vec<Transaction>,
    /// Sum of BUY quantities.
    pub invested: Decimal,
    /// BUY minus SELL quantities.
    pub units_held: Decimal,
    /// `invested × unit price / 100`.
    pub current_value: Decimal,
    /// Unit price used for valuation (fund price or the fallback).
    pub unit_price: Decimal,
    /// Annualized return in percent; `0.0` when it could not be solved.
    pub xirr: f64,
    /// Benchmark for this fund's own category in percent.
    pub benchmark_xirr: f64,
}

impl FundPosition {
    /// Return in excess of the category benchmark, in percentage points.
    #[must_use]
    pub fn excess_return(&self) -> f64 {
        self.xirr - self.benchmark_xirr
    }

    /// Returns true if this fund lags its category benchmark.
    #[must_use]
    pub fn is_underperforming(&self) -> bool {
        self.xirr < self.benchmark_xirr
    }
}
