//! # Finplan Analytics
//!
//! Portfolio analysis over mutual fund transaction histories.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every analysis is a function of its inputs; nothing is cached
//! - **Neutral fallbacks**: A fund whose XIRR cannot be solved reports `0.0`
//!   rather than failing the whole report
//! - **Config-driven constants**: Benchmarks, target allocations, thresholds and
//!   risk weights live in [`AnalysisConfig`]
//! - **Pluggable narration**: Recommendation text comes from an [`Advisor`];
//!   numbers never depend on it
//!
//! ## Quick Start
//!
//! ```rust
//! use finplan_analytics::prelude::*;
//! use finplan_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let as_of = Date::from_ymd(2025, 4, 1).unwrap();
//! let funds = FundBook::new()
//!     .with_fund(Fund::new("UTI_NIFTY", "UTI Nifty Index Fund", FundCategory::Equity)
//!         .with_current_price(dec!(150.25)))
//!     .with_fund(Fund::new("HDFC_DEBT", "HDFC Short Term Debt Fund", FundCategory::Debt)
//!         .with_current_price(dec!(108)));
//! let txs = vec![
//!     Transaction::buy(as_of - 730, "UTI_NIFTY", "UTI Nifty Index Fund", dec!(5000)),
//!     Transaction::buy(as_of - 365, "HDFC_DEBT", "HDFC Short Term Debt Fund", dec!(3000)),
//! ];
//!
//! let config = AnalysisConfig::default();
//! let summary = PortfolioCoordinator::new(&config)
//!     .as_of(as_of)
//!     .analyze(&txs, &funds, AgeGroup::From30To40, RiskProfile::Moderate)?;
//!
//! assert_eq!(summary.total_invested, dec!(8000));
//! assert!(summary.equity.blended_xirr > 20.0);
//! # Ok::<(), finplan_analytics::AnalysisError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`returns`] - XIRR solving and capital-weighted blending
//! - [`aggregation`] - Per-fund positions from transactions
//! - [`analysis`] - Category, allocation and portfolio analyses
//! - [`advice`] - Recommendation text
//! - [`config`] - Overridable constants and validation
//! - [`types`] - Result value types
//!
//! ## Feature Flags
//!
//! - `parallel`: Solve per-fund XIRRs with rayon for large portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod advice;
pub mod aggregation;
pub mod analysis;
pub mod config;
pub mod error;
pub mod returns;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};

pub use advice::{Advisor, RuleBasedAdvisor};
pub use analysis::{
    analyze_allocation, analyze_category, analyze_portfolio, AllocationAnalysis,
    CategoryAnalyzer, PortfolioCoordinator, PortfolioSummary, RiskLevel,
};
pub use config::{AnalysisConfig, Validate};
pub use returns::{capital_weighted_rate, xirr, CashFlow, XirrMethod, XirrSolver};
pub use types::{AllocationSnapshot, CategoryResult, FundPosition, MetalSplit};

/// Prelude module for convenient imports.
///
/// ```rust
/// use finplan_analytics::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{AnalysisError, AnalysisResult};

    // Config
    pub use crate::config::{
        AllocationTable, AnalysisConfig, BenchmarkRates, MarqueeFunds, RiskWeights, Validate,
    };

    // Returns
    pub use crate::returns::{
        build_fund_cash_flows, capital_weighted_rate, CashFlow, XirrMethod, XirrSolver,
    };

    // Analyses
    pub use crate::analysis::{
        analyze_allocation, analyze_category, analyze_portfolio, AllocationAnalysis,
        CategoryAnalyzer, PortfolioCoordinator, PortfolioSummary, RiskLevel,
    };

    // Advice
    pub use crate::advice::{Advisor, RuleBasedAdvisor};

    // Types
    pub use crate::types::{AllocationSnapshot, CategoryResult, FundPosition, MetalSplit};
}
