//! Portfolio analyses.
//!
//! - [`CategoryAnalyzer`]: One asset class against its benchmark
//! - [`analyze_allocation`]: Allocation drift for an investor profile
//! - [`PortfolioCoordinator`]: Everything combined into a [`PortfolioSummary`]

mod allocation;
mod category;
mod summary;

pub use allocation::{analyze_allocation, current_allocation, AllocationAnalysis};
pub use category::{analyze_category, CategoryAnalyzer};
pub use summary::{analyze_portfolio, PortfolioCoordinator, PortfolioSummary, RiskLevel};
