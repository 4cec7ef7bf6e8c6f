//! Configuration for portfolio analysis.
//!
//! Every constant the engine depends on lives in [`AnalysisConfig`] so tests
//! and callers can override it. Defaults reproduce the standard tables.

mod allocation;
mod marquee;
mod validation;

pub use allocation::{AllocationTable, AllocationTarget};
pub use marquee::MarqueeFunds;
pub use validation::{Validate, ValidationError};

use std::path::Path;

use finplan_core::{AssetClass, FundCategory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::returns::XirrSolver;
use validation::check_non_negative;

// =============================================================================
// BENCHMARKS
// =============================================================================

/// Fixed annual benchmark returns in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRates {
    /// Equity benchmark.
    #[serde(default = "default_equity_benchmark")]
    pub equity: f64,
    /// Debt benchmark.
    #[serde(default = "default_debt_benchmark")]
    pub debt: f64,
    /// Hybrid benchmark.
    #[serde(default = "default_hybrid_benchmark")]
    pub hybrid: f64,
    /// Gold benchmark.
    #[serde(default = "default_gold_benchmark")]
    pub gold: f64,
    /// Silver benchmark.
    #[serde(default = "default_silver_benchmark")]
    pub silver: f64,
    /// Combined gold and silver benchmark.
    #[serde(default = "default_precious_metals_benchmark")]
    pub precious_metals: f64,
}

impl Default for BenchmarkRates {
    fn default() -> Self {
        Self {
            equity: default_equity_benchmark(),
            debt: default_debt_benchmark(),
            hybrid: default_hybrid_benchmark(),
            gold: default_gold_benchmark(),
            silver: default_silver_benchmark(),
            precious_metals: default_precious_metals_benchmark(),
        }
    }
}

impl BenchmarkRates {
    /// Benchmark for a single fund category.
    #[must_use]
    pub fn for_category(&self, category: FundCategory) -> f64 {
        match category {
            FundCategory::Equity => self.equity,
            FundCategory::Debt => self.debt,
            FundCategory::Hybrid => self.hybrid,
            FundCategory::Gold => self.gold,
            FundCategory::Silver => self.silver,
        }
    }

    /// Benchmark for an asset class. Precious metals use the blended rate.
    #[must_use]
    pub fn for_asset_class(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Hybrid => self.hybrid,
            AssetClass::PreciousMetals => self.precious_metals,
        }
    }

    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        let rates = [
            ("benchmarks.equity", self.equity),
            ("benchmarks.debt", self.debt),
            ("benchmarks.hybrid", self.hybrid),
            ("benchmarks.gold", self.gold),
            ("benchmarks.silver", self.silver),
            ("benchmarks.precious_metals", self.precious_metals),
        ];
        for (field, rate) in rates {
            if !rate.is_finite() {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("must be finite, got {rate}"),
                    "finite",
                ));
            }
        }
    }
}

fn default_equity_benchmark() -> f64 {
    12.0
}

fn default_debt_benchmark() -> f64 {
    7.5
}

fn default_hybrid_benchmark() -> f64 {
    10.0
}

fn default_gold_benchmark() -> f64 {
    8.0
}

fn default_silver_benchmark() -> f64 {
    9.0
}

fn default_precious_metals_benchmark() -> f64 {
    8.5
}

// =============================================================================
// RISK SCORE
// =============================================================================

/// Points added to the risk score for each flagged analysis.
///
/// Defaults sum to 80, not 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Equity flagged.
    #[serde(default = "default_equity_weight")]
    pub equity: u32,
    /// Debt flagged.
    #[serde(default = "default_debt_weight")]
    pub debt: u32,
    /// Hybrid flagged.
    #[serde(default = "default_hybrid_weight")]
    pub hybrid: u32,
    /// Gold/silver flagged.
    #[serde(default = "default_precious_metals_weight")]
    pub precious_metals: u32,
    /// Allocation needs rebalancing.
    #[serde(default = "default_allocation_weight")]
    pub allocation: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            equity: default_equity_weight(),
            debt: default_debt_weight(),
            hybrid: default_hybrid_weight(),
            precious_metals: default_precious_metals_weight(),
            allocation: default_allocation_weight(),
        }
    }
}

impl RiskWeights {
    /// Weight for a flagged asset class.
    #[must_use]
    pub fn for_asset_class(&self, class: AssetClass) -> u32 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Hybrid => self.hybrid,
            AssetClass::PreciousMetals => self.precious_metals,
        }
    }

    /// Highest reachable score.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.equity + self.debt + self.hybrid + self.precious_metals + self.allocation
    }
}

fn default_equity_weight() -> u32 {
    20
}

fn default_debt_weight() -> u32 {
    15
}

fn default_hybrid_weight() -> u32 {
    10
}

fn default_precious_metals_weight() -> u32 {
    10
}

fn default_allocation_weight() -> u32 {
    25
}

// =============================================================================
// ANALYSIS CONFIG
// =============================================================================

/// Configuration for portfolio analysis.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::config::{AnalysisConfig, Validate};
///
/// let config = AnalysisConfig::from_json_str(r#"{"rebalance_threshold": 5.0}"#).unwrap();
/// assert_eq!(config.rebalance_threshold, 5.0);
/// assert_eq!(config.benchmarks.equity, 12.0);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Benchmark rates per category.
    #[serde(default)]
    pub benchmarks: BenchmarkRates,

    /// Suggested alternative funds per category.
    #[serde(default)]
    pub marquee_funds: MarqueeFunds,

    /// Target allocation table.
    #[serde(default)]
    pub allocation_table: AllocationTable,

    /// Largest tolerated absolute allocation gap, in percentage points.
    #[serde(default = "default_rebalance_threshold")]
    pub rebalance_threshold: f64,

    /// Target gold share of precious-metal capital, in percent.
    #[serde(default = "default_gold_target_pct")]
    pub gold_target_pct: f64,

    /// Tolerated deviation of the gold share from target, in percentage points.
    #[serde(default = "default_gold_tolerance_pct")]
    pub gold_tolerance_pct: f64,

    /// Risk score points per flagged analysis.
    #[serde(default)]
    pub risk_weights: RiskWeights,

    /// Unit price used when a fund has no positive current price.
    #[serde(default = "default_fallback_unit_price")]
    pub fallback_unit_price: Decimal,

    /// XIRR solver settings.
    #[serde(default)]
    pub xirr: XirrSolver,

    /// Enable parallel XIRR solving (requires the `parallel` feature).
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum fund count to trigger parallel solving.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            benchmarks: BenchmarkRates::default(),
            marquee_funds: MarqueeFunds::default(),
            allocation_table: AllocationTable::default(),
            rebalance_threshold: default_rebalance_threshold(),
            gold_target_pct: default_gold_target_pct(),
            gold_tolerance_pct: default_gold_tolerance_pct(),
            risk_weights: RiskWeights::default(),
            fallback_unit_price: default_fallback_unit_price(),
            xirr: XirrSolver::default(),
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always solves sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| AnalysisError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Sets the benchmark rates.
    #[must_use]
    pub fn with_benchmarks(mut self, benchmarks: BenchmarkRates) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Sets the marquee fund lists.
    #[must_use]
    pub fn with_marquee_funds(mut self, funds: MarqueeFunds) -> Self {
        self.marquee_funds = funds;
        self
    }

    /// Sets the allocation table.
    #[must_use]
    pub fn with_allocation_table(mut self, table: AllocationTable) -> Self {
        self.allocation_table = table;
        self
    }

    /// Sets the rebalancing threshold.
    #[must_use]
    pub fn with_rebalance_threshold(mut self, threshold: f64) -> Self {
        self.rebalance_threshold = threshold;
        self
    }

    /// Sets the gold target share and tolerated deviation.
    #[must_use]
    pub fn with_gold_target(mut self, target_pct: f64, tolerance_pct: f64) -> Self {
        self.gold_target_pct = target_pct;
        self.gold_tolerance_pct = tolerance_pct;
        self
    }

    /// Sets the risk weights.
    #[must_use]
    pub fn with_risk_weights(mut self, weights: RiskWeights) -> Self {
        self.risk_weights = weights;
        self
    }

    /// Sets the fallback unit price.
    #[must_use]
    pub fn with_fallback_unit_price(mut self, price: Decimal) -> Self {
        self.fallback_unit_price = price;
        self
    }

    /// Sets the XIRR solver.
    #[must_use]
    pub fn with_xirr(mut self, solver: XirrSolver) -> Self {
        self.xirr = solver;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        self.benchmarks.validate_into(&mut errors);
        self.allocation_table.validate_into(&mut errors);
        check_non_negative(&mut errors, "rebalance_threshold", self.rebalance_threshold);
        check_non_negative(&mut errors, "gold_tolerance_pct", self.gold_tolerance_pct);

        if !(0.0..=100.0).contains(&self.gold_target_pct) {
            errors.push(ValidationError::with_rule(
                "gold_target_pct",
                format!("must be within 0..=100, got {}", self.gold_target_pct),
                "range",
            ));
        }
        if self.fallback_unit_price < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "fallback_unit_price",
                format!("must be non-negative, got {}", self.fallback_unit_price),
                "non_negative",
            ));
        }
        errors.extend(self.xirr.validate());

        errors
    }
}

fn default_rebalance_threshold() -> f64 {
    10.0
}

fn default_gold_target_pct() -> f64 {
    50.0
}

fn default_gold_tolerance_pct() -> f64 {
    15.0
}

fn default_fallback_unit_price() -> Decimal {
    dec!(100)
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_default() {
        let config = AnalysisConfig::default();
        assert_relative_eq!(config.benchmarks.equity, 12.0);
        assert_relative_eq!(config.benchmarks.precious_metals, 8.5);
        assert_relative_eq!(config.rebalance_threshold, 10.0);
        assert_relative_eq!(config.gold_target_pct, 50.0);
        assert_relative_eq!(config.gold_tolerance_pct, 15.0);
        assert_eq!(config.fallback_unit_price, dec!(100));
        assert_eq!(config.risk_weights.max_score(), 80);
        assert_eq!(config.parallel_threshold, 100);
        assert!(config.is_valid());
    }

    #[test]
    fn test_benchmark_lookup() {
        let rates = BenchmarkRates::default();
        assert_relative_eq!(rates.for_category(FundCategory::Gold), 8.0);
        assert_relative_eq!(rates.for_category(FundCategory::Silver), 9.0);
        assert_relative_eq!(rates.for_asset_class(AssetClass::PreciousMetals), 8.5);
        assert_relative_eq!(rates.for_asset_class(AssetClass::Debt), 7.5);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalysisConfig::new()
            .with_rebalance_threshold(5.0)
            .with_gold_target(60.0, 10.0)
            .with_fallback_unit_price(dec!(10))
            .with_parallel(false)
            .with_threshold(10);

        assert_relative_eq!(config.rebalance_threshold, 5.0);
        assert_relative_eq!(config.gold_target_pct, 60.0);
        assert_eq!(config.fallback_unit_price, dec!(10));
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_should_parallelize() {
        let config = AnalysisConfig::new().with_threshold(100);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(50));
            assert!(config.should_parallelize(100));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(50));
            assert!(!config.should_parallelize(500));
        }

        assert!(!AnalysisConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_from_json_partial() {
        let config = AnalysisConfig::from_json_str(
            r#"{"benchmarks": {"equity": 14.0}, "risk_weights": {"allocation": 30}}"#,
        )
        .unwrap();

        assert_relative_eq!(config.benchmarks.equity, 14.0);
        assert_relative_eq!(config.benchmarks.debt, 7.5);
        assert_eq!(config.risk_weights.allocation, 30);
        assert_eq!(config.risk_weights.equity, 20);
        assert_eq!(config.allocation_table.len(), 18);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let result = AnalysisConfig::from_json_str(r#"{"rebalance_threshold": -1.0}"#);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig { .. })));

        let result = AnalysisConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(AnalysisError::Deserialization(_))));
    }

    #[test]
    fn test_multiple_errors() {
        let config = AnalysisConfig::default()
            .with_rebalance_threshold(-1.0)
            .with_gold_target(150.0, 15.0);

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            config.validate_or_error(),
            Err(AnalysisError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gold_target_pct": 40.0}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_relative_eq!(config.gold_target_pct, 40.0);

        let missing = AnalysisConfig::from_json_file("/nonexistent/finplan.json");
        assert!(matches!(missing, Err(AnalysisError::Io { .. })));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
