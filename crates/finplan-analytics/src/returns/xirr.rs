//! Annualized internal rate of return over irregularly dated cash flows.
//!
//! Flows are discounted per 365-day year from the first flow's date:
//!
//! ```text
//! NPV(r) = Σ cf_i / (1 + r)^(days_i / 365)
//! ```
//!
//! [`XirrSolver`] finds the root with Newton-Raphson seeded at 10%, falling
//! back to Brent over an automatically found bracket. Other strategies are
//! selectable through [`XirrMethod`]. Rates are confined to `r > -1`. Any
//! failure maps to a neutral `0.0` in [`XirrSolver::xirr`].

use finplan_core::{Date, Transaction, TransactionType};
use finplan_math::solvers::{
    hybrid, hybrid_numerical, newton_raphson, newton_raphson_numerical, secant, SolverConfig,
};
use finplan_math::{MathError, MathResult};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ValidationError;
use crate::types::amount::price_scaled;

/// A dated, signed cash flow from the investor's point of view.
///
/// Negative amounts leave the investor (purchases), positive amounts return
/// to them (redemptions and terminal value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Flow date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
}

impl CashFlow {
    /// Creates a cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Builds the cash-flow series for one fund.
///
/// BUY contributes `-|quantity|`, SELL `+|quantity|`; DIVIDEND records are
/// not cash flows. Flows are sorted by date. A terminal flow of
/// `(BUY - SELL quantity) × price / 100`, dated `as_of`, is appended when
/// positive. `price` falls back to `fallback_price` when `None` or not
/// positive.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::returns::build_fund_cash_flows;
/// use finplan_core::{Date, Transaction};
/// use rust_decimal_macros::dec;
///
/// let as_of = Date::from_ymd(2025, 1, 1).unwrap();
/// let txs = vec![Transaction::buy(as_of - 365, "F", "Fund", dec!(1000))];
///
/// let flows = build_fund_cash_flows(&txs, Some(dec!(110)), dec!(100), as_of);
/// assert_eq!(flows.len(), 2);
/// assert_eq!(flows[0].amount, -1000.0);
/// assert_eq!(flows[1].amount, 1100.0);
/// ```
#[must_use]
pub fn build_fund_cash_flows<'a, I>(
    transactions: I,
    price: Option<Decimal>,
    fallback_price: Decimal,
    as_of: Date,
) -> Vec<CashFlow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut flows = Vec::new();
    let mut units = Decimal::ZERO;

    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Buy => units = units.saturating_add(tx.quantity.abs()),
            TransactionType::Sell => units = units.saturating_sub(tx.quantity.abs()),
            TransactionType::Dividend => continue,
        }
        flows.push(CashFlow::new(tx.date, to_f64(tx.signed_amount())));
    }
    flows.sort_by_key(|cf| cf.date);

    let unit_price = price
        .filter(|price| *price > Decimal::ZERO)
        .unwrap_or(fallback_price);
    let terminal = price_scaled(units, unit_price);
    if terminal > Decimal::ZERO {
        flows.push(CashFlow::new(as_of, to_f64(terminal)));
    }

    flows
}

/// Net present value of `flows` at `rate` (a fraction, not a percentage).
///
/// The first flow's date is the time origin.
#[must_use]
pub fn npv(rate: f64, flows: &[CashFlow]) -> f64 {
    let Some(origin) = flows.first().map(|cf| cf.date) else {
        return 0.0;
    };
    let base = 1.0 + rate;
    flows
        .iter()
        .map(|cf| cf.amount * base.powf(-origin.years_between(&cf.date)))
        .sum()
}

fn npv_derivative(rate: f64, flows: &[CashFlow], origin: Date) -> f64 {
    let base = 1.0 + rate;
    flows
        .iter()
        .map(|cf| {
            let t = origin.years_between(&cf.date);
            -t * cf.amount * base.powf(-t - 1.0)
        })
        .sum()
}

/// Root-finding strategy used by [`XirrSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XirrMethod {
    /// Newton-Raphson with a Brent fallback.
    #[default]
    Hybrid,
    /// Hybrid with a central-difference derivative.
    HybridNumerical,
    /// Newton-Raphson only.
    Newton,
    /// Newton-Raphson with a central-difference derivative.
    NewtonNumerical,
    /// Secant method started at the seed and the seed plus [`SECANT_STEP`].
    Secant,
}

/// Offset of the secant method's second starting point.
pub const SECANT_STEP: f64 = 0.01;

/// Configurable XIRR solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XirrSolver {
    /// Root-finding strategy.
    #[serde(default)]
    pub method: XirrMethod,
    /// Initial rate guess as a fraction.
    #[serde(default = "default_seed")]
    pub seed: f64,
    /// Convergence tolerance on NPV and rate step.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration cap for each solver stage.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Brent fallback bracket as fractions; searched automatically when `None`.
    #[serde(default)]
    pub bounds: Option<(f64, f64)>,
}

impl Default for XirrSolver {
    fn default() -> Self {
        Self {
            method: XirrMethod::default(),
            seed: default_seed(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            bounds: None,
        }
    }
}

impl XirrSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root-finding strategy.
    #[must_use]
    pub fn with_method(mut self, method: XirrMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the initial guess.
    #[must_use]
    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets an explicit Brent fallback bracket (hybrid methods only).
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Solves for the annualized rate in percent.
    ///
    /// # Errors
    ///
    /// - [`MathError::InsufficientData`] with fewer than two flows
    /// - [`MathError::InvalidInput`] when flows never change sign
    /// - Any solver failure (non-convergence, vanishing derivative, domain exit)
    pub fn try_xirr(&self, flows: &[CashFlow]) -> MathResult<f64> {
        if flows.len() < 2 {
            return Err(MathError::insufficient_data(2, flows.len()));
        }
        let has_outflow = flows.iter().any(|cf| cf.amount < 0.0);
        let has_inflow = flows.iter().any(|cf| cf.amount > 0.0);
        if !(has_outflow && has_inflow) {
            return Err(MathError::invalid_input(
                "cash flows must contain both an outflow and an inflow",
            ));
        }

        let origin = flows[0].date;
        let config = SolverConfig::new(self.tolerance, self.max_iterations)
            .with_domain(-1.0, f64::INFINITY);

        let f = |r: f64| npv(r, flows);
        let df = |r: f64| npv_derivative(r, flows, origin);
        let result = match self.method {
            XirrMethod::Hybrid => hybrid(f, df, self.seed, self.bounds, &config),
            XirrMethod::HybridNumerical => hybrid_numerical(f, self.seed, self.bounds, &config),
            XirrMethod::Newton => newton_raphson(f, df, self.seed, &config),
            XirrMethod::NewtonNumerical => newton_raphson_numerical(f, self.seed, &config),
            XirrMethod::Secant => secant(f, self.seed, self.seed + SECANT_STEP, &config),
        }?;

        if !config.admits(result.root) {
            return Err(MathError::OutOfDomain {
                x: result.root,
                lower: -1.0,
                upper: f64::INFINITY,
            });
        }
        Ok(result.root * 100.0)
    }

    /// Solves for the annualized rate in percent, returning `0.0` on failure.
    #[must_use]
    pub fn xirr(&self, flows: &[CashFlow]) -> f64 {
        match self.try_xirr(flows) {
            Ok(rate) => rate,
            Err(e) => {
                debug!("XIRR unavailable for {} flows, using 0.0: {e}", flows.len());
                0.0
            }
        }
    }

    pub(crate) fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.seed.is_finite() || self.seed <= -1.0 {
            errors.push(ValidationError::with_rule(
                "xirr.seed",
                format!("must be a finite rate above -1, got {}", self.seed),
                "domain",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "xirr.tolerance",
                format!("must be positive, got {}", self.tolerance),
                "positive",
            ));
        }
        if self.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "xirr.max_iterations",
                "must be greater than zero",
                "positive",
            ));
        }
        if let Some((lower, upper)) = self.bounds {
            if !(lower.is_finite() && upper.is_finite() && lower > -1.0 && lower < upper) {
                errors.push(ValidationError::with_rule(
                    "xirr.bounds",
                    format!("must satisfy -1 < lower < upper, got ({lower}, {upper})"),
                    "domain",
                ));
            }
        }
        errors
    }
}

/// XIRR in percent with default settings; `0.0` on any failure.
///
/// # Example
///
/// ```rust
/// use finplan_analytics::returns::{xirr, CashFlow};
/// use finplan_core::Date;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let flows = [
///     CashFlow::new(start, -1000.0),
///     CashFlow::new(start.add_days(365), 1100.0),
/// ];
/// assert!((xirr(&flows) - 10.0).abs() < 1e-8);
/// assert_eq!(xirr(&flows[..1]), 0.0);
/// ```
#[must_use]
pub fn xirr(flows: &[CashFlow]) -> f64 {
    XirrSolver::default().xirr(flows)
}

/// XIRR in percent with default settings, exposing the failure.
pub fn try_xirr(flows: &[CashFlow]) -> MathResult<f64> {
    XirrSolver::default().try_xirr(flows)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn default_seed() -> f64 {
    0.10
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rust_decimal_macros::dec;

    fn day0() -> Date {
        Date::from_ymd(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_one_year_ten_percent() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 365, 1100.0),
        ];
        assert_relative_eq!(xirr(&flows), 10.0, epsilon = 1e-8);
    }

    #[test]
    fn test_breakeven_is_zero() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 365, 1000.0),
        ];
        assert_abs_diff_eq!(xirr(&flows), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_single_flow_is_zero() {
        let flows = [CashFlow::new(day0(), -1000.0)];
        assert_eq!(xirr(&flows), 0.0);
        assert!(matches!(
            try_xirr(&flows),
            Err(MathError::InsufficientData { .. })
        ));
        assert_eq!(xirr(&[]), 0.0);
    }

    #[test]
    fn test_no_sign_change_is_zero() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 30, -500.0),
        ];
        assert_eq!(xirr(&flows), 0.0);
        assert!(matches!(
            try_xirr(&flows),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_same_day_flows_are_zero() {
        // Time zero everywhere: NPV is constant in r.
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0(), 1500.0),
        ];
        assert_eq!(xirr(&flows), 0.0);
    }

    #[test]
    fn test_large_short_term_gain() {
        // Doubling in 30 days annualizes to a very large positive rate.
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 30, 2000.0),
        ];
        let rate = xirr(&flows);
        assert!(rate > 1000.0);
        assert_abs_diff_eq!(npv(rate / 100.0, &flows), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_loss() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 365, 700.0),
        ];
        assert_relative_eq!(xirr(&flows), -30.0, epsilon = 1e-8);
    }

    #[test]
    fn test_origin_is_first_flow() {
        // Shifting every date by the same offset leaves the rate unchanged.
        let make = |start: Date| {
            [
                CashFlow::new(start, -500.0),
                CashFlow::new(start + 100, -500.0),
                CashFlow::new(start + 400, 1150.0),
            ]
        };
        let early = xirr(&make(Date::from_ymd(2001, 3, 1).unwrap()));
        let late = xirr(&make(Date::from_ymd(2024, 3, 1).unwrap()));
        assert_relative_eq!(early, late, epsilon = 1e-9);
        assert!(early > 0.0);
    }

    #[test]
    fn test_npv_at_root_is_zero() {
        let flows = [
            CashFlow::new(day0(), -1200.0),
            CashFlow::new(day0() + 90, -300.0),
            CashFlow::new(day0() + 200, 250.0),
            CashFlow::new(day0() + 500, 1500.0),
        ];
        let rate = try_xirr(&flows).unwrap();
        assert_abs_diff_eq!(npv(rate / 100.0, &flows), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iteration_cap_falls_back_to_zero() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 365, 1100.0),
        ];
        let solver = XirrSolver::new().with_max_iterations(1).with_seed(5.0);
        assert!(solver.try_xirr(&flows).is_err());
        assert_eq!(solver.xirr(&flows), 0.0);
    }

    #[test]
    fn test_explicit_bounds() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 365, 1210.0),
        ];
        let solver = XirrSolver::new().with_bounds(0.0, 1.0);
        assert_relative_eq!(solver.xirr(&flows), 21.0, epsilon = 1e-8);
    }

    #[test]
    fn test_build_flows_signs_and_order() {
        let txs = vec![
            Transaction::sell(day0() + 200, "F", "Fund", dec!(300)),
            Transaction::buy(day0(), "F", "Fund", dec!(1000)),
            Transaction::dividend(day0() + 100, "F", "Fund", dec!(50)),
        ];
        let as_of = day0() + 365;
        let flows = build_fund_cash_flows(&txs, None, dec!(100), as_of);

        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0], CashFlow::new(day0(), -1000.0));
        assert_eq!(flows[1], CashFlow::new(day0() + 200, 300.0));
        // 700 units held at the fallback price of 100.
        assert_eq!(flows[2], CashFlow::new(as_of, 700.0));
    }

    #[test]
    fn test_build_flows_no_terminal_when_fully_sold() {
        let txs = vec![
            Transaction::buy(day0(), "F", "Fund", dec!(1000)),
            Transaction::sell(day0() + 100, "F", "Fund", dec!(1000)),
        ];
        let flows = build_fund_cash_flows(&txs, Some(dec!(150)), dec!(100), day0() + 365);
        assert_eq!(flows.len(), 2);
        assert!(flows.iter().all(|cf| cf.date <= day0() + 100));
    }

    #[test]
    fn test_build_flows_zero_price_uses_fallback() {
        let txs = vec![Transaction::buy(day0(), "F", "Fund", dec!(1000))];
        let flows = build_fund_cash_flows(&txs, Some(Decimal::ZERO), dec!(100), day0() + 365);

        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1], CashFlow::new(day0() + 365, 1000.0));
        assert_abs_diff_eq!(xirr(&flows), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_build_flows_huge_quantity_saturates() {
        let txs = vec![
            Transaction::buy(day0(), "F", "Fund", Decimal::MAX),
            Transaction::buy(day0() + 10, "F", "Fund", Decimal::MAX),
        ];
        let flows = build_fund_cash_flows(&txs, Some(dec!(150)), dec!(100), day0() + 365);

        assert_eq!(flows.len(), 3);
        assert!(flows.iter().all(|cf| cf.amount.is_finite()));
    }

    #[test]
    fn test_methods_agree() {
        let flows = [
            CashFlow::new(day0(), -1000.0),
            CashFlow::new(day0() + 90, -300.0),
            CashFlow::new(day0() + 200, 250.0),
            CashFlow::new(day0() + 500, 1500.0),
        ];
        let reference = XirrSolver::new().try_xirr(&flows).unwrap();

        for method in [
            XirrMethod::HybridNumerical,
            XirrMethod::Newton,
            XirrMethod::NewtonNumerical,
            XirrMethod::Secant,
        ] {
            let rate = XirrSolver::new().with_method(method).try_xirr(&flows).unwrap();
            assert_relative_eq!(rate, reference, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_method_serde() {
        let solver: XirrSolver = serde_json::from_str(r#"{"method": "newton_numerical"}"#).unwrap();
        assert_eq!(solver.method, XirrMethod::NewtonNumerical);
        assert_eq!(solver.seed, 0.10);

        let default: XirrSolver = serde_json::from_str("{}").unwrap();
        assert_eq!(default.method, XirrMethod::Hybrid);
    }

    #[test]
    fn test_validate() {
        assert!(XirrSolver::default().validate().is_empty());
        let bad = XirrSolver::new()
            .with_seed(-2.0)
            .with_max_iterations(0)
            .with_bounds(0.5, 0.1);
        assert_eq!(bad.validate().len(), 3);
    }
}
