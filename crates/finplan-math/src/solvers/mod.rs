//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//! - [`secant`]: Derivative-free, two starting points
//! - [`brent`]: Guaranteed convergence inside a sign-changing bracket
//! - [`hybrid`]: Newton-Raphson with Brent fallback over a supplied or discovered bracket
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When bounds are provided or can be found automatically.
//!
//! # Domains
//!
//! Discount-rate problems are only defined for `r > -1`. A [`SolverConfig`]
//! can carry an open interval; Newton and secant iterates that leave it fail
//! with [`MathError::OutOfDomain`](crate::MathError::OutOfDomain), and the
//! automatic bracket search never evaluates outside it.
//!
//! # Example: annual rate of a two-flow investment
//!
//! ```rust
//! use finplan_math::solvers::{hybrid, SolverConfig};
//!
//! // Invest 1000, receive 1210 two years later.
//! let npv = |r: f64| -1000.0 + 1210.0 / (1.0 + r).powi(2);
//! let d_npv = |r: f64| -2.0 * 1210.0 / (1.0 + r).powi(3);
//!
//! let config = SolverConfig::default().with_domain(-1.0, f64::INFINITY);
//! let result = hybrid(npv, d_npv, 0.10, None, &config).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-10);
//! ```

mod brent;
mod hybrid;
mod newton;
mod secant;

pub use brent::brent;
pub use hybrid::{find_bracket, hybrid, hybrid_numerical};
pub use newton::{newton_raphson, newton_raphson_numerical};
pub use secant::secant;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Step size for central-difference derivatives.
pub(crate) const NUMERICAL_STEP: f64 = 1e-8;

/// Derivatives smaller than this are treated as zero.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on both the residual and the step size.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Open interval `(lower, upper)` that iterates must stay inside.
    pub domain: Option<(f64, f64)>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            domain: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration without a domain restriction.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            domain: None,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Restricts iterates to the open interval `(lower, upper)`.
    #[must_use]
    pub fn with_domain(mut self, lower: f64, upper: f64) -> Self {
        self.domain = Some((lower, upper));
        self
    }

    /// Returns true if `x` is finite and inside the configured domain.
    #[must_use]
    pub fn admits(&self, x: f64) -> bool {
        if !x.is_finite() {
            return false;
        }
        match self.domain {
            Some((lower, upper)) => x > lower && x < upper,
            None => true,
        }
    }

    /// Returns `Ok(x)` if admissible, otherwise the matching error.
    pub(crate) fn check(&self, x: f64) -> MathResult<f64> {
        if self.admits(x) {
            return Ok(x);
        }
        match self.domain {
            Some((lower, upper)) if x.is_finite() => Err(MathError::OutOfDomain { x, lower, upper }),
            _ => Err(MathError::invalid_input(format!("non-finite iterate {x}"))),
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Central-difference derivative of `f`.
pub(crate) fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + NUMERICAL_STEP) - f(x - NUMERICAL_STEP)) / (2.0 * NUMERICAL_STEP)
}
