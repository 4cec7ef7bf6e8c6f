//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Secant root-finding algorithm.
///
/// Replaces the derivative in Newton's update with the slope through the two
/// most recent iterates. Needs no derivative and no bracket; converges with
/// order ~1.618 near a simple root.
///
/// # Example
///
/// ```rust
/// use finplan_math::solvers::{secant, SolverConfig};
///
/// // 1000 today, 1210 in two years.
/// let f = |r: f64| -1000.0 + 1210.0 / (1.0 + r).powi(2);
///
/// let result = secant(f, 0.05, 0.15, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.10).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut x_prev, mut x_curr) = (config.check(x0)?, config.check(x1)?);
    let (mut f_prev, mut f_curr) = (f(x_prev), f(x_curr));

    for iteration in 0..config.max_iterations {
        if f_curr.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let slope_denominator = f_curr - f_prev;
        if slope_denominator.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero {
                value: slope_denominator,
            });
        }

        let step = f_curr * (x_curr - x_prev) / slope_denominator;
        let x_next = config.check(x_curr - step)?;

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f(x_curr);

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration + 1,
                residual: f_curr,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}
