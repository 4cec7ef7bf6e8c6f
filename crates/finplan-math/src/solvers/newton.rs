//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{central_difference, SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson root-finding algorithm.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)` until either the residual or
/// the step falls below `config.tolerance`. Every iterate is checked against
/// the configured domain.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] when the derivative vanishes
/// - [`MathError::OutOfDomain`] when an iterate leaves the domain
/// - [`MathError::ConvergenceFailed`] when the iteration cap is reached
///
/// # Example
///
/// ```rust
/// use finplan_math::solvers::{newton_raphson, SolverConfig};
///
/// // Rate that grows 100 into 150 over three years.
/// let f = |r: f64| 100.0 * (1.0 + r).powi(3) - 150.0;
/// let df = |r: f64| 300.0 * (1.0 + r).powi(2);
///
/// let result = newton_raphson(f, df, 0.10, &SolverConfig::default()).unwrap();
/// assert!((result.root - (1.5f64.cbrt() - 1.0)).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = config.check(initial_guess)?;
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x = config.check(x - step)?;
        fx = f(x);

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

/// Newton-Raphson with a central-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    newton_raphson(&f, |x| central_difference(&f, x), initial_guess, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_growth_rate() {
        let f = |r: f64| 100.0 * (1.0 + r).powi(3) - 150.0;
        let df = |r: f64| 300.0 * (1.0 + r).powi(2);

        let result = newton_raphson(f, df, 0.10, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.5f64.cbrt() - 1.0, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_fractional_period_discounting() {
        // 1000 grows to 1100 over half a year: annualized rate is 21%.
        let f = |r: f64| -1000.0 + 1100.0 / (1.0 + r).powf(0.5);
        let df = |r: f64| -0.5 * 1100.0 / (1.0 + r).powf(1.5);

        let result = newton_raphson(f, df, 0.10, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.21, epsilon = 1e-9);
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |r: f64| 100.0 * (1.0 + r).powi(2) - 121.0;

        let result = newton_raphson_numerical(f, 0.05, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.10, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_derivative_error() {
        // Flat function: every flow on the same date.
        let f = |_: f64| 5.0;
        let df = |_: f64| 0.0;

        let result = newton_raphson(f, df, 0.10, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_leaves_domain() {
        // Steep overshoot from a far guess lands below -1.
        let f = |r: f64| -1000.0 + 10.0 / (1.0 + r);
        let df = |r: f64| -10.0 / (1.0 + r).powi(2);
        let config = SolverConfig::default().with_domain(-1.0, f64::INFINITY);

        let result = newton_raphson(f, df, 0.10, &config);

        assert!(matches!(result, Err(MathError::OutOfDomain { .. })));
    }

    #[test]
    fn test_iteration_cap() {
        let f = |r: f64| 100.0 * (1.0 + r).powi(3) - 150.0;
        let df = |r: f64| 300.0 * (1.0 + r).powi(2);
        let config = SolverConfig::new(1e-15, 1);

        let result = newton_raphson(f, df, 5.0, &config);

        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
