//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson for speed, Brent as the fallback once Newton misbehaves.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, central_difference, SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Newton iterations allowed before falling back to Brent.
const NEWTON_ITERATION_BUDGET: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENT_STEPS: u32 = 3;

/// Newton steps larger than this are treated as divergence.
const MAX_STEP: f64 = 1e10;

/// Bracket expansion rounds.
const BRACKET_EXPANSIONS: u32 = 50;

/// Hybrid root-finding algorithm.
///
/// 1. Run Newton-Raphson from `initial_guess` with a short iteration budget
/// 2. Abandon Newton on a vanishing derivative, repeated residual growth, a huge
///    step, or an iterate outside `config.domain`
/// 3. Fall back to Brent over `bounds`, or over a bracket found by
///    [`find_bracket`] when no bounds were given
///
/// # Errors
///
/// Returns the Brent error when the fallback fails, or
/// [`MathError::InvalidInput`] when no bracket could be found.
///
/// # Example
///
/// ```rust
/// use finplan_math::solvers::{hybrid, SolverConfig};
///
/// let f = |r: f64| -1000.0 + 1210.0 / (1.0 + r).powi(2);
/// let df = |r: f64| -2420.0 / (1.0 + r).powi(3);
///
/// let result = hybrid(f, df, 0.05, Some((0.0, 0.5)), &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.10).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_error = match newton_with_monitoring(&f, &df, initial_guess, config) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };
    trace!("newton abandoned at guess {initial_guess}: {newton_error}");

    let (a, b) = match bounds {
        Some(bracket) => bracket,
        None => find_bracket(&f, initial_guess, config).ok_or_else(|| {
            MathError::invalid_input(format!(
                "Newton-Raphson failed ({newton_error}) and no bracketing interval was found"
            ))
        })?,
    };
    brent(&f, a, b, config)
}

/// Newton-Raphson that fails fast on signs of divergence.
fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let budget = config.max_iterations.min(NEWTON_ITERATION_BUDGET);
    let mut x = config.check(initial_guess)?;
    let mut previous_residual = f64::MAX;
    let mut divergent_steps = 0;

    for iteration in 0..budget {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > previous_residual * 2.0 {
            divergent_steps += 1;
            if divergent_steps >= MAX_DIVERGENT_STEPS {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergent_steps = 0;
        }
        previous_residual = residual;

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        if step.abs() > MAX_STEP {
            return Err(MathError::invalid_input("Newton step too large"));
        }
        x = config.check(x - step)?;

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(budget, f(x).abs()))
}

/// Searches for an interval around `initial_guess` on which `f` changes sign.
///
/// Expands symmetrically with a doubling step. When a configured domain
/// boundary would be crossed, that side instead moves halfway to the
/// boundary, so every trial point stays admissible.
pub fn find_bracket<F>(f: &F, initial_guess: f64, config: &SolverConfig) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !config.admits(initial_guess) {
        return None;
    }
    let (lower, upper) = config
        .domain
        .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));

    let f_init = f(initial_guess);
    if !f_init.is_finite() {
        return None;
    }
    if f_init == 0.0 {
        return Some((initial_guess, initial_guess));
    }

    let mut left = initial_guess;
    let mut right = initial_guess;
    let mut delta = 0.1;

    for _ in 0..BRACKET_EXPANSIONS {
        left = if left - delta > lower {
            left - delta
        } else {
            0.5 * (left + lower)
        };
        right = if right + delta < upper {
            right + delta
        } else {
            0.5 * (right + upper)
        };

        let f_left = f(left);
        if f_left.is_finite() && f_left * f_init < 0.0 {
            return Some((left, initial_guess));
        }
        let f_right = f(right);
        if f_right.is_finite() && f_right * f_init < 0.0 {
            return Some((initial_guess, right));
        }

        delta *= 2.0;
        if delta > 1e6 {
            break;
        }
    }

    None
}

/// Hybrid solver with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    hybrid(
        &f,
        |x| central_difference(&f, x),
        initial_guess,
        bounds,
        config,
    )
}
