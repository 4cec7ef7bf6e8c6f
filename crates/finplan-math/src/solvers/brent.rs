//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Keeps a bracket `[b, c]` with `f(b)·f(c) ≤ 0` and at each step takes an
/// inverse quadratic (or secant) step when it stays well inside the bracket,
/// otherwise bisects. Always converges when the initial bracket is valid.
///
/// Requires `f(a) · f(b) ≤ 0`. The domain in `config` is not consulted: the
/// bracket itself bounds every evaluation.
///
/// # Example
///
/// ```rust
/// use finplan_math::solvers::{brent, SolverConfig};
///
/// // Invest 1000, receive 800 after one year.
/// let f = |r: f64| -1000.0 + 800.0 / (1.0 + r);
///
/// let result = brent(f, -0.9, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.root + 0.20).abs() < 1e-9);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));

    if !fa.is_finite() || !fb.is_finite() || fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // c is the contrapoint: f(b) and f(c) always have opposite signs.
    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let midpoint = 0.5 * (c - b);

        if fb.abs() < config.tolerance || midpoint.abs() <= tol {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step.
                (2.0 * midpoint * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation.
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * midpoint * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let interpolation_limit = 3.0 * midpoint * q - (tol * q).abs();
            let previous_limit = (e * q).abs();
            if 2.0 * p < interpolation_limit.min(previous_limit) {
                e = d;
                d = p / q;
            } else {
                d = midpoint;
                e = d;
            }
        } else {
            d = midpoint;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else {
            tol.copysign(midpoint)
        };
        fb = f(b);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}
