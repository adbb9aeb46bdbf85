use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Iteration bound shared by every bracketing solve.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Absolute width at which a bracket counts as converged.
pub const DEFAULT_ABS_TOL: Real = 1e-10;

/// Relative width (against the iterate) at which a bracket counts as converged.
pub const DEFAULT_REL_TOL: Real = 1e-12;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative error of `actual` against `expected`, falling back to the
/// absolute error when `expected` is zero.
pub fn relative_error(actual: Real, expected: Real) -> Real {
    let diff = (actual - expected).abs();
    if expected == 0.0 {
        diff
    } else {
        diff / expected.abs()
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Configuration for bounded iterative solves.
///
/// Every iterative search in the workspace takes one of these, so no solve can
/// run unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveConfig {
    /// Maximum iterations before reporting a convergence failure
    pub max_iterations: usize,
    /// Absolute bracket width tolerance
    pub abs_tol: Real,
    /// Relative bracket width tolerance
    pub rel_tol: Real,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
        }
    }
}

impl SolveConfig {
    fn converged(&self, half_width: Real, x: Real) -> bool {
        half_width <= self.abs_tol + self.rel_tol * x.abs()
    }
}

/// Converged root of a bracketed solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: Real,
    pub residual: Real,
    pub iterations: usize,
}

/// Find a root of `f` inside `[lower, upper]` by bisection.
///
/// `f` must change sign over the bracket. Evaluation errors are propagated
/// unchanged; numerical failures are reported as [`CoreError`] converted into
/// the caller's error type.
pub fn bisect<F, E>(
    what: &'static str,
    mut f: F,
    lower: Real,
    upper: Real,
    config: &SolveConfig,
) -> Result<Root, E>
where
    F: FnMut(Real) -> Result<Real, E>,
    E: From<CoreError>,
{
    ensure_finite(lower, what)?;
    ensure_finite(upper, what)?;
    if lower >= upper {
        return Err(CoreError::InvalidArg {
            what: "bracket lower bound must be below upper bound",
        }
        .into());
    }

    let mut a = lower;
    let fa0 = ensure_finite(f(a)?, what)?;
    if fa0 == 0.0 {
        return Ok(Root {
            x: a,
            residual: 0.0,
            iterations: 0,
        });
    }
    let fb0 = ensure_finite(f(upper)?, what)?;
    if fb0 == 0.0 {
        return Ok(Root {
            x: upper,
            residual: 0.0,
            iterations: 0,
        });
    }
    if fa0.signum() == fb0.signum() {
        return Err(CoreError::NoBracket { what, lower, upper }.into());
    }

    let mut fa = fa0;
    let mut b = upper;
    let mut last = fa0;
    for iter in 1..=config.max_iterations {
        let m = 0.5 * (a + b);
        let fm = ensure_finite(f(m)?, what)?;
        last = fm;
        if fm == 0.0 || config.converged(0.5 * (b - a), m) {
            return Ok(Root {
                x: m,
                residual: fm,
                iterations: iter,
            });
        }
        if fm.signum() == fa.signum() {
            a = m;
            fa = fm;
        } else {
            b = m;
        }
    }

    Err(CoreError::Convergence {
        what,
        iterations: config.max_iterations,
        last_iterate: 0.5 * (a + b),
        residual: last,
    }
    .into())
}

/// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
pub fn lerp(x: Real, x0: Real, y0: Real, x1: Real, y1: Real) -> Real {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn relative_error_handles_zero_reference() {
        assert_eq!(relative_error(0.5, 0.0), 0.5);
        assert!((relative_error(101.0, 100.0) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn bisect_finds_square_root() {
        let root = bisect::<_, CoreError>(
            "x^2 - 2",
            |x| Ok(x * x - 2.0),
            0.0,
            2.0,
            &SolveConfig::default(),
        )
        .unwrap();
        assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(root.iterations <= DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn bisect_rejects_unbracketed_root() {
        let err = bisect::<_, CoreError>(
            "x^2 + 1",
            |x| Ok(x * x + 1.0),
            -1.0,
            1.0,
            &SolveConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NoBracket { .. }));
    }

    #[test]
    fn bisect_reports_iteration_bound() {
        let config = SolveConfig {
            max_iterations: 3,
            ..SolveConfig::default()
        };
        let err = bisect::<_, CoreError>("x - 0.3", |x| Ok(x - 0.3), 0.0, 1.0, &config)
            .unwrap_err();
        match err {
            CoreError::Convergence {
                iterations,
                last_iterate,
                residual,
                ..
            } => {
                assert_eq!(iterations, 3);
                assert!((last_iterate - 0.3).abs() < 0.1);
                assert!(residual.abs() < 0.2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bisect_propagates_evaluation_errors() {
        let err = bisect::<_, CoreError>(
            "failing",
            |_| {
                Err(CoreError::InvalidArg {
                    what: "evaluation failed",
                })
            },
            0.0,
            1.0,
            &SolveConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidArg {
                what: "evaluation failed"
            }
        );
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(1.5, 1.0, 10.0, 2.0, 20.0), 15.0);
        assert_eq!(lerp(1.0, 1.0, 10.0, 1.0, 20.0), 10.0);
    }
}
