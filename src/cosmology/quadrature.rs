use thiserror::Error;

// ---------------------------------------------------------------------------
// Adaptive Simpson quadrature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadratureError {
    #[error("integrand is not finite at x = {x}")]
    NonFinite { x: f64 },

    #[error("no convergence on [{a}, {b}] within the depth limit")]
    NoConvergence { a: f64, b: f64 },
}

/// Recursive Simpson rule with Richardson correction.
///
/// `tolerance` is the absolute error target for the whole interval; it is
/// halved on each bisection.
#[derive(Debug, Clone, Copy)]
pub struct Simpson {
    pub tolerance: f64,
    pub max_depth: u32,
}

impl Default for Simpson {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_depth: 50,
        }
    }
}

impl Simpson {
    /// Integrate `f` over `[a, b]`. Reversed bounds flip the sign.
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        if a == b {
            return Ok(0.0);
        }
        if b < a {
            return self.integrate(f, b, a).map(|v| -v);
        }

        let m = 0.5 * (a + b);
        let fa = eval(&f, a)?;
        let fm = eval(&f, m)?;
        let fb = eval(&f, b)?;
        let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);

        let span = Span { a, b, fa, fm, fb };
        self.refine(&f, span, whole, self.tolerance, self.max_depth)
    }

    fn refine<F>(
        &self,
        f: &F,
        span: Span,
        whole: f64,
        tolerance: f64,
        depth: u32,
    ) -> Result<f64, QuadratureError>
    where
        F: Fn(f64) -> f64,
    {
        let Span { a, b, fa, fm, fb } = span;
        let m = 0.5 * (a + b);
        let flm = eval(f, 0.5 * (a + m))?;
        let frm = eval(f, 0.5 * (m + b))?;
        let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
        let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
        let delta = left + right - whole;

        if delta.abs() <= 15.0 * tolerance {
            return Ok(left + right + delta / 15.0);
        }
        if depth == 0 {
            return Err(QuadratureError::NoConvergence { a, b });
        }

        let lhs = Span { a, b: m, fa, fm: flm, fb: fm };
        let rhs = Span { a: m, b, fa: fm, fm: frm, fb };
        Ok(self.refine(f, lhs, left, 0.5 * tolerance, depth - 1)?
            + self.refine(f, rhs, right, 0.5 * tolerance, depth - 1)?)
    }
}

/// Endpoints and midpoint of one panel with their integrand values.
#[derive(Clone, Copy)]
struct Span {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
}

fn eval<F>(f: &F, x: f64) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(QuadratureError::NonFinite { x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_is_exact() {
        let v = Simpson::default().integrate(|x| x * x, 0.0, 1.0).unwrap();
        assert!((v - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sine_over_half_period() {
        let v = Simpson::default()
            .integrate(f64::sin, 0.0, std::f64::consts::PI)
            .unwrap();
        assert!((v - 2.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn empty_interval_is_zero() {
        let v = Simpson::default().integrate(|x| x.exp(), 2.5, 2.5).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn reversed_bounds_flip_sign() {
        let q = Simpson::default();
        let fwd = q.integrate(|x| x.exp(), 0.0, 1.0).unwrap();
        let rev = q.integrate(|x| x.exp(), 1.0, 0.0).unwrap();
        assert!((fwd + rev).abs() < 1e-12);
        assert!((fwd - (1.0f64.exp() - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn non_finite_integrand_is_reported() {
        let err = Simpson::default()
            .integrate(|x| if x > 0.5 { f64::NAN } else { 1.0 }, 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, QuadratureError::NonFinite { x } if x > 0.5));
    }

    #[test]
    fn depth_limit_is_reported() {
        let q = Simpson {
            tolerance: 1e-300,
            max_depth: 2,
        };
        let err = q.integrate(|x| x.sqrt(), 0.0, 1.0).unwrap_err();
        assert!(matches!(err, QuadratureError::NoConvergence { .. }));
    }
}
