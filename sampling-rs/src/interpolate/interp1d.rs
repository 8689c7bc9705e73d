use core::fmt;
use core::str::FromStr;

use super::{
    check_nodes, CubicSpline, Interpolant, LinearInterpolant, QuadraticSpline, SplineBoundary,
    StepInterpolant,
};
use crate::error::Error;
use crate::kernel::ExecInvariantViolation;
use itertools::Itertools;

/// Spline order used by [`Interp1d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpKind {
    /// Order-0 spline (previous value hold).
    Zero,
    /// Order-1 spline.
    #[default]
    Linear,
    /// Order-2 spline.
    Quadratic,
    /// Order-3 not-a-knot spline.
    Cubic,
}

impl InterpKind {
    /// All kinds in increasing order.
    pub const ALL: [InterpKind; 4] = [
        InterpKind::Zero,
        InterpKind::Linear,
        InterpKind::Quadratic,
        InterpKind::Cubic,
    ];

    /// Minimum number of distinct nodes the kind can be fitted through.
    pub fn min_points(self) -> usize {
        match self {
            InterpKind::Zero => 1,
            InterpKind::Linear => 2,
            InterpKind::Quadratic => 3,
            InterpKind::Cubic => 4,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            InterpKind::Zero => "zero",
            InterpKind::Linear => "linear",
            InterpKind::Quadratic => "quadratic",
            InterpKind::Cubic => "cubic",
        }
    }
}

impl fmt::Display for InterpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InterpKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidConfig {
                arg: "kind".into(),
                reason: format!("unknown interpolation order `{wanted}`"),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Fitted {
    Zero(StepInterpolant),
    Linear(LinearInterpolant),
    Quadratic(QuadraticSpline),
    Cubic(CubicSpline),
}

/// Fitted 1D interpolant with a constant fill outside the node range,
/// modelled on `scipy.interpolate.interp1d(..., bounds_error=False)`.
///
/// Nodes may arrive in any order; they are sorted before fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Interp1d {
    kind: InterpKind,
    lo: f64,
    hi: f64,
    fill_value: f64,
    fitted: Fitted,
}

impl Interp1d {
    /// Fit `y(x)` with the requested spline order.
    pub fn new(
        x: &[f64],
        y: &[f64],
        kind: InterpKind,
        fill_value: f64,
    ) -> Result<Self, ExecInvariantViolation> {
        if x.len() != y.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "y",
                expected: x.len(),
                got: y.len(),
            });
        }
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .copied()
            .zip(y.iter().copied())
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .unzip();
        if xs.iter().tuple_windows().any(|(a, b)| a == b) {
            return Err(ExecInvariantViolation::DegenerateSampling {
                reason: "interpolation abscissae must be distinct",
            });
        }
        check_nodes(&xs, &ys, kind.min_points())?;

        let (lo, hi) = (xs[0], xs[xs.len() - 1]);
        let fitted = match kind {
            InterpKind::Zero => Fitted::Zero(StepInterpolant::new(&xs, &ys)?),
            InterpKind::Linear => Fitted::Linear(LinearInterpolant::new(&xs, &ys)?),
            InterpKind::Quadratic => Fitted::Quadratic(QuadraticSpline::new(&xs, &ys)?),
            InterpKind::Cubic => {
                Fitted::Cubic(CubicSpline::new(&xs, &ys, SplineBoundary::NotAKnot)?)
            }
        };
        Ok(Self {
            kind,
            lo,
            hi,
            fill_value,
            fitted,
        })
    }

    /// Spline order of the fit.
    pub fn kind(&self) -> InterpKind {
        self.kind
    }

    /// Smallest and largest fitted abscissa.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }
}

impl Interpolant for Interp1d {
    fn evaluate(&self, t: f64) -> f64 {
        if !(self.lo..=self.hi).contains(&t) {
            return self.fill_value;
        }
        match &self.fitted {
            Fitted::Zero(f) => f.evaluate(t),
            Fitted::Linear(f) => f.evaluate(t),
            Fitted::Quadratic(f) => f.evaluate(t),
            Fitted::Cubic(f) => f.evaluate(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fills_outside_bounds() {
        let f = Interp1d::new(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], InterpKind::Linear, 0.0)
            .expect("fit");
        assert_eq!(f.evaluate(-0.1), 0.0);
        assert_eq!(f.evaluate(2.1), 0.0);
        assert_eq!(f.evaluate(f64::NAN), 0.0);
        assert_abs_diff_eq!(f.evaluate(1.5), 2.5);
        assert_eq!(f.bounds(), (0.0, 2.0));
    }

    #[test]
    fn sorts_unordered_nodes() {
        let f = Interp1d::new(&[2.0, 0.0, 1.0], &[30.0, 10.0, 20.0], InterpKind::Zero, -1.0)
            .expect("fit");
        assert_eq!(f.evaluate(0.5), 10.0);
        assert_eq!(f.evaluate(1.2), 20.0);
        assert_eq!(f.evaluate(2.0), 30.0);
    }

    #[test]
    fn each_kind_enforces_its_minimum() {
        for kind in InterpKind::ALL {
            let n = kind.min_points() - 1;
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            if n == 0 {
                assert!(Interp1d::new(&x, &x, kind, 0.0).is_err());
                continue;
            }
            let err = Interp1d::new(&x, &x, kind, 0.0).expect_err("too few nodes");
            assert_eq!(
                err,
                ExecInvariantViolation::InsufficientSamples {
                    required: kind.min_points(),
                    got: n
                }
            );
        }
    }

    #[test]
    fn rejects_duplicate_abscissae() {
        let err = Interp1d::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0], InterpKind::Linear, 0.0)
            .expect_err("duplicate x");
        assert!(matches!(err, ExecInvariantViolation::DegenerateSampling { .. }));
    }

    #[test]
    fn cubic_and_quadratic_track_smooth_data() {
        let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|t| t.sin()).collect();
        for kind in [InterpKind::Quadratic, InterpKind::Cubic] {
            let f = Interp1d::new(&x, &y, kind, 0.0).expect("fit");
            assert_abs_diff_eq!(f.evaluate(2.25), 2.25f64.sin(), epsilon = 0.05);
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Cubic".parse::<InterpKind>().expect("parse"), InterpKind::Cubic);
        assert_eq!(" zero ".parse::<InterpKind>().expect("parse"), InterpKind::Zero);
        assert!("septic".parse::<InterpKind>().is_err());
        assert_eq!(InterpKind::Quadratic.to_string(), "quadratic");
    }
}
