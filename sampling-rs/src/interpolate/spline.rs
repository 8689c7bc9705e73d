//! Piecewise polynomial splines.

use super::{check_nodes, segment, Interpolant};
use crate::kernel::ExecInvariantViolation;
use crate::linalg::solve_tridiagonal;

/// End conditions for [`CubicSpline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplineBoundary {
    /// Third derivative is continuous across the second and penultimate nodes.
    #[default]
    NotAKnot,
    /// Second derivative vanishes at both ends.
    Natural,
}

/// C² cubic spline through strictly increasing nodes.
///
/// Stored as the node values plus the second derivative at every node.
/// Evaluation outside the nodes extends the outermost cubic pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline with the given end conditions.
    ///
    /// Two nodes give the straight line through them. With three nodes the
    /// not-a-knot spline is the single parabola through all of them.
    pub fn new(x: &[f64], y: &[f64], boundary: SplineBoundary) -> Result<Self, ExecInvariantViolation> {
        check_nodes(x, y, 2)?;
        let m = second_derivatives(x, y, boundary)?;
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Second derivative of the spline at each node.
    pub fn second_derivatives(&self) -> &[f64] {
        &self.m
    }
}

fn second_derivatives(
    x: &[f64],
    y: &[f64],
    boundary: SplineBoundary,
) -> Result<Vec<f64>, ExecInvariantViolation> {
    let n = x.len();
    if n == 2 {
        return Ok(vec![0.0; 2]);
    }
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = y
        .windows(2)
        .zip(h.iter())
        .map(|(w, hi)| (w[1] - w[0]) / hi)
        .collect();

    if n == 3 && boundary == SplineBoundary::NotAKnot {
        let curvature = 2.0 * (d[1] - d[0]) / (x[2] - x[0]);
        return Ok(vec![curvature; 3]);
    }

    // Interior equations for m[1..n-1]:
    // h[i-1] m[i-1] + 2 (h[i-1] + h[i]) m[i] + h[i] m[i+1] = 6 (d[i] - d[i-1])
    let size = n - 2;
    let mut diag: Vec<f64> = (1..n - 1).map(|i| 2.0 * (h[i - 1] + h[i])).collect();
    let mut lower: Vec<f64> = (2..n - 1).map(|i| h[i - 1]).collect();
    let mut upper: Vec<f64> = (1..n - 2).map(|i| h[i]).collect();
    let rhs: Vec<f64> = (1..n - 1).map(|i| 6.0 * (d[i] - d[i - 1])).collect();

    if boundary == SplineBoundary::NotAKnot {
        // Eliminate m[0] and m[n-1] through the third-derivative continuity
        // conditions at x[1] and x[n-2].
        let (h0, h1) = (h[0], h[1]);
        diag[0] = 3.0 * h0 + 2.0 * h1 + h0 * h0 / h1;
        upper[0] = h1 - h0 * h0 / h1;
        let (a, b) = (h[n - 3], h[n - 2]);
        diag[size - 1] = 2.0 * a + 3.0 * b + b * b / a;
        lower[size - 2] = a - b * b / a;
    }

    let interior = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;
    let mut m = vec![0.0; n];
    m[1..n - 1].copy_from_slice(interior.as_slice());
    if boundary == SplineBoundary::NotAKnot {
        let (h0, h1) = (h[0], h[1]);
        m[0] = m[1] * (1.0 + h0 / h1) - m[2] * h0 / h1;
        let (a, b) = (h[n - 3], h[n - 2]);
        m[n - 1] = m[n - 2] * (1.0 + b / a) - m[n - 3] * b / a;
    }
    Ok(m)
}

impl Interpolant for CubicSpline {
    fn evaluate(&self, t: f64) -> f64 {
        let i = segment(&self.x, t);
        let h = self.x[i + 1] - self.x[i];
        let a = self.x[i + 1] - t;
        let b = t - self.x[i];
        self.m[i] * a.powi(3) / (6.0 * h)
            + self.m[i + 1] * b.powi(3) / (6.0 * h)
            + (self.y[i] / h - self.m[i] * h / 6.0) * a
            + (self.y[i + 1] / h - self.m[i + 1] * h / 6.0) * b
    }
}

/// C¹ quadratic spline with knots at the nodes.
///
/// The first piece is the parabola through the first three nodes; every
/// following piece inherits the end slope of its predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl QuadraticSpline {
    /// Fit a quadratic spline through at least three nodes.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, ExecInvariantViolation> {
        check_nodes(x, y, 3)?;
        let d: Vec<f64> = x
            .windows(2)
            .zip(y.windows(2))
            .map(|(xw, yw)| (yw[1] - yw[0]) / (xw[1] - xw[0]))
            .collect();
        let curvature = (d[1] - d[0]) / (x[2] - x[0]);
        let mut slopes = Vec::with_capacity(x.len());
        slopes.push(d[0] - curvature * (x[1] - x[0]));
        for di in &d {
            let prev = slopes[slopes.len() - 1];
            slopes.push(2.0 * di - prev);
        }
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }
}

impl Interpolant for QuadraticSpline {
    fn evaluate(&self, t: f64) -> f64 {
        let i = segment(&self.x, t);
        let h = self.x[i + 1] - self.x[i];
        let b = self.slopes[i];
        let c = (self.slopes[i + 1] - b) / (2.0 * h);
        let dx = t - self.x[i];
        self.y[i] + b * dx + c * dx * dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cubic(t: f64) -> f64 {
        0.5 * t.powi(3) - 2.0 * t * t + t - 3.0
    }

    #[test]
    fn not_a_knot_reproduces_cubic_polynomials() {
        let x = [0.0, 0.4, 1.1, 1.5, 2.3, 3.0];
        let y: Vec<f64> = x.iter().map(|&t| cubic(t)).collect();
        let spline = CubicSpline::new(&x, &y, SplineBoundary::NotAKnot).expect("spline");
        for k in 0..=60 {
            let t = -0.5 + k as f64 * 0.0625;
            assert_abs_diff_eq!(spline.evaluate(t), cubic(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn not_a_knot_with_four_nodes_is_the_interpolating_cubic() {
        let x = [0.0, 1.0, 2.5, 4.0];
        let y: Vec<f64> = x.iter().map(|&t| cubic(t)).collect();
        let spline = CubicSpline::new(&x, &y, SplineBoundary::NotAKnot).expect("spline");
        assert_abs_diff_eq!(spline.evaluate(3.2), cubic(3.2), epsilon = 1e-9);
    }

    #[test]
    fn three_nodes_fit_a_single_parabola() {
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 2.0, 10.0]; // 1 + t^2
        let spline = CubicSpline::new(&x, &y, SplineBoundary::NotAKnot).expect("spline");
        assert_abs_diff_eq!(spline.evaluate(2.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.evaluate(0.5), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn two_nodes_fit_a_line() {
        let spline = CubicSpline::new(&[0.0, 2.0], &[1.0, 5.0], SplineBoundary::NotAKnot)
            .expect("spline");
        assert_abs_diff_eq!(spline.evaluate(0.5), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.evaluate(3.0), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn natural_spline_has_zero_end_curvature_and_interpolates() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 1.0, 0.0, -1.0, 0.0];
        let spline = CubicSpline::new(&x, &y, SplineBoundary::Natural).expect("spline");
        let m = spline.second_derivatives();
        assert_abs_diff_eq!(m[0], 0.0);
        assert_abs_diff_eq!(m[4], 0.0);
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            assert_abs_diff_eq!(spline.evaluate(xi), yi, epsilon = 1e-12);
        }
        // Symmetric data gives a symmetric spline about x = 2.
        assert_abs_diff_eq!(spline.evaluate(1.5), -spline.evaluate(2.5), epsilon = 1e-12);
    }

    #[test]
    fn quadratic_spline_reproduces_parabolas() {
        let x = [0.0, 0.5, 1.5, 2.0, 3.5];
        let f = |t: f64| 2.0 * t * t - t + 0.25;
        let y: Vec<f64> = x.iter().map(|&t| f(t)).collect();
        let spline = QuadraticSpline::new(&x, &y).expect("spline");
        for k in 0..=35 {
            let t = k as f64 * 0.1;
            assert_abs_diff_eq!(spline.evaluate(t), f(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn quadratic_spline_needs_three_nodes() {
        let err = QuadraticSpline::new(&[0.0, 1.0], &[0.0, 1.0]).expect_err("two nodes");
        assert_eq!(
            err,
            ExecInvariantViolation::InsufficientSamples {
                required: 3,
                got: 2
            }
        );
    }
}
