//! Interpolation strategies behind [`super::ReconstructionMethod`].

use core::f64::consts::PI;

use crate::interpolate::{
    BarycentricLagrange, CubicSpline, Interpolant, LinearInterpolant, SplineBoundary,
    StepInterpolant,
};
use crate::kernel::ExecInvariantViolation;

/// One way of turning samples back into a continuous estimate.
///
/// `times` are strictly increasing and hold at least two entries; `out` has
/// the length of `query`.
pub trait ReconstructionStrategy {
    /// Evaluate the estimate at every `query` time into `out`.
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation>;
}

/// Normalized sinc, `sin(pi x) / (pi x)` with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let px = PI * x;
    px.sin() / px
}

/// Whittaker-Shannon interpolation with period `t[1] - t[0]`.
///
/// Every output point sums over every sample.
///
/// Samples picked from a dense grid by index truncation sit up to one grid
/// step off the ideal lattice while `T` comes from the first pair only. Near
/// the Nyquist rate this jitter leaves an error floor of a few percent of
/// the amplitude even away from the edges; it shrinks once the rate reaches
/// about four times the highest frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SincStrategy;

impl ReconstructionStrategy for SincStrategy {
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        let period = times[1] - times[0];
        out.iter_mut().zip(query.iter()).for_each(|(o, &t)| {
            *o = times
                .iter()
                .zip(values.iter())
                .map(|(&ti, &vi)| vi * sinc((t - ti) / period))
                .sum();
        });
        Ok(())
    }
}

/// Holds the most recent sample; queries before the first sample take the
/// first sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroOrderHoldStrategy;

impl ReconstructionStrategy for ZeroOrderHoldStrategy {
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        StepInterpolant::new(times, values)?.evaluate_into(query, out);
        Ok(())
    }
}

/// Straight lines between samples, flat beyond the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearStrategy;

impl ReconstructionStrategy for LinearStrategy {
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        LinearInterpolant::new(times, values)?.evaluate_into(query, out);
        Ok(())
    }
}

/// Cubic spline through every sample, extrapolated from the end pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CubicSplineStrategy {
    /// End condition of the spline.
    pub boundary: SplineBoundary,
}

impl ReconstructionStrategy for CubicSplineStrategy {
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        CubicSpline::new(times, values, self.boundary)?.evaluate_into(query, out);
        Ok(())
    }
}

/// The single polynomial of degree `n - 1` through all `n` samples.
///
/// Equispaced samples make it oscillate wildly near the ends (Runge
/// phenomenon) once `n` grows past a handful of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LagrangeStrategy;

impl ReconstructionStrategy for LagrangeStrategy {
    fn reconstruct(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        BarycentricLagrange::new(times, values)?.evaluate_into(query, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sinc_is_one_at_zero_and_vanishes_at_integers() {
        assert_eq!(sinc(0.0), 1.0);
        for k in 1..5 {
            assert_abs_diff_eq!(sinc(k as f64), 0.0, epsilon = 1e-15);
            assert_abs_diff_eq!(sinc(-(k as f64)), 0.0, epsilon = 1e-15);
        }
        assert_abs_diff_eq!(sinc(0.5), 2.0 / PI, epsilon = 1e-15);
    }

    #[test]
    fn sinc_passes_through_samples() {
        let times = [0.0, 0.1, 0.2, 0.3];
        let values = [1.0, -2.0, 0.5, 3.0];
        let mut out = [0.0; 4];
        SincStrategy
            .reconstruct(&times, &values, &times, &mut out)
            .expect("sinc");
        for (o, v) in out.iter().zip(values.iter()) {
            assert_abs_diff_eq!(o, v, epsilon = 1e-12);
        }
    }

    #[test]
    fn lagrange_reproduces_polynomials() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let values: Vec<f64> = times.iter().map(|t| t * t * t - 2.0 * t).collect();
        let query = [0.5, 1.5, 2.75];
        let mut out = [0.0; 3];
        LagrangeStrategy
            .reconstruct(&times, &values, &query, &mut out)
            .expect("lagrange");
        for (o, t) in out.iter().zip(query.iter()) {
            assert_abs_diff_eq!(*o, t * t * t - 2.0 * t, epsilon = 1e-10);
        }
    }
}
