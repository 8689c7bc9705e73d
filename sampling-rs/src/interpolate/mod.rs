//! One-dimensional interpolants analogous to `scipy.interpolate`.
//!
//! Every interpolant is fitted once from strictly increasing nodes and can
//! then be evaluated at arbitrary points through [`Interpolant`]. The
//! reconstruction and gluing kernels in [`crate::signal`] are built on top of
//! these types.

use crate::kernel::ExecInvariantViolation;
use itertools::Itertools;

mod interp1d;
mod lagrange;
mod linear;
mod spline;
mod step;

pub use interp1d::*;
pub use lagrange::*;
pub use linear::*;
pub use spline::*;
pub use step::*;

/// A fitted 1D interpolant.
pub trait Interpolant {
    /// Evaluate the interpolant at `x`.
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the interpolant at every point of `xs` into `out`.
    fn evaluate_into(&self, xs: &[f64], out: &mut [f64]) {
        out.iter_mut()
            .zip(xs.iter())
            .for_each(|(o, &x)| *o = self.evaluate(x));
    }

    /// Evaluate the interpolant at every point of `xs`.
    fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Validate node arrays shared by all interpolants.
pub(crate) fn check_nodes(
    x: &[f64],
    y: &[f64],
    required: usize,
) -> Result<(), ExecInvariantViolation> {
    if x.len() != y.len() {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "y",
            expected: x.len(),
            got: y.len(),
        });
    }
    if x.len() < required {
        return Err(ExecInvariantViolation::InsufficientSamples {
            required,
            got: x.len(),
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "interpolation nodes must be finite",
        });
    }
    if x.iter().tuple_windows().any(|(a, b)| b <= a) {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "interpolation nodes must be strictly increasing",
        });
    }
    Ok(())
}

/// Index `i` of the piece `[x[i], x[i + 1]]` used to evaluate at `t`.
///
/// Points left of the first node map to the first piece and points right of
/// the last node to the last piece. Requires `x.len() >= 2`.
pub(crate) fn segment(x: &[f64], t: f64) -> usize {
    x.partition_point(|&xi| xi <= t)
        .saturating_sub(1)
        .min(x.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_clamps_to_outer_pieces() {
        let x = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(segment(&x, -5.0), 0);
        assert_eq!(segment(&x, 0.0), 0);
        assert_eq!(segment(&x, 1.5), 1);
        assert_eq!(segment(&x, 3.0), 2);
        assert_eq!(segment(&x, 9.0), 2);
    }

    #[test]
    fn check_nodes_reports_each_failure() {
        assert!(matches!(
            check_nodes(&[0.0, 1.0], &[0.0], 2),
            Err(ExecInvariantViolation::LengthMismatch { .. })
        ));
        assert_eq!(
            check_nodes(&[0.0], &[0.0], 2),
            Err(ExecInvariantViolation::InsufficientSamples {
                required: 2,
                got: 1
            })
        );
        assert!(matches!(
            check_nodes(&[0.0, 0.0], &[1.0, 2.0], 2),
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
        assert!(matches!(
            check_nodes(&[0.0, 1.0], &[f64::NAN, 2.0], 2),
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
        assert!(check_nodes(&[0.0, 1.0, 3.0], &[1.0, 2.0, 0.0], 2).is_ok());
    }
}
