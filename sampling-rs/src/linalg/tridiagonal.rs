use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use nalgebra::{DVector, RealField};

/// Tridiagonal solve capability.
pub trait TridiagonalSolve1D<T> {
    /// Solve `A x = rhs` where `A` is given by its three diagonals.
    ///
    /// `lower` and `upper` hold `n - 1` entries, `diag` and `rhs` hold `n`.
    fn run<L, D, U, R>(
        &self,
        lower: &L,
        diag: &D,
        upper: &U,
        rhs: &R,
    ) -> Result<DVector<T>, ExecInvariantViolation>
    where
        L: Read1D<T> + ?Sized,
        D: Read1D<T> + ?Sized,
        U: Read1D<T> + ?Sized,
        R: Read1D<T> + ?Sized;
}

/// Constructor config for [`TridiagonalKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TridiagonalConfig {
    /// System dimension.
    pub size: usize,
}

/// Thomas-algorithm kernel for diagonally dominant tridiagonal systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TridiagonalKernel {
    size: usize,
}

impl TridiagonalKernel {
    /// Return configured system dimension.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl KernelLifecycle for TridiagonalKernel {
    type Config = TridiagonalConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.size == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "size",
                reason: "tridiagonal system must have at least one unknown",
            });
        }
        Ok(Self { size: config.size })
    }
}

impl<T> TridiagonalSolve1D<T> for TridiagonalKernel
where
    T: RealField + Copy,
{
    fn run<L, D, U, R>(
        &self,
        lower: &L,
        diag: &D,
        upper: &U,
        rhs: &R,
    ) -> Result<DVector<T>, ExecInvariantViolation>
    where
        L: Read1D<T> + ?Sized,
        D: Read1D<T> + ?Sized,
        U: Read1D<T> + ?Sized,
        R: Read1D<T> + ?Sized,
    {
        let n = self.size;
        let lower = lower.read_slice().map_err(ExecInvariantViolation::from)?;
        let diag = diag.read_slice().map_err(ExecInvariantViolation::from)?;
        let upper = upper.read_slice().map_err(ExecInvariantViolation::from)?;
        let rhs = rhs.read_slice().map_err(ExecInvariantViolation::from)?;
        for (arg, got, expected) in [
            ("lower", lower.len(), n - 1),
            ("diag", diag.len(), n),
            ("upper", upper.len(), n - 1),
            ("rhs", rhs.len(), n),
        ] {
            if got != expected {
                return Err(ExecInvariantViolation::LengthMismatch { arg, expected, got });
            }
        }

        // Forward sweep
        let mut c_prime = vec![T::zero(); n];
        let mut d_prime = vec![T::zero(); n];
        let mut pivot = diag[0];
        if pivot == T::zero() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "tridiagonal system is singular",
            });
        }
        if n > 1 {
            c_prime[0] = upper[0] / pivot;
        }
        d_prime[0] = rhs[0] / pivot;
        for i in 1..n {
            pivot = diag[i] - lower[i - 1] * c_prime[i - 1];
            if pivot == T::zero() {
                return Err(ExecInvariantViolation::InvalidState {
                    reason: "tridiagonal system is singular",
                });
            }
            if i < n - 1 {
                c_prime[i] = upper[i] / pivot;
            }
            d_prime[i] = (rhs[i] - lower[i - 1] * d_prime[i - 1]) / pivot;
        }

        // Back substitution
        let mut x = DVector::from_element(n, T::zero());
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }
        Ok(x)
    }
}

///
/// Solve a tridiagonal system with the Thomas algorithm.
///
/// ```
/// use approx::assert_relative_eq;
/// use sampling_rs::linalg::solve_tridiagonal;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [4 8 8]
/// let x = solve_tridiagonal(&[1.0, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[4.0, 8.0, 8.0])
///     .expect("solvable");
/// assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
/// assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
/// assert_relative_eq!(x[2], 3.0, epsilon = 1e-12);
/// ```
pub fn solve_tridiagonal<T>(
    lower: &[T],
    diag: &[T],
    upper: &[T],
    rhs: &[T],
) -> Result<DVector<T>, ExecInvariantViolation>
where
    T: RealField + Copy,
{
    let kernel = TridiagonalKernel::try_new(TridiagonalConfig { size: diag.len() })
        .map_err(ExecInvariantViolation::from)?;
    kernel.run(lower, diag, upper, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn thomas_matches_dense_lu() {
        let n = 8;
        let lower: Vec<f64> = (0..n - 1).map(|i| 0.5 + 0.1 * i as f64).collect();
        let upper: Vec<f64> = (0..n - 1).map(|i| 1.0 - 0.05 * i as f64).collect();
        let diag: Vec<f64> = (0..n).map(|i| 4.0 + i as f64).collect();
        let rhs: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();

        let mut dense = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            dense[(i, i)] = diag[i];
            if i + 1 < n {
                dense[(i + 1, i)] = lower[i];
                dense[(i, i + 1)] = upper[i];
            }
        }
        let expected = dense
            .lu()
            .solve(&DVector::from_vec(rhs.clone()))
            .expect("dense solve");

        let actual = solve_tridiagonal(&lower, &diag, &upper, &rhs).expect("thomas solve");
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(a, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_unknown_is_scalar_division() {
        let x = solve_tridiagonal::<f64>(&[], &[4.0], &[], &[2.0]).expect("1x1 solve");
        assert_eq!(x.len(), 1);
        assert_relative_eq!(x[0], 0.5);
    }

    #[test]
    fn rejects_mismatched_diagonals() {
        let err = solve_tridiagonal(&[1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[1.0, 1.0, 1.0])
            .expect_err("short lower diagonal");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch { arg: "lower", .. }
        ));
    }

    #[test]
    fn rejects_zero_pivot() {
        let err = solve_tridiagonal(&[1.0], &[0.0, 1.0], &[1.0], &[1.0, 1.0])
            .expect_err("singular system");
        assert!(matches!(err, ExecInvariantViolation::InvalidState { .. }));
    }

    #[test]
    fn kernel_rejects_empty_system() {
        assert!(TridiagonalKernel::try_new(TridiagonalConfig { size: 0 }).is_err());
    }
}
