use super::{check_nodes, Interpolant};
use crate::kernel::ExecInvariantViolation;

/// Interpolating polynomial of degree `n - 1` in barycentric form.
///
/// The barycentric form evaluates in O(n) per point after an O(n²) fit and
/// is far better conditioned than expanding the polynomial coefficients.
/// It does not cure the Runge phenomenon: with many equispaced nodes the
/// polynomial oscillates wildly between nodes near the ends of the interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycentricLagrange {
    x: Vec<f64>,
    y: Vec<f64>,
    weights: Vec<f64>,
}

impl BarycentricLagrange {
    /// Fit the polynomial through strictly increasing nodes.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, ExecInvariantViolation> {
        check_nodes(x, y, 1)?;
        // Differences are scaled by 4 / interval length so the weight
        // products stay within floating point range for large n.
        let span = x[x.len() - 1] - x[0];
        let scale = if span > 0.0 { 4.0 / span } else { 1.0 };
        let weights = x
            .iter()
            .enumerate()
            .map(|(j, &xj)| {
                let prod: f64 = x
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| *k != j)
                    .map(|(_, &xk)| (xj - xk) * scale)
                    .product();
                1.0 / prod
            })
            .collect();
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            weights,
        })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.x.len() - 1
    }
}

impl Interpolant for BarycentricLagrange {
    fn evaluate(&self, t: f64) -> f64 {
        let mut num = 0.0;
        let mut den = 0.0;
        for ((&xj, &yj), &wj) in self.x.iter().zip(self.y.iter()).zip(self.weights.iter()) {
            let diff = t - xj;
            if diff == 0.0 {
                return yj;
            }
            let term = wj / diff;
            num += term * yj;
            den += term;
        }
        num / den
    }
}
