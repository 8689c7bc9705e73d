use super::{check_nodes, segment, Interpolant};
use crate::kernel::ExecInvariantViolation;

/// Piecewise-linear interpolant that holds the end values flat outside the
/// node range, like `numpy.interp`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearInterpolant {
    /// Fit through at least two strictly increasing nodes.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, ExecInvariantViolation> {
        check_nodes(x, y, 2)?;
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }
}

impl Interpolant for LinearInterpolant {
    fn evaluate(&self, t: f64) -> f64 {
        let last = self.x.len() - 1;
        if t <= self.x[0] {
            return self.y[0];
        }
        if t >= self.x[last] {
            return self.y[last];
        }
        let i = segment(&self.x, t);
        let frac = (t - self.x[i]) / (self.x[i + 1] - self.x[i]);
        self.y[i] + frac * (self.y[i + 1] - self.y[i])
    }
}

///
/// One-dimensional linear interpolation with flat extension, like `numpy.interp`.
///
/// ```
/// use sampling_rs::interpolate::interp;
///
/// let y = interp(&[-1.0, 0.5, 2.0, 9.0], &[0.0, 1.0, 2.0], &[10.0, 20.0, 0.0]).expect("interp");
/// assert_eq!(y, vec![10.0, 15.0, 0.0, 0.0]);
/// ```
pub fn interp(query: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>, ExecInvariantViolation> {
    Ok(LinearInterpolant::new(xp, fp)?.evaluate_many(query))
}

/// Linearly resample `data` onto `len` points spread over the same index range.
///
/// Used to bring signals of different lengths onto a common time base. A
/// single-sample input is broadcast.
pub fn resample_linear(data: &[f64], len: usize) -> Result<Vec<f64>, ExecInvariantViolation> {
    match data.len() {
        0 => Err(ExecInvariantViolation::InsufficientData { arg: "data" }),
        1 => Ok(vec![data[0]; len]),
        n if n == len => Ok(data.to_vec()),
        n => {
            let xp: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let query = crate::signal::linspace(0.0, (n - 1) as f64, len);
            interp(&query, &xp, data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn idempotent_at_nodes() {
        let x = [0.0, 0.3, 0.7, 1.0];
        let y = [1.0, -2.0, 4.0, 0.5];
        let lin = LinearInterpolant::new(&x, &y).expect("fit");
        assert_eq!(lin.evaluate_many(&x), y.to_vec());
    }

    #[test]
    fn holds_ends_flat() {
        let lin = LinearInterpolant::new(&[1.0, 2.0], &[3.0, 5.0]).expect("fit");
        assert_eq!(lin.evaluate(-10.0), 3.0);
        assert_eq!(lin.evaluate(10.0), 5.0);
        assert_abs_diff_eq!(lin.evaluate(1.25), 3.5);
    }

    #[test]
    fn resample_linear_stretches_and_shrinks() {
        let up = resample_linear(&[0.0, 2.0], 5).expect("upsample");
        assert_eq!(up.len(), 5);
        for (a, b) in up.iter().zip([0.0, 0.5, 1.0, 1.5, 2.0].iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }

        let down = resample_linear(&[0.0, 1.0, 2.0, 3.0, 4.0], 3).expect("downsample");
        assert_eq!(down, vec![0.0, 2.0, 4.0]);

        assert_eq!(resample_linear(&[7.0], 3).expect("broadcast"), vec![7.0; 3]);
        assert!(resample_linear(&[], 3).is_err());
    }
}
