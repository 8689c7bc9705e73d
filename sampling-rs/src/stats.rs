//! Summary statistics and reconstruction error metrics.

use crate::kernel::{ConfigError, ExecInvariantViolation};
use core::{borrow::Borrow, iter::Sum, ops::Add};
use num_traits::{Float, Num, NumCast};

///
/// Compute the mean of the signal, `y`
///
/// Return the mean and the number of points averaged
///
/// ```
/// use approx::assert_relative_eq;
/// use sampling_rs::stats::mean;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(3f64, mean(y.iter()).0);
///
/// let y: &[f32] = &[];
/// assert_eq!((0f32, 0), mean(y.iter()));
/// ```
pub fn mean<YI, F>(y: YI) -> (F, usize)
where
    F: Num + NumCast + Default + Copy + Add,
    YI: Iterator,
    YI::Item: Borrow<F>,
{
    let (sum, count) = y.fold(Default::default(), |acc: (F, usize), yi| {
        (acc.0 + *yi.borrow(), acc.1 + 1)
    });
    match F::from(count) {
        Some(n) if count > 0 => (sum / n, count),
        _ => Default::default(),
    }
}

///
/// Compute the population variance of the signal, `y`
///
/// ```
/// use approx::assert_relative_eq;
/// use sampling_rs::stats::variance;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(2f64, variance(y.iter()).0);
/// ```
pub fn variance<YI, F>(y: YI) -> (F, usize)
where
    F: Float + Default + Sum,
    YI: Iterator + Clone,
    YI::Item: Borrow<F>,
{
    let (avg, n) = mean(y.clone());
    let sum: F = y
        .map(|f| {
            let delta = *f.borrow() - avg;
            delta * delta
        })
        .sum::<F>();
    match F::from(n) {
        Some(nf) if n > 0 => (sum / nf, n),
        _ => Default::default(),
    }
}

///
/// Compute the population standard deviation of the signal, `y`
///
/// ```
/// use approx::assert_relative_eq;
/// use sampling_rs::stats::stdev;
///
/// let y: [f64; 5] = [1.,2.,3.,4.,5.];
/// assert_relative_eq!(1.41421356237, stdev(y.iter()).0, max_relative = 1e-8);
/// ```
pub fn stdev<YI, F>(y: YI) -> (F, usize)
where
    F: Float + Default + Sum,
    YI: Iterator + Clone,
    YI::Item: Borrow<F>,
{
    match variance(y) {
        (_, 0) => Default::default(),
        (v, n) => (v.sqrt(), n),
    }
}

///
/// Mean power `mean(y²)` of the signal, `y`.
///
pub fn mean_power<YI, F>(y: YI) -> F
where
    F: Float + Default,
    YI: Iterator,
    YI::Item: Borrow<F>,
{
    mean(y.map(|yi| {
        let v = *yi.borrow();
        v * v
    }))
    .0
}

/// Descriptive statistics of a sampled signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// `len / sample_rate` in milliseconds.
    pub duration_ms: f64,
    /// Sample rate in Hz.
    pub sample_rate: f64,
}

/// Describe `data` recorded at `sample_rate`.
pub fn describe(data: &[f64], sample_rate: f64) -> Result<SignalStatistics, ExecInvariantViolation> {
    if data.is_empty() {
        return Err(ExecInvariantViolation::InsufficientData { arg: "data" });
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(ConfigError::InvalidArgument {
            arg: "sample_rate",
            reason: "sample rate must be finite and > 0",
        }
        .into());
    }
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Ok(SignalStatistics {
        mean: mean(data.iter()).0,
        std: stdev(data.iter()).0,
        min,
        max,
        duration_ms: data.len() as f64 * 1000.0 / sample_rate,
        sample_rate,
    })
}

fn paired<'a>(
    a: &'a [f64],
    b: &'a [f64],
) -> Result<impl Iterator<Item = f64> + Clone + 'a, ExecInvariantViolation> {
    if a.len() != b.len() {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "b",
            expected: a.len(),
            got: b.len(),
        });
    }
    if a.is_empty() {
        return Err(ExecInvariantViolation::InsufficientData { arg: "a" });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x - y))
}

/// Pointwise difference `a - b`, the error trace of a reconstruction.
pub fn difference(a: &[f64], b: &[f64]) -> Result<Vec<f64>, ExecInvariantViolation> {
    Ok(paired(a, b)?.collect())
}

/// Mean absolute error between two equal-length signals.
pub fn mean_abs_error(a: &[f64], b: &[f64]) -> Result<f64, ExecInvariantViolation> {
    Ok(mean(paired(a, b)?.map(f64::abs)).0)
}

/// Largest absolute pointwise error between two equal-length signals.
pub fn max_abs_error(a: &[f64], b: &[f64]) -> Result<f64, ExecInvariantViolation> {
    Ok(paired(a, b)?.map(f64::abs).fold(0.0, f64::max))
}

/// Root mean squared error between two equal-length signals.
pub fn root_mean_squared_error(a: &[f64], b: &[f64]) -> Result<f64, ExecInvariantViolation> {
    Ok(mean_power(paired(a, b)?).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn describe_matches_reference() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = describe(&data, 100.0).expect("stats");
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_relative_eq!(stats.duration_ms, 80.0);
        assert_eq!(stats.sample_rate, 100.0);
    }

    #[test]
    fn describe_rejects_empty_and_bad_rate() {
        assert_eq!(
            describe(&[], 10.0),
            Err(ExecInvariantViolation::InsufficientData { arg: "data" })
        );
        assert!(describe(&[1.0], 0.0).is_err());
    }

    #[test]
    fn error_metrics() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 1.0, 5.0, 4.0];
        assert_eq!(difference(&a, &b).expect("diff"), vec![0.0, 1.0, -2.0, 0.0]);
        assert_relative_eq!(mean_abs_error(&a, &b).expect("mae"), 0.75);
        assert_relative_eq!(max_abs_error(&a, &b).expect("max"), 2.0);
        assert_relative_eq!(
            root_mean_squared_error(&a, &b).expect("rmse"),
            (5.0f64 / 4.0).sqrt()
        );
        assert!(matches!(
            mean_abs_error(&a, &b[..3]),
            Err(ExecInvariantViolation::LengthMismatch { .. })
        ));
    }

    #[test]
    fn mean_power_of_unit_sine_is_half() {
        let n = 1000;
        let y: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / n as f64).sin())
            .collect();
        assert_relative_eq!(mean_power::<_, f64>(y.iter()), 0.5, epsilon = 1e-9);
    }
}
