//! Single-sided amplitude spectra and aliasing helpers.

use super::traits::{AmplitudeSpectrum1D, SpectrumPair};
use crate::error::Error;
use crate::kernel::{
    bind_output, ensure_positive, read_nonempty, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Read1D, Write1D,
};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

fn fft_real(x: &[f64]) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(x.len());
    let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buf);
    buf
}

/// Number of non-negative frequency bins kept for `n` samples.
pub fn onesided_len(n: usize) -> usize {
    n.div_ceil(2)
}

/// Constructor config for [`AmplitudeSpectrumKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumConfig {
    /// Time between consecutive samples in seconds.
    pub sample_interval: f64,
}

/// Trait-first single-sided amplitude spectrum.
///
/// Bin `k` sits at `k / (n * sample_interval)` Hz and holds `|X[k]| / n`,
/// doubled for every bin but DC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeSpectrumKernel {
    sample_interval: f64,
}

impl AmplitudeSpectrumKernel {
    /// Configured sample interval.
    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }
}

impl KernelLifecycle for AmplitudeSpectrumKernel {
    type Config = SpectrumConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let sample_interval = ensure_positive(
            config.sample_interval,
            "sample_interval",
            "sample interval must be finite and > 0",
        )?;
        Ok(Self { sample_interval })
    }
}

impl AmplitudeSpectrum1D<f64> for AmplitudeSpectrumKernel {
    fn run_into<I, OF, OM>(
        &self,
        input: &I,
        out_freqs: &mut OF,
        out_mags: &mut OM,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        OF: Write1D<f64> + ?Sized,
        OM: Write1D<f64> + ?Sized,
    {
        let input = read_nonempty(input, "signal")?;
        let n = input.len();
        let bins = onesided_len(n);
        let out_freqs = bind_output(out_freqs, "out_freqs", bins)?;
        let out_mags = bind_output(out_mags, "out_mags", bins)?;

        let spec = fft_real(input);
        let df = 1.0 / (n as f64 * self.sample_interval);
        for (k, (f, m)) in out_freqs.iter_mut().zip(out_mags.iter_mut()).enumerate() {
            *f = k as f64 * df;
            let scale = if k == 0 { 1.0 } else { 2.0 };
            *m = scale * spec[k].norm() / n as f64;
        }
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<SpectrumPair<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let bins = onesided_len(read_nonempty(input, "signal")?.len());
        let mut freqs = vec![0.0; bins];
        let mut mags = vec![0.0; bins];
        self.run_into(input, &mut freqs, &mut mags)?;
        Ok((freqs, mags))
    }
}

///
/// Single-sided amplitude spectrum of `signal` sampled every `sample_interval`
/// seconds.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use sampling_rs::signal::spectral::spectrum;
///
/// let y: Vec<f64> = (0..8).map(|i| 1.0 + (core::f64::consts::PI * i as f64 / 2.0).cos()).collect();
/// let (f, m) = spectrum(&y, 0.125).expect("spectrum");
/// assert_eq!(f, vec![0.0, 1.0, 2.0, 3.0]);
/// assert_abs_diff_eq!(m[0], 1.0, epsilon = 1e-12);
/// assert_abs_diff_eq!(m[2], 1.0, epsilon = 1e-12);
/// ```
pub fn spectrum(signal: &[f64], sample_interval: f64) -> Result<SpectrumPair<f64>, Error> {
    let kernel = AmplitudeSpectrumKernel::try_new(SpectrumConfig { sample_interval })?;
    Ok(kernel.run_alloc(signal)?)
}

///
/// Apparent frequency of a tone at `frequency` Hz sampled at `sample_rate` Hz,
/// folded into `[0, sample_rate / 2]`.
///
/// ```
/// use sampling_rs::signal::spectral::alias_frequency;
///
/// assert_eq!(alias_frequency(7.0, 10.0).expect("alias"), 3.0);
/// assert_eq!(alias_frequency(4.0, 10.0).expect("alias"), 4.0);
/// ```
pub fn alias_frequency(frequency: f64, sample_rate: f64) -> Result<f64, Error> {
    let fs = ensure_positive(sample_rate, "sample_rate", "sample rate must be finite and > 0")?;
    if !frequency.is_finite() {
        return Err(Error::InvalidConfig {
            arg: "frequency".into(),
            reason: "frequency must be finite".into(),
        });
    }
    Ok((frequency - fs * (frequency / fs).round()).abs())
}

/// Lowest alias-free sampling rate for content up to `f_max` Hz.
pub fn nyquist_rate(f_max: f64) -> f64 {
    2.0 * f_max.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::linspace;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::PI;

    #[test]
    fn peaks_at_tone_frequencies() {
        let fs = 1000.0;
        let n = 1000;
        let y: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                (2.0 * PI * 5.0 * t).sin() + 0.5 * (2.0 * PI * 15.0 * t).sin()
            })
            .collect();
        let (f, m) = spectrum(&y, 1.0 / fs).expect("spectrum");
        assert_eq!(f.len(), 500);
        assert_abs_diff_eq!(f[5], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[5], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m[15], 0.5, epsilon = 1e-9);
        assert!(m[40] < 1e-9);
    }

    #[test]
    fn odd_lengths_keep_ceil_half_bins() {
        let y = linspace(0.0, 1.0, 7);
        let (f, m) = spectrum(&y, 0.5).expect("spectrum");
        assert_eq!(f.len(), 4);
        assert_eq!(m.len(), 4);
        assert_eq!(onesided_len(1), 1);
        let (f, m) = spectrum(&[3.0], 1.0).expect("single sample");
        assert_eq!(f, vec![0.0]);
        assert_eq!(m, vec![3.0]);
    }

    #[test]
    fn rejects_empty_input_and_bad_interval() {
        assert!(matches!(spectrum(&[], 1.0), Err(Error::InsufficientData { .. })));
        for dt in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                spectrum(&[1.0, 2.0], dt),
                Err(Error::InvalidConfig { ref arg, .. }) if arg == "sample_interval"
            ));
        }
    }

    #[test]
    fn aliasing_folds_into_nyquist_band() {
        assert_abs_diff_eq!(alias_frequency(15.0, 20.0).expect("alias"), 5.0);
        assert_abs_diff_eq!(alias_frequency(15.0, 40.0).expect("alias"), 15.0);
        assert_abs_diff_eq!(alias_frequency(-3.0, 10.0).expect("alias"), 3.0);
        assert_abs_diff_eq!(alias_frequency(20.0, 10.0).expect("alias"), 0.0);
        assert!(alias_frequency(1.0, 0.0).is_err());
        assert_eq!(nyquist_rate(15.0), 30.0);
    }
}
