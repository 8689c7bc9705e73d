//! Interactive sampling/reconstruction controller.
//!
//! A [`SamplingSession`] owns a dense time base, the signal tabulated on it
//! and the user's sampling choices. Every [`SamplingSession::recompute`]
//! samples the signal, reconstructs it on the full time base and derives the
//! error trace and both spectra. A failing recompute leaves the previous
//! result in place.

use crate::error::Error;
use crate::interpolate::SplineBoundary;
use crate::kernel::{ensure_positive, KernelLifecycle};
use crate::signal::composite::CompositeSignal;
use crate::signal::linspace;
use crate::signal::reconstruct::{ReconstructConfig, ReconstructKernel, ReconstructionMethod};
use crate::signal::sampler::{EndpointPolicy, SamplerKernel, SamplingConfig};
use crate::signal::spectral::{AmplitudeSpectrumKernel, SpectrumConfig};
use crate::signal::traits::{AmplitudeSpectrum1D, Reconstruct1D, Sample1D, ToneWave1D};
use crate::signal::wave::{ToneConfig, ToneKernel};
use crate::stats::difference;
use tracing::{debug, warn};

/// Tones of the built-in signal shown before anything is mixed.
pub const DEFAULT_TONES: [(f64, f64); 2] = [(5.0, 1.0), (15.0, 0.5)];

/// Startup configuration of a [`SamplingSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Length of the time base in seconds.
    pub max_time: f64,
    /// Number of points on the time base.
    pub points: usize,
    /// Initial sampling rate in Hz.
    pub rate: usize,
    /// Initial reconstruction method.
    pub method: ReconstructionMethod,
    /// Spline end condition for [`ReconstructionMethod::CubicSpline`].
    pub boundary: SplineBoundary,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_time: 1.0,
            points: 1000,
            rate: SamplingConfig::MIN_RATE,
            method: ReconstructionMethod::Sinc,
            boundary: SplineBoundary::NotAKnot,
        }
    }
}

/// Everything derived from one sampling pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconstruction {
    /// Rate the signal was sampled at.
    pub rate: usize,
    /// Method used to reconstruct.
    pub method: ReconstructionMethod,
    /// Times of the picked samples.
    pub sample_times: Vec<f64>,
    /// Values of the picked samples.
    pub sample_values: Vec<f64>,
    /// Estimate on the full time base.
    pub reconstructed: Vec<f64>,
    /// `original - reconstructed` on the full time base.
    pub error: Vec<f64>,
    /// Sum of absolute errors.
    pub absolute_error: f64,
    /// Spectrum frequencies shared by both magnitude vectors.
    pub frequencies: Vec<f64>,
    /// Amplitude spectrum of the original signal.
    pub original_spectrum: Vec<f64>,
    /// Amplitude spectrum of the reconstruction.
    pub reconstructed_spectrum: Vec<f64>,
}

/// Stateful single-threaded controller behind the sampling view.
#[derive(Debug, Clone)]
pub struct SamplingSession {
    max_time: f64,
    boundary: SplineBoundary,
    time: Vec<f64>,
    signal: Vec<f64>,
    mixer: CompositeSignal,
    f_max: f64,
    rate: usize,
    method: ReconstructionMethod,
    last: Option<Reconstruction>,
}

impl SamplingSession {
    /// Build a session showing the built-in two-tone signal.
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        let max_time = ensure_positive(config.max_time, "max_time", "duration must be finite and > 0")?;
        if config.points < 2 {
            return Err(Error::InvalidConfig {
                arg: "points".into(),
                reason: "time base needs at least 2 points".into(),
            });
        }
        let mut session = Self {
            max_time,
            boundary: config.boundary,
            time: linspace(0.0, max_time, config.points),
            signal: Vec::new(),
            mixer: CompositeSignal::new(),
            f_max: 0.0,
            rate: config.rate,
            method: config.method,
            last: None,
        };
        session.regenerate()?;
        Ok(session)
    }

    /// Dense time base.
    pub fn time_axis(&self) -> &[f64] {
        &self.time
    }

    /// Signal tabulated on the time base.
    pub fn signal(&self) -> &[f64] {
        &self.signal
    }

    /// Highest frequency present in the current signal.
    pub fn f_max(&self) -> f64 {
        self.f_max
    }

    /// Current sampling rate.
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Current reconstruction method.
    pub fn method(&self) -> ReconstructionMethod {
        self.method
    }

    /// Mixer feeding the signal.
    pub fn mixer(&self) -> &CompositeSignal {
        &self.mixer
    }

    /// Result of the last successful recompute.
    pub fn last_result(&self) -> Option<&Reconstruction> {
        self.last.as_ref()
    }

    /// Inclusive range of selectable rates, `[2, 4 * f_max]`.
    pub fn rate_range(&self) -> (usize, usize) {
        let hi = (4.0 * self.f_max).ceil() as usize;
        (SamplingConfig::MIN_RATE, hi.max(SamplingConfig::MIN_RATE))
    }

    /// Move the rate into [`Self::rate_range`] and return the applied rate.
    pub fn set_rate(&mut self, rate: usize) -> usize {
        let (lo, hi) = self.rate_range();
        self.rate = rate.clamp(lo, hi);
        self.rate
    }

    /// Nudge the rate by `delta`, staying inside [`Self::rate_range`].
    pub fn step_rate(&mut self, delta: isize) -> usize {
        self.set_rate(self.rate.saturating_add_signed(delta))
    }

    /// Select the reconstruction method.
    pub fn set_method(&mut self, method: ReconstructionMethod) {
        self.method = method;
    }

    /// Replace the mixer and regenerate the signal from it.
    ///
    /// An empty mixer restores the built-in two-tone signal.
    pub fn set_mixer(&mut self, mixer: CompositeSignal) -> Result<(), Error> {
        let previous = core::mem::replace(&mut self.mixer, mixer);
        if let Err(err) = self.regenerate() {
            warn!(%err, "mixer rejected, keeping previous signal");
            self.mixer = previous;
            return Err(err);
        }
        Ok(())
    }

    fn regenerate(&mut self) -> Result<(), Error> {
        let (signal, f_max) = if self.mixer.is_empty() {
            let mut signal = vec![0.0; self.time.len()];
            for (frequency, amplitude) in DEFAULT_TONES {
                let tone = ToneKernel::try_new(ToneConfig {
                    frequency,
                    amplitude,
                    phase_degrees: 0.0,
                })?
                .run_alloc(&self.time)?;
                signal.iter_mut().zip(tone).for_each(|(s, v)| *s += v);
            }
            let f_max = DEFAULT_TONES.iter().map(|t| t.0).fold(0.0, f64::max);
            (signal, f_max)
        } else {
            (
                self.mixer.compose(&self.time)?,
                self.mixer.f_max().unwrap_or(0.0),
            )
        };
        self.signal = signal;
        self.f_max = f_max;
        let applied = self.set_rate(self.rate);
        debug!(f_max, rate = applied, components = self.mixer.len(), "signal regenerated");
        Ok(())
    }

    fn compute(&self) -> Result<Reconstruction, Error> {
        let sampler = SamplerKernel::try_new(SamplingConfig {
            rate: self.rate,
            max_time: self.max_time,
            policy: EndpointPolicy::Inclusive,
        })?;
        let (sample_times, sample_values) = sampler.run_alloc(&self.signal, &self.time)?;

        let reconstructor = ReconstructKernel::try_new(ReconstructConfig {
            method: self.method,
            boundary: self.boundary,
        })?;
        let reconstructed = reconstructor.run_alloc(&sample_times, &sample_values, &self.time)?;
        let error = difference(&self.signal, &reconstructed)?;
        let absolute_error = error.iter().map(|e| e.abs()).sum();

        let analyzer = AmplitudeSpectrumKernel::try_new(SpectrumConfig {
            sample_interval: self.time[1] - self.time[0],
        })?;
        let (frequencies, original_spectrum) = analyzer.run_alloc(&self.signal)?;
        let (_, reconstructed_spectrum) = analyzer.run_alloc(&reconstructed)?;

        Ok(Reconstruction {
            rate: self.rate,
            method: self.method,
            sample_times,
            sample_values,
            reconstructed,
            error,
            absolute_error,
            frequencies,
            original_spectrum,
            reconstructed_spectrum,
        })
    }

    /// Sample, reconstruct and analyse with the current settings.
    ///
    /// On failure the previous result stays available through
    /// [`Self::last_result`].
    pub fn recompute(&mut self) -> Result<&Reconstruction, Error> {
        match self.compute() {
            Ok(result) => {
                debug!(
                    rate = result.rate,
                    method = %result.method,
                    samples = result.sample_times.len(),
                    absolute_error = result.absolute_error,
                    "reconstruction updated"
                );
                Ok(&*self.last.insert(result))
            }
            Err(err) => {
                warn!(%err, rate = self.rate, method = %self.method, "recompute failed");
                Err(err)
            }
        }
    }
}
