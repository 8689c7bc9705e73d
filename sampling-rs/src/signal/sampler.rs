//! Uniform sampling of a densely tabulated signal.

use super::linspace;
use super::traits::{SampledPair, Sample1D};
use crate::error::Error;
use crate::kernel::{
    bind_output, ensure_positive, read_nonempty, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Read1D, Write1D,
};

/// Where the evenly spaced sample positions sit relative to the ends of the
/// time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointPolicy {
    /// First and last positions land on the first and last tabulated points.
    #[default]
    Inclusive,
    /// Space `n + 2` positions and drop both ends.
    Exclusive,
}

/// Constructor config for [`SamplerKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Samples per second.
    pub rate: usize,
    /// Duration covered by the tabulated signal in seconds.
    pub max_time: f64,
    /// Placement of the sample positions.
    pub policy: EndpointPolicy,
}

impl SamplingConfig {
    /// Lowest rate accepted by interactive callers.
    pub const MIN_RATE: usize = 2;

    /// Inclusive sampling at `rate` over `max_time` seconds.
    pub fn new(rate: usize, max_time: f64) -> Self {
        Self {
            rate,
            max_time,
            policy: EndpointPolicy::Inclusive,
        }
    }

    /// Copy with the rate raised to at least [`Self::MIN_RATE`].
    pub fn clamped(self) -> Self {
        Self {
            rate: self.rate.max(Self::MIN_RATE),
            ..self
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(Self::MIN_RATE, 1.0)
    }
}

/// Picks `floor(rate * max_time)` evenly spaced points of a tabulated signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerKernel {
    count: usize,
    policy: EndpointPolicy,
}

impl SamplerKernel {
    /// Endpoint policy in use.
    pub fn policy(&self) -> EndpointPolicy {
        self.policy
    }

    /// Tabulation indices picked from a signal of `len` points.
    ///
    /// Positions are truncated toward zero, so neighbouring picks may repeat
    /// an index when the rate outruns the tabulation.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        let last = (len - 1) as f64;
        let positions = match self.policy {
            EndpointPolicy::Inclusive => linspace(0.0, last, self.count),
            EndpointPolicy::Exclusive => {
                let mut padded = linspace(0.0, last, self.count + 2);
                padded.pop();
                if !padded.is_empty() {
                    padded.remove(0);
                }
                padded
            }
        };
        positions
            .into_iter()
            .map(|p| (p as usize).min(len - 1))
            .collect()
    }
}

/// `floor(product)`, except products a rounding error below an integer snap up to it.
fn whole_samples(product: f64) -> usize {
    let nearest = product.round();
    if (product - nearest).abs() < 1e-9 * product.max(1.0) {
        nearest as usize
    } else {
        product.floor() as usize
    }
}

impl KernelLifecycle for SamplerKernel {
    type Config = SamplingConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.rate < 1 {
            return Err(ConfigError::InvalidArgument {
                arg: "rate",
                reason: "sampling rate must be >= 1",
            });
        }
        let duration = ensure_positive(config.max_time, "max_time", "duration must be finite and > 0")?;
        let count = whole_samples(config.rate as f64 * duration);
        Ok(Self {
            count,
            policy: config.policy,
        })
    }
}

impl Sample1D<f64> for SamplerKernel {
    fn sample_count(&self) -> usize {
        self.count
    }

    fn run_into<V, A, OT, OV>(
        &self,
        values: &V,
        time_axis: &A,
        out_times: &mut OT,
        out_values: &mut OV,
    ) -> Result<(), ExecInvariantViolation>
    where
        V: Read1D<f64> + ?Sized,
        A: Read1D<f64> + ?Sized,
        OT: Write1D<f64> + ?Sized,
        OV: Write1D<f64> + ?Sized,
    {
        let values = read_nonempty(values, "values")?;
        let time_axis = read_nonempty(time_axis, "time_axis")?;
        if values.len() != time_axis.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "time_axis",
                expected: values.len(),
                got: time_axis.len(),
            });
        }
        let out_times = bind_output(out_times, "out_times", self.count)?;
        let out_values = bind_output(out_values, "out_values", self.count)?;
        for ((ot, ov), idx) in out_times
            .iter_mut()
            .zip(out_values.iter_mut())
            .zip(self.indices(values.len()))
        {
            *ot = time_axis[idx];
            *ov = values[idx];
        }
        Ok(())
    }

    fn run_alloc<V, A>(&self, values: &V, time_axis: &A) -> Result<SampledPair<f64>, ExecInvariantViolation>
    where
        V: Read1D<f64> + ?Sized,
        A: Read1D<f64> + ?Sized,
    {
        let mut times = vec![0.0; self.count];
        let mut picked = vec![0.0; self.count];
        self.run_into(values, time_axis, &mut times, &mut picked)?;
        Ok((times, picked))
    }
}

///
/// Sample `values`, tabulated on `time_axis`, at `rate` samples per second over
/// `duration` seconds. Both ends of the axis are included.
///
/// ```
/// use sampling_rs::signal::sampler::sample;
///
/// let t = [0.0, 0.25, 0.5, 0.75, 1.0];
/// let y = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let (ts, ys) = sample(&y, &t, 3, 1.0).expect("sample");
/// assert_eq!(ts, vec![0.0, 0.5, 1.0]);
/// assert_eq!(ys, vec![0.0, 2.0, 4.0]);
/// ```
pub fn sample(
    values: &[f64],
    time_axis: &[f64],
    rate: usize,
    duration: f64,
) -> Result<SampledPair<f64>, Error> {
    let kernel = SamplerKernel::try_new(SamplingConfig::new(rate, duration))?;
    Ok(kernel.run_alloc(values, time_axis)?)
}
