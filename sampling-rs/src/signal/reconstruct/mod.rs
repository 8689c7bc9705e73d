//! Reconstruction of a continuous estimate from uniform samples.

use core::fmt;
use core::str::FromStr;

use super::traits::Reconstruct1D;
use crate::error::Error;
use crate::interpolate::{check_nodes, SplineBoundary};
use crate::kernel::{
    bind_output, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D,
};
use itertools::Itertools;

mod strategies;
pub use strategies::*;

/// Interpolation kernel used to reconstruct a sampled signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReconstructionMethod {
    /// Whittaker-Shannon sinc interpolation.
    #[default]
    Sinc,
    /// Sample and hold.
    ZeroOrderHold,
    /// Piecewise linear.
    Linear,
    /// Cubic spline.
    CubicSpline,
    /// Global Lagrange polynomial.
    Lagrange,
}

impl ReconstructionMethod {
    /// Every method, in menu order.
    pub const ALL: [ReconstructionMethod; 5] = [
        ReconstructionMethod::Sinc,
        ReconstructionMethod::ZeroOrderHold,
        ReconstructionMethod::Linear,
        ReconstructionMethod::CubicSpline,
        ReconstructionMethod::Lagrange,
    ];

    /// Human readable name, accepted back by [`FromStr`].
    pub fn display_name(self) -> &'static str {
        match self {
            ReconstructionMethod::Sinc => "Whittaker-Shannon (sinc)",
            ReconstructionMethod::ZeroOrderHold => "Zero-Order Hold",
            ReconstructionMethod::Linear => "Linear",
            ReconstructionMethod::CubicSpline => "Cubic Spline",
            ReconstructionMethod::Lagrange => "Lagrange",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ReconstructionMethod::Sinc => &["Whittaker-Shanon (sinc)", "sinc"],
            ReconstructionMethod::ZeroOrderHold => &["zoh", "zero-order-hold"],
            ReconstructionMethod::Linear => &[],
            ReconstructionMethod::CubicSpline => &["cubic", "cubic-spline"],
            ReconstructionMethod::Lagrange => &[],
        }
    }
}

impl fmt::Display for ReconstructionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ReconstructionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ReconstructionMethod::ALL
            .into_iter()
            .find(|method| {
                core::iter::once(method.display_name())
                    .chain(method.aliases().iter().copied())
                    .any(|name| name.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| Error::InvalidConfig {
                arg: "method".into(),
                reason: format!("unknown reconstruction method `{wanted}`"),
            })
    }
}

/// Constructor config for [`ReconstructKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructConfig {
    /// Interpolation kernel.
    pub method: ReconstructionMethod,
    /// End condition, used only by [`ReconstructionMethod::CubicSpline`].
    pub boundary: SplineBoundary,
}

impl From<ReconstructionMethod> for ReconstructConfig {
    fn from(method: ReconstructionMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

/// Trait-first reconstruction kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructKernel {
    method: ReconstructionMethod,
    boundary: SplineBoundary,
}

impl ReconstructKernel {
    /// Configured method.
    pub fn method(&self) -> ReconstructionMethod {
        self.method
    }

    fn run_strategy(
        &self,
        times: &[f64],
        values: &[f64],
        query: &[f64],
        out: &mut [f64],
    ) -> Result<(), ExecInvariantViolation> {
        let strategy: &dyn ReconstructionStrategy = match self.method {
            ReconstructionMethod::Sinc => &SincStrategy,
            ReconstructionMethod::ZeroOrderHold => &ZeroOrderHoldStrategy,
            ReconstructionMethod::Linear => &LinearStrategy,
            ReconstructionMethod::CubicSpline => &CubicSplineStrategy {
                boundary: self.boundary,
            },
            ReconstructionMethod::Lagrange => &LagrangeStrategy,
        };
        strategy.reconstruct(times, values, query, out)
    }
}

impl KernelLifecycle for ReconstructKernel {
    type Config = ReconstructConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            method: config.method,
            boundary: config.boundary,
        })
    }
}

/// Collapse runs of repeated sample times to their first occurrence.
///
/// Truncating sample positions to table indices repeats times whenever the
/// rate exceeds the tabulation density.
pub fn dedup_samples(times: &[f64], values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    times
        .iter()
        .copied()
        .zip(values.iter().copied())
        .dedup_by(|a, b| a.0 == b.0)
        .unzip()
}

fn prepare(times: &[f64], values: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ExecInvariantViolation> {
    if times.len() != values.len() {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "sample_values",
            expected: times.len(),
            got: values.len(),
        });
    }
    if times.len() < 2 {
        return Err(ExecInvariantViolation::InsufficientSamples {
            required: 2,
            got: times.len(),
        });
    }
    let (times, values) = dedup_samples(times, values);
    if times.len() < 2 {
        return Err(ExecInvariantViolation::DegenerateSampling {
            reason: "all sample times are identical",
        });
    }
    check_nodes(&times, &values, 2)?;
    Ok((times, values))
}

impl Reconstruct1D<f64> for ReconstructKernel {
    fn run_into<ST, SV, Q, O>(
        &self,
        sample_times: &ST,
        sample_values: &SV,
        query: &Q,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        ST: Read1D<f64> + ?Sized,
        SV: Read1D<f64> + ?Sized,
        Q: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let sample_times = sample_times
            .read_slice()
            .map_err(ExecInvariantViolation::from)?;
        let sample_values = sample_values
            .read_slice()
            .map_err(ExecInvariantViolation::from)?;
        let query = query.read_slice().map_err(ExecInvariantViolation::from)?;
        let (times, values) = prepare(sample_times, sample_values)?;
        let out = bind_output(out, "out", query.len())?;
        self.run_strategy(&times, &values, query, out)
    }

    fn run_alloc<ST, SV, Q>(
        &self,
        sample_times: &ST,
        sample_values: &SV,
        query: &Q,
    ) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        ST: Read1D<f64> + ?Sized,
        SV: Read1D<f64> + ?Sized,
        Q: Read1D<f64> + ?Sized,
    {
        let len = query.read_slice().map_err(ExecInvariantViolation::from)?.len();
        let mut out = vec![0.0; len];
        self.run_into(sample_times, sample_values, query, &mut out)?;
        Ok(out)
    }
}

///
/// Reconstruct the signal sampled at `(sample_times, sample_values)` on the
/// `query` times with `method`.
///
/// ```
/// use sampling_rs::signal::reconstruct::{reconstruct, ReconstructionMethod};
///
/// let y = reconstruct(&[0.0, 1.0, 2.0], &[0.0, 2.0, 1.0], &[-1.0, 0.5, 1.5], ReconstructionMethod::ZeroOrderHold)
///     .expect("reconstruct");
/// assert_eq!(y, vec![0.0, 0.0, 2.0]);
/// ```
pub fn reconstruct(
    sample_times: &[f64],
    sample_values: &[f64],
    query: &[f64],
    method: ReconstructionMethod,
) -> Result<Vec<f64>, Error> {
    let kernel = ReconstructKernel::try_new(method.into())?;
    Ok(kernel.run_alloc(sample_times, sample_values, query)?)
}
