//! Trait-first kernels for waveform generation.

use crate::kernel::{bind_output, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::ToneWave1D;
use nalgebra::RealField;
use num_traits::FromPrimitive;

/// Constructor config for [`ToneKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToneConfig<F>
where
    F: RealField + Copy,
{
    /// Frequency in Hz.
    pub frequency: F,
    /// Peak amplitude.
    pub amplitude: F,
    /// Phase offset in degrees.
    pub phase_degrees: F,
}

/// Trait-first sinusoid `A * sin(2*pi*f*t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneKernel<F>
where
    F: RealField + Copy,
{
    frequency: F,
    amplitude: F,
    phase: F,
}

impl<F> ToneKernel<F>
where
    F: RealField + Copy + FromPrimitive,
{
    /// Configured frequency in Hz.
    pub fn frequency(&self) -> F {
        self.frequency
    }

    /// Configured peak amplitude.
    pub fn amplitude(&self) -> F {
        self.amplitude
    }

    /// Phase offset in radians.
    pub fn phase(&self) -> F {
        self.phase
    }

    pub(crate) fn sample(&self, t: F) -> F {
        self.amplitude * (F::two_pi() * self.frequency * t + self.phase).sin()
    }
}

impl<F> KernelLifecycle for ToneKernel<F>
where
    F: RealField + Copy + FromPrimitive,
{
    type Config = ToneConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.frequency.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "frequency",
                reason: "frequency must be finite",
            });
        }
        if !config.amplitude.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "amplitude",
                reason: "amplitude must be finite",
            });
        }
        let half_turn = F::from_f64(180.0).ok_or(ConfigError::InvalidArgument {
            arg: "phase_degrees",
            reason: "phase conversion is not representable",
        })?;
        if !config.phase_degrees.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "phase_degrees",
                reason: "phase must be finite",
            });
        }
        Ok(Self {
            frequency: config.frequency,
            amplitude: config.amplitude,
            phase: config.phase_degrees * F::pi() / half_turn,
        })
    }
}

impl<F> ToneWave1D<F> for ToneKernel<F>
where
    F: RealField + Copy + FromPrimitive,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = bind_output(out, "out", input.len())?;
        out.iter_mut()
            .zip(input.iter())
            .for_each(|(out, t)| *out = self.sample(*t));
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        Ok(input.iter().map(|t| self.sample(*t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tone_kernel_applies_amplitude_and_phase() {
        let kernel = ToneKernel::try_new(ToneConfig {
            frequency: 2.0f64,
            amplitude: 3.0,
            phase_degrees: 90.0,
        })
        .expect("valid tone");
        let t = [0.0, 0.125, 0.25];
        let y = kernel.run_alloc(&t).expect("tone");
        assert_abs_diff_eq!(y[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[2], -3.0, epsilon = 1e-12);
    }

    #[test]
    fn tone_kernel_rejects_non_finite_parameters() {
        for (frequency, amplitude, phase_degrees, arg) in [
            (f64::NAN, 1.0, 0.0, "frequency"),
            (1.0, f64::INFINITY, 0.0, "amplitude"),
            (1.0, 1.0, f64::NAN, "phase_degrees"),
        ] {
            let err = ToneKernel::try_new(ToneConfig {
                frequency,
                amplitude,
                phase_degrees,
            })
            .expect_err("invalid tone");
            assert!(matches!(err, ConfigError::InvalidArgument { arg: a, .. } if a == arg));
        }
    }

    #[test]
    fn tone_kernel_run_into_checks_output_length() {
        let kernel = ToneKernel::try_new(ToneConfig {
            frequency: 1.0f32,
            amplitude: 1.0,
            phase_degrees: 0.0,
        })
        .expect("valid tone");
        let mut out = [0.0f32; 2];
        assert!(kernel.run_into(&[0.0f32, 0.1, 0.2], &mut out).is_err());
    }
}
