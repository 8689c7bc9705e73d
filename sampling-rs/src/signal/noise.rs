//! Additive white Gaussian noise at a target signal-to-noise ratio.

use super::traits::AddNoise1D;
use crate::error::Error;
use crate::kernel::{
    bind_output, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D,
};
use crate::stats::mean_power;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Constructor config for [`NoiseKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseConfig {
    /// Target signal-to-noise ratio in decibels.
    pub snr_db: f64,
    /// Seed for reproducible noise; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl NoiseConfig {
    /// Default SNR of a freshly created composite signal.
    pub const DEFAULT_SNR_DB: f64 = 20.0;
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            snr_db: Self::DEFAULT_SNR_DB,
            seed: None,
        }
    }
}

/// Adds `N(0, sqrt(P_s / 10^(snr/10)))` noise, where `P_s = mean(x²)`.
#[derive(Debug, Clone)]
pub struct NoiseKernel {
    snr_db: f64,
    rng: StdRng,
}

impl NoiseKernel {
    /// Configured SNR in decibels.
    pub fn snr_db(&self) -> f64 {
        self.snr_db
    }

    /// Noise standard deviation for a signal of mean power `signal_power`.
    pub fn noise_std(&self, signal_power: f64) -> f64 {
        (signal_power / 10f64.powf(self.snr_db / 10.0)).sqrt()
    }
}

impl KernelLifecycle for NoiseKernel {
    type Config = NoiseConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.snr_db.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "snr_db",
                reason: "SNR must be finite",
            });
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            snr_db: config.snr_db,
            rng,
        })
    }
}

impl AddNoise1D<f64> for NoiseKernel {
    fn run_into<I, O>(&mut self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = bind_output(out, "out", input.len())?;
        let power = mean_power::<_, f64>(input.iter());
        if power == 0.0 {
            out.copy_from_slice(input);
            return Ok(());
        }
        if !power.is_finite() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "signal power must be finite",
            });
        }
        let dist = Normal::new(0.0, self.noise_std(power)).map_err(|_| {
            ExecInvariantViolation::InvalidState {
                reason: "signal power must be finite",
            }
        })?;
        out.iter_mut()
            .zip(input.iter())
            .for_each(|(o, &x)| *o = x + dist.sample(&mut self.rng));
        Ok(())
    }

    fn run_alloc<I>(&mut self, input: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let len = input.read_slice().map_err(ExecInvariantViolation::from)?.len();
        let mut out = vec![0.0; len];
        self.run_into(input, &mut out)?;
        Ok(out)
    }
}

/// Return `signal` plus Gaussian noise at `snr_db`, drawing from OS entropy.
pub fn add_noise(signal: &[f64], snr_db: f64) -> Result<Vec<f64>, Error> {
    let mut kernel = NoiseKernel::try_new(NoiseConfig { snr_db, seed: None })?;
    Ok(kernel.run_alloc(signal)?)
}

/// Like [`add_noise`] with a fixed seed, so repeated calls agree.
pub fn add_noise_seeded(signal: &[f64], snr_db: f64, seed: u64) -> Result<Vec<f64>, Error> {
    let mut kernel = NoiseKernel::try_new(NoiseConfig {
        snr_db,
        seed: Some(seed),
    })?;
    Ok(kernel.run_alloc(signal)?)
}
