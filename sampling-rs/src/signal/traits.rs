//! Trait interfaces for signal-processing capabilities.
//!
//! Every kernel exposes `run_into`, writing into a caller-provided buffer, and
//! `run_alloc`, returning freshly allocated output.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};

/// Output pair of sample times and sample values.
pub type SampledPair<T> = (Vec<T>, Vec<T>);

/// Output pair of spectrum frequencies and magnitudes.
pub type SpectrumPair<T> = (Vec<T>, Vec<T>);

/// 1D uniform sampling capability.
pub trait Sample1D<T> {
    /// Number of samples produced per run.
    fn sample_count(&self) -> usize;

    /// Sample `values` taken on `time_axis` into caller-provided buffers.
    fn run_into<V, A, OT, OV>(
        &self,
        values: &V,
        time_axis: &A,
        out_times: &mut OT,
        out_values: &mut OV,
    ) -> Result<(), ExecInvariantViolation>
    where
        V: Read1D<T> + ?Sized,
        A: Read1D<T> + ?Sized,
        OT: Write1D<T> + ?Sized,
        OV: Write1D<T> + ?Sized;

    /// Sample `values` taken on `time_axis` and allocate output.
    fn run_alloc<V, A>(&self, values: &V, time_axis: &A) -> Result<SampledPair<T>, ExecInvariantViolation>
    where
        V: Read1D<T> + ?Sized,
        A: Read1D<T> + ?Sized;
}

/// 1D reconstruction-from-samples capability.
pub trait Reconstruct1D<T> {
    /// Reconstruct at `query` times into a caller-provided output buffer.
    fn run_into<ST, SV, Q, O>(
        &self,
        sample_times: &ST,
        sample_values: &SV,
        query: &Q,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        ST: Read1D<T> + ?Sized,
        SV: Read1D<T> + ?Sized,
        Q: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Reconstruct at `query` times and allocate output.
    fn run_alloc<ST, SV, Q>(
        &self,
        sample_times: &ST,
        sample_values: &SV,
        query: &Q,
    ) -> Result<Vec<T>, ExecInvariantViolation>
    where
        ST: Read1D<T> + ?Sized,
        SV: Read1D<T> + ?Sized,
        Q: Read1D<T> + ?Sized;
}

/// Additive-noise capability. Runs advance the kernel's random state.
pub trait AddNoise1D<T> {
    /// Add noise to `input` into a caller-provided output buffer.
    fn run_into<I, O>(&mut self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Add noise to `input` and allocate output.
    fn run_alloc<I>(&mut self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Two-segment gluing capability.
pub trait Glue1D<T> {
    /// Length of the glued output for segments of the given lengths.
    fn output_len(&self, left_len: usize, right_len: usize) -> usize;

    /// Glue `left` and `right` into a caller-provided output buffer.
    fn run_into<L, R, O>(&self, left: &L, right: &R, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        L: Read1D<T> + ?Sized,
        R: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Glue `left` and `right` and allocate output.
    fn run_alloc<L, R>(&self, left: &L, right: &R) -> Result<Vec<T>, ExecInvariantViolation>
    where
        L: Read1D<T> + ?Sized,
        R: Read1D<T> + ?Sized;
}

/// Single-sided amplitude spectrum capability.
pub trait AmplitudeSpectrum1D<T> {
    /// Compute the spectrum of `input` into caller-provided buffers of
    /// `ceil(len / 2)` bins.
    fn run_into<I, OF, OM>(
        &self,
        input: &I,
        out_freqs: &mut OF,
        out_mags: &mut OM,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        OF: Write1D<T> + ?Sized,
        OM: Write1D<T> + ?Sized;

    /// Compute the spectrum of `input` and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<SpectrumPair<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// 1D sinusoidal tone generation capability.
pub trait ToneWave1D<T> {
    /// Generate the tone at the times in `input` into a caller-provided buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Generate the tone at the times in `input` and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}
