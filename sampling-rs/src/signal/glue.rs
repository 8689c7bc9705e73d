//! Stitching two signal segments across a gap or an overlap.
//!
//! The left segment occupies positions `0..len(left)` and the right segment
//! starts at `len(left) + gap`. A negative gap slides the right segment back
//! over the tail of the left one. The seam is replaced by a bridge of fixed
//! resolution evaluated from an [`Interp1d`] fitted through the samples
//! around it.

use super::linspace;
use super::traits::Glue1D;
use super::Signal;
use crate::error::Error;
use crate::interpolate::{InterpKind, Interp1d, Interpolant};
use crate::kernel::{
    bind_output, read_nonempty, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D,
    Write1D,
};
use itertools::Itertools;
use tracing::debug;

/// Constructor config for [`GlueKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlueConfig {
    /// Empty samples between the segments when positive, overlapping
    /// samples when negative.
    pub gap: isize,
    /// Interpolation order of the bridge.
    pub order: InterpKind,
    /// Number of bridge samples.
    pub resolution: usize,
}

impl GlueConfig {
    /// Bridge resolution used unless configured otherwise.
    pub const DEFAULT_RESOLUTION: usize = 100;

    /// Glue across `gap` with the given bridge order.
    pub fn new(gap: isize, order: InterpKind) -> Self {
        Self {
            gap,
            order,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self::new(0, InterpKind::Linear)
    }
}

/// Trait-first two-segment glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlueKernel {
    gap: isize,
    order: InterpKind,
    resolution: usize,
}

impl GlueKernel {
    /// Samples on each side of the seam fed to the fit besides the overlap.
    pub fn context(&self) -> usize {
        match self.order {
            InterpKind::Zero | InterpKind::Linear => 1,
            InterpKind::Quadratic | InterpKind::Cubic => 2,
        }
    }

    /// Overlapping samples for segments of the given lengths.
    pub fn overlap(&self, left_len: usize, right_len: usize) -> usize {
        if self.gap < 0 {
            self.gap.unsigned_abs().min(left_len).min(right_len)
        } else {
            0
        }
    }

    /// Fit nodes around the seam, coincident positions averaged.
    pub fn bridge_nodes(&self, left: &[f64], right: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let overlap = self.overlap(left.len(), right.len());
        let offset = if self.gap < 0 {
            left.len() as f64 - overlap as f64
        } else {
            left.len() as f64 + self.gap as f64
        };
        let left_from = left.len().saturating_sub(overlap + self.context());
        let right_to = (overlap + self.context()).min(right.len());

        let left_nodes = left[left_from..]
            .iter()
            .enumerate()
            .map(|(i, &v)| ((left_from + i) as f64, v));
        let right_nodes = right[..right_to]
            .iter()
            .enumerate()
            .map(|(j, &v)| (offset + j as f64, v));

        left_nodes
            .chain(right_nodes)
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .chunk_by(|node| node.0)
            .into_iter()
            .map(|(x, group)| {
                let (sum, count) = group.fold((0.0, 0usize), |(s, n), (_, v)| (s + v, n + 1));
                (x, sum / count as f64)
            })
            .unzip()
    }

    fn bridge(&self, left: &[f64], right: &[f64]) -> Result<Vec<f64>, ExecInvariantViolation> {
        let (x, y) = self.bridge_nodes(left, right);
        debug!(
            gap = self.gap,
            order = %self.order,
            nodes = x.len(),
            "fitting glue bridge"
        );
        let fit = Interp1d::new(&x, &y, self.order, 0.0)?;
        let (lo, hi) = fit.bounds();
        Ok(fit.evaluate_many(&linspace(lo, hi, self.resolution)))
    }
}

impl KernelLifecycle for GlueKernel {
    type Config = GlueConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.resolution < 2 {
            return Err(ConfigError::InvalidArgument {
                arg: "resolution",
                reason: "bridge resolution must be >= 2",
            });
        }
        Ok(Self {
            gap: config.gap,
            order: config.order,
            resolution: config.resolution,
        })
    }
}

impl Glue1D<f64> for GlueKernel {
    fn output_len(&self, left_len: usize, right_len: usize) -> usize {
        let overlap = self.overlap(left_len, right_len);
        left_len - overlap + self.resolution + right_len - overlap
    }

    fn run_into<L, R, O>(&self, left: &L, right: &R, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        L: Read1D<f64> + ?Sized,
        R: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let left = read_nonempty(left, "left")?;
        let right = read_nonempty(right, "right")?;
        let out = bind_output(out, "out", self.output_len(left.len(), right.len()))?;
        let overlap = self.overlap(left.len(), right.len());
        let bridge = self.bridge(left, right)?;

        let head = &left[..left.len() - overlap];
        let tail = &right[overlap..];
        out.iter_mut()
            .zip(head.iter().chain(bridge.iter()).chain(tail.iter()))
            .for_each(|(o, &v)| *o = v);
        Ok(())
    }

    fn run_alloc<L, R>(&self, left: &L, right: &R) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        L: Read1D<f64> + ?Sized,
        R: Read1D<f64> + ?Sized,
    {
        let left = read_nonempty(left, "left")?;
        let right = read_nonempty(right, "right")?;
        let mut out = vec![0.0; self.output_len(left.len(), right.len())];
        self.run_into(left, right, &mut out)?;
        Ok(out)
    }
}

/// Glue `left` and `right` across `gap` with a bridge of the given order.
///
/// ```
/// use sampling_rs::interpolate::InterpKind;
/// use sampling_rs::signal::glue::glue;
///
/// let glued = glue(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0], 0, InterpKind::Linear).expect("glue");
/// assert_eq!(glued.len(), 106);
/// assert_eq!(glued[3], 3.0);
/// assert_eq!(glued[102], 3.0);
/// ```
pub fn glue(left: &[f64], right: &[f64], gap: isize, order: InterpKind) -> Result<Vec<f64>, Error> {
    let kernel = GlueKernel::try_new(GlueConfig::new(gap, order))?;
    Ok(kernel.run_alloc(left, right)?)
}

/// Two segments and the spacing between them.
#[derive(Debug, Clone, PartialEq)]
pub struct GlueSpec {
    /// Segment kept at the front.
    pub left: Signal,
    /// Segment appended after the seam.
    pub right: Signal,
    /// Gap (positive) or overlap (negative) in samples.
    pub gap: isize,
}

impl GlueSpec {
    /// Glue the segments into a signal at the left segment's sample rate.
    pub fn glue(&self, order: InterpKind) -> Result<Signal, Error> {
        let data = glue(self.left.data(), self.right.data(), self.gap, order)?;
        Ok(Signal::new(data, self.left.sample_rate())?
            .with_label(format!("{} + {}", self.left.label(), self.right.label())))
    }
}
