//! Sampling, reconstruction, noise, gluing and spectral kernels.
//!
//! Each capability follows the same shape: a `*Config` validated into a
//! `*Kernel` through [`crate::kernel::KernelLifecycle`], a capability trait in
//! [`traits`], and a convenience free function that wires the two together
//! and reports failures as [`crate::Error`].

use num_traits::Float;

mod buffer;
pub mod composite;
pub mod glue;
pub mod noise;
pub mod reconstruct;
pub mod sampler;
pub mod spectral;
pub mod traits;
pub mod wave;

pub use buffer::*;

///
/// Return `num` evenly spaced values over `[start, stop]`, like `numpy.linspace`.
///
/// ```
/// use sampling_rs::signal::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace<F: Float>(start: F, stop: F, num: usize) -> Vec<F> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let Some(intervals) = F::from(num - 1) else {
                return Vec::new();
            };
            let step = (stop - start) / intervals;
            let mut out: Vec<F> = (0..num)
                .map(|i| start + F::from(i).map_or(F::zero(), |i| i * step))
                .collect();
            out[num - 1] = stop;
            out
        }
    }
}
