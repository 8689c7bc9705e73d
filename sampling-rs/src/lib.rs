//! Sampling, reconstruction and gluing of one-dimensional signals.
//!
//! `sampling-rs` demonstrates the sampling theorem numerically. A densely
//! tabulated signal is sampled at a chosen rate ([`signal::sampler`]),
//! rebuilt on the dense time base with one of several interpolation kernels
//! ([`signal::reconstruct`]) and compared against the original in time and
//! frequency ([`stats`], [`signal::spectral`]). Independently,
//! [`signal::glue`] stitches two segments across a gap or an overlap.
//!
//! Kernels follow one shape: a `*Config` validated into a `*Kernel` through
//! [`kernel::KernelLifecycle`], a capability trait from [`signal::traits`]
//! with `run_into`/`run_alloc`, and a convenience free function returning
//! [`Error`].
//!
//! ```
//! use sampling_rs::signal::{linspace, reconstruct::{reconstruct, ReconstructionMethod}, sampler::sample};
//!
//! let t = linspace(0.0, 1.0, 1000);
//! let y: Vec<f64> = t.iter().map(|&t| (2.0 * std::f64::consts::PI * 3.0 * t).sin()).collect();
//! let (ts, ys) = sample(&y, &t, 20, 1.0).expect("sample");
//! let rebuilt = reconstruct(&ts, &ys, &t, ReconstructionMethod::CubicSpline).expect("reconstruct");
//! assert_eq!(rebuilt.len(), t.len());
//! ```
#![warn(missing_docs)]

pub mod error;
pub mod interpolate;
pub mod io;
pub mod kernel;
pub mod linalg;
pub mod session;
pub mod signal;
pub mod stats;

pub use error::Error;
