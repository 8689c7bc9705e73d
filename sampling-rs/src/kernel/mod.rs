//! Shared trait-first kernel substrate.
//!
//! This module defines the constructor validation lifecycle, the two error
//! layers, and the 1D buffer adapters used by every sampling, reconstruction
//! and gluing kernel.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::{Read1D, Write1D};
pub(crate) use io::{bind_output, read_nonempty};
pub use lifecycle::KernelLifecycle;
pub(crate) use lifecycle::ensure_positive;
