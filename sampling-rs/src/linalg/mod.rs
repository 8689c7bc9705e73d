//! Linear algebra helpers backing the spline interpolants.

mod tridiagonal;

pub use tridiagonal::*;
