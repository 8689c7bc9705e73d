use super::{ConfigError, ExecInvariantViolation};

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Adapter trait for reading contiguous 1D input.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Adapter trait for writing contiguous 1D output.
pub trait Write1D<T> {
    /// Borrow the underlying output as a mutable contiguous slice.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<'a, T> Read1D<T> for ArrayView1<'a, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

impl<'a, T> Write1D<T> for ArrayViewMut1<'a, T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut().ok_or(ConfigError::NonContiguous {
            arg: "array_view_mut",
        })
    }
}

/// Borrow an input adapter, rejecting it when empty.
pub(crate) fn read_nonempty<'a, T, I>(
    input: &'a I,
    arg: &'static str,
) -> Result<&'a [T], ExecInvariantViolation>
where
    I: Read1D<T> + ?Sized,
{
    let slice = input.read_slice().map_err(ExecInvariantViolation::from)?;
    if slice.is_empty() {
        return Err(ExecInvariantViolation::Config(ConfigError::EmptyInput {
            arg,
        }));
    }
    Ok(slice)
}

/// Borrow an output adapter and check that it holds exactly `expected` slots.
pub(crate) fn bind_output<'a, T, O>(
    out: &'a mut O,
    arg: &'static str,
    expected: usize,
) -> Result<&'a mut [T], ExecInvariantViolation>
where
    O: Write1D<T> + ?Sized,
{
    let slice = out
        .write_slice_mut()
        .map_err(ExecInvariantViolation::from)?;
    if slice.len() != expected {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg,
            expected,
            got: slice.len(),
        });
    }
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_array_adapters() {
        let a = [0.0f64, 0.5, 1.0];
        assert_eq!(a.read_slice().expect("array adapter").len(), 3);

        let s: &[f64] = &a;
        assert_eq!(s.read_slice().expect("slice adapter")[1], 0.5);
    }

    #[test]
    fn ndarray_adapters() {
        let arr = Array1::linspace(0.0f64, 1.0, 5);
        assert_eq!(arr.read_slice().expect("array1 read")[4], 1.0);

        let mut out = Array1::from(vec![0.0f64; 3]);
        out.write_slice_mut()
            .expect("array1 write")
            .copy_from_slice(&[4.0, 5.0, 6.0]);
        assert_eq!(out.as_slice().expect("slice"), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn strided_view_is_rejected() {
        let arr = Array1::from(vec![1.0f64, 2.0, 3.0, 4.0]);
        let view = arr.slice(ndarray::s![..;2]);
        assert_eq!(
            view.read_slice().expect_err("strided view"),
            ConfigError::NonContiguous { arg: "array_view" }
        );
    }

    #[test]
    fn read_nonempty_rejects_empty_input() {
        let empty: Vec<f64> = Vec::new();
        let err = read_nonempty(&empty, "signal").expect_err("empty input");
        assert_eq!(
            err,
            ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "signal" })
        );
    }

    #[test]
    fn bind_output_checks_length() {
        let mut out = vec![0.0f64; 4];
        let err = bind_output(&mut out, "out", 5).expect_err("short buffer");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                expected: 5,
                got: 4,
                ..
            }
        ));
        assert_eq!(bind_output(&mut out, "out", 4).expect("bound").len(), 4);
    }
}
