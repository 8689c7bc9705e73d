use super::{linspace, Signal};
use crate::error::Error;
use crate::kernel::KernelLifecycle;
use crate::signal::traits::ToneWave1D;
use nalgebra::RealField;
use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::FromPrimitive;

mod kernels;
pub use kernels::*;

/// Sample rate of the built-in demo waveforms.
pub const DEMO_SAMPLE_RATE: f64 = 100.0;

/// Return the sinusoid `amplitude * sin(2*pi*frequency*t + phase)` evaluated
/// at every time in `t`, with the phase given in degrees.
pub fn tone<F, S, D>(
    t: &ArrayBase<S, D>,
    frequency: F,
    amplitude: F,
    phase_degrees: F,
) -> Result<Array<F, D>, Error>
where
    F: RealField + Copy + FromPrimitive,
    S: Data<Elem = F>,
    D: Dimension,
{
    let kernel = ToneKernel::try_new(ToneConfig {
        frequency,
        amplitude,
        phase_degrees,
    })?;
    let flat_t = t.iter().copied().collect::<Vec<_>>();
    let flat_y = kernel.run_alloc(&flat_t)?;
    Array::from_shape_vec(t.raw_dim(), flat_y).map_err(|_| Error::LengthMismatch {
        arg: "t".into(),
        expected: t.len(),
        got: flat_t.len(),
    })
}

fn demo_axis(points: usize) -> Vec<f64> {
    linspace(0.0, points as f64 / DEMO_SAMPLE_RATE, points)
}

fn demo(label: &str, data: Vec<f64>) -> Result<Signal, Error> {
    Ok(Signal::new(data, DEMO_SAMPLE_RATE)?.with_label(label))
}

/// Unit step that is high for `t < 0.5` s, at [`DEMO_SAMPLE_RATE`].
pub fn demo_step(points: usize) -> Result<Signal, Error> {
    let data = demo_axis(points)
        .into_iter()
        .map(|t| if t < 0.5 { 1.0 } else { 0.0 })
        .collect();
    demo("step", data)
}

/// 5 Hz unit sine at [`DEMO_SAMPLE_RATE`].
pub fn demo_sine(points: usize) -> Result<Signal, Error> {
    let kernel = ToneKernel::try_new(ToneConfig {
        frequency: 5.0,
        amplitude: 1.0,
        phase_degrees: 0.0,
    })?;
    demo("sine", kernel.run_alloc(&demo_axis(points))?)
}

/// 5 Hz unit cosine at [`DEMO_SAMPLE_RATE`].
pub fn demo_cosine(points: usize) -> Result<Signal, Error> {
    let kernel = ToneKernel::try_new(ToneConfig {
        frequency: 5.0,
        amplitude: 1.0,
        phase_degrees: 90.0,
    })?;
    demo("cosine", kernel.run_alloc(&demo_axis(points))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn tone_preserves_shape() {
        let t = array![[0.0, 0.25], [0.5, 0.75]];
        let y = tone(&t, 1.0, 2.0, 0.0).expect("tone");
        assert_eq!(y.shape(), &[2, 2]);
        assert_abs_diff_eq!(y[[0, 1]], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[[1, 1]], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn tone_reports_invalid_parameters() {
        let t = array![0.0, 1.0];
        assert!(matches!(
            tone(&t, f64::NAN, 1.0, 0.0),
            Err(Error::InvalidConfig { ref arg, .. }) if arg == "frequency"
        ));
    }

    #[test]
    fn demo_waveforms() {
        let step = demo_step(100).expect("step");
        assert_eq!(step.len(), 100);
        assert_eq!(step.sample_rate(), DEMO_SAMPLE_RATE);
        assert_eq!(step.data()[0], 1.0);
        assert_eq!(step.data()[99], 0.0);

        let sine = demo_sine(200).expect("sine");
        let cosine = demo_cosine(200).expect("cosine");
        assert_abs_diff_eq!(sine.data()[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cosine.data()[0], 1.0, epsilon = 1e-12);
        assert_eq!(cosine.label(), "cosine");
    }
}
