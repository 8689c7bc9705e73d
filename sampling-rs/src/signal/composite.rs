//! Signals mixed from parametric tones and imported recordings.

use core::fmt;
use std::sync::Arc;

use super::noise::{NoiseConfig, NoiseKernel};
use super::traits::AddNoise1D;
use super::wave::{ToneConfig, ToneKernel};
use super::Signal;
use crate::error::Error;
use crate::interpolate::resample_linear;
use crate::kernel::KernelLifecycle;

/// One addend of a [`CompositeSignal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// `amplitude * sin(2*pi*frequency*t + phase)`.
    Parametric {
        /// Frequency in Hz.
        frequency: f64,
        /// Peak amplitude.
        amplitude: f64,
        /// Phase offset in degrees.
        phase_degrees: f64,
    },
    /// Recorded samples, stretched linearly onto the composite time base.
    Imported(Arc<Signal>),
}

impl Component {
    /// Zero-phase tone.
    pub fn tone(frequency: f64, amplitude: f64) -> Self {
        Component::Parametric {
            frequency,
            amplitude,
            phase_degrees: 0.0,
        }
    }

    /// Highest frequency this component can carry: the tone frequency, or
    /// the Nyquist frequency of an imported recording.
    pub fn bandwidth(&self) -> f64 {
        match self {
            Component::Parametric { frequency, .. } => frequency.abs(),
            Component::Imported(signal) => signal.sample_rate() / 2.0,
        }
    }

    fn accumulate(&self, time: &[f64], acc: &mut [f64]) -> Result<(), Error> {
        match self {
            Component::Parametric {
                frequency,
                amplitude,
                phase_degrees,
            } => {
                let kernel = ToneKernel::try_new(ToneConfig {
                    frequency: *frequency,
                    amplitude: *amplitude,
                    phase_degrees: *phase_degrees,
                })?;
                for (a, &t) in acc.iter_mut().zip(time.iter()) {
                    *a += kernel.sample(t);
                }
            }
            Component::Imported(signal) => {
                let stretched = resample_linear(signal.data(), time.len())?;
                for (a, v) in acc.iter_mut().zip(stretched) {
                    *a += v;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Parametric {
                frequency,
                amplitude,
                phase_degrees,
            } => write!(
                f,
                "Frequency: {frequency} Hz, Amplitude: {amplitude}, Phase: {phase_degrees} deg"
            ),
            Component::Imported(signal) => {
                write!(f, "Title: {}, Length: {} samples", signal.label(), signal.len())
            }
        }
    }
}

impl From<Signal> for Component {
    fn from(signal: Signal) -> Self {
        Component::Imported(Arc::new(signal))
    }
}

/// Ordered list of components summed on a common time base, with optional
/// additive noise.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSignal {
    components: Vec<Component>,
    noise: Option<NoiseConfig>,
}

impl Default for CompositeSignal {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            noise: Some(NoiseConfig::default()),
        }
    }
}

impl CompositeSignal {
    /// Empty mix with noise at [`NoiseConfig::DEFAULT_SNR_DB`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the noise setting; `None` mixes noise-free.
    pub fn with_noise(mut self, noise: Option<NoiseConfig>) -> Self {
        self.noise = noise;
        self
    }

    /// Current noise setting.
    pub fn noise(&self) -> Option<NoiseConfig> {
        self.noise
    }

    /// Change the noise setting in place.
    pub fn set_noise(&mut self, noise: Option<NoiseConfig>) {
        self.noise = noise;
    }

    /// Components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the mix has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Append a component.
    pub fn add(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }

    /// Drop the most recently added component.
    pub fn remove(&mut self) -> Option<Component> {
        self.components.pop()
    }

    /// Drop the component at `index`, if present.
    pub fn remove_at(&mut self, index: usize) -> Option<Component> {
        (index < self.components.len()).then(|| self.components.remove(index))
    }

    /// Drop every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    /// Largest [`Component::bandwidth`], `None` for an empty mix.
    pub fn f_max(&self) -> Option<f64> {
        self.components
            .iter()
            .map(Component::bandwidth)
            .reduce(f64::max)
    }

    /// Sum every component at the times in `time` and add the configured noise.
    pub fn compose(&self, time: &[f64]) -> Result<Vec<f64>, Error> {
        let mixed = self.compose_clean(time)?;
        match self.noise {
            Some(config) => Ok(NoiseKernel::try_new(config)?.run_alloc(&mixed)?),
            None => Ok(mixed),
        }
    }

    /// Sum every component at the times in `time` without noise.
    pub fn compose_clean(&self, time: &[f64]) -> Result<Vec<f64>, Error> {
        let mut mixed = vec![0.0; time.len()];
        for component in &self.components {
            component.accumulate(time, &mut mixed)?;
        }
        Ok(mixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::linspace;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::PI;

    fn quiet() -> CompositeSignal {
        CompositeSignal::new().with_noise(None)
    }

    #[test]
    fn sums_parametric_components() {
        let mut mix = quiet();
        mix.add(Component::tone(5.0, 1.0));
        mix.add(Component::tone(15.0, 0.5));
        let t = linspace(0.0, 1.0, 101);
        let y = mix.compose(&t).expect("compose");
        for (yi, ti) in y.iter().zip(t.iter()) {
            let want = (2.0 * PI * 5.0 * ti).sin() + 0.5 * (2.0 * PI * 15.0 * ti).sin();
            assert_abs_diff_eq!(*yi, want, epsilon = 1e-12);
        }
        assert_eq!(mix.f_max(), Some(15.0));
    }

    #[test]
    fn imported_data_is_stretched_to_time_base() {
        let mut mix = quiet();
        let recording = Signal::new(vec![0.0, 2.0], 4.0).expect("recording").with_label("rec");
        mix.add(recording);
        let y = mix.compose(&linspace(0.0, 1.0, 5)).expect("compose");
        assert_eq!(y, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(mix.f_max(), Some(2.0));
        assert_eq!(mix.components()[0].to_string(), "Title: rec, Length: 2 samples");
    }

    #[test]
    fn add_remove_and_clear() {
        let mut mix = quiet();
        assert_eq!(mix.f_max(), None);
        mix.add(Component::tone(1.0, 1.0));
        mix.add(Component::tone(2.0, 1.0));
        mix.add(Component::tone(3.0, 1.0));
        assert_eq!(mix.remove(), Some(Component::tone(3.0, 1.0)));
        assert_eq!(mix.remove_at(0), Some(Component::tone(1.0, 1.0)));
        assert_eq!(mix.remove_at(5), None);
        assert_eq!(mix.len(), 1);
        mix.clear();
        assert!(mix.is_empty());
        assert_eq!(mix.compose(&[0.0, 1.0]).expect("empty mix"), vec![0.0, 0.0]);
    }

    #[test]
    fn seeded_noise_is_added_on_top() {
        let mut mix = CompositeSignal::new().with_noise(Some(NoiseConfig {
            snr_db: 10.0,
            seed: Some(3),
        }));
        mix.add(Component::tone(5.0, 1.0));
        let t = linspace(0.0, 1.0, 200);
        let clean = mix.compose_clean(&t).expect("clean");
        let a = mix.compose(&t).expect("noisy");
        let b = mix.compose(&t).expect("noisy again");
        assert_eq!(a, b);
        assert_ne!(a, clean);
        assert_eq!(CompositeSignal::new().noise().map(|n| n.snr_db), Some(20.0));
    }

    #[test]
    fn rejects_non_finite_tone() {
        let mut mix = quiet();
        mix.add(Component::tone(f64::NAN, 1.0));
        assert!(matches!(
            mix.compose(&[0.0]),
            Err(Error::InvalidConfig { ref arg, .. }) if arg == "frequency"
        ));
    }
}
