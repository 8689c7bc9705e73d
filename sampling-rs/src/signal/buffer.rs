use super::linspace;
use crate::error::Error;
use crate::kernel::{ensure_positive, ConfigError, Read1D};
use crate::stats::{describe, SignalStatistics};

/// Sampled data with its sample rate.
///
/// The time axis is derived, never stored: sample `i` of `n` sits at
/// `linspace(0, n / sample_rate, n)[i]`. Only the label can change after
/// construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSignal"))]
pub struct Signal {
    data: Vec<f64>,
    sample_rate: f64,
    label: String,
}

/// Unchecked wire form of [`Signal`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSignal {
    data: Vec<f64>,
    sample_rate: f64,
    label: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSignal> for Signal {
    type Error = Error;

    fn try_from(raw: RawSignal) -> Result<Self, Self::Error> {
        Ok(Signal::new(raw.data, raw.sample_rate)?.with_label(raw.label))
    }
}

impl Signal {
    /// Wrap `data` sampled at `sample_rate` Hz.
    pub fn new(data: Vec<f64>, sample_rate: f64) -> Result<Self, Error> {
        ensure_positive(sample_rate, "sample_rate", "sample rate must be finite and > 0")?;
        Ok(Self {
            data,
            sample_rate,
            label: String::from("signal"),
        })
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Sample values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `len / sample_rate` in seconds.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.sample_rate
    }

    /// Time of every sample, `linspace(0, duration, len)`.
    pub fn time_axis(&self) -> Vec<f64> {
        linspace(0.0, self.duration(), self.data.len())
    }

    /// Consume the signal and return its samples.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Copy the inclusive index range `[start, end]` into a new signal.
    ///
    /// Both bounds are clamped to the valid index range and swapped when
    /// given in reverse order, so any selection yields at least one sample.
    pub fn sub_signal(&self, start: usize, end: usize) -> Result<Signal, Error> {
        if self.data.is_empty() {
            return Err(Error::InsufficientData {
                arg: self.label.clone(),
            });
        }
        let last = self.data.len() - 1;
        let (mut lo, mut hi) = (start.min(last), end.min(last));
        if lo > hi {
            core::mem::swap(&mut lo, &mut hi);
        }
        Ok(Signal {
            data: self.data[lo..=hi].to_vec(),
            sample_rate: self.sample_rate,
            label: self.label.clone(),
        })
    }

    /// Mean, spread, extrema and duration of the samples.
    pub fn statistics(&self) -> Result<SignalStatistics, Error> {
        Ok(describe(&self.data, self.sample_rate)?)
    }
}

impl Read1D<f64> for Signal {
    fn read_slice(&self) -> Result<&[f64], ConfigError> {
        Ok(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn time_axis_matches_length() {
        let signal = Signal::new(vec![0.0; 5], 4.0).expect("signal");
        let t = signal.time_axis();
        assert_eq!(t.len(), signal.len());
        assert_eq!(t[0], 0.0);
        assert_relative_eq!(t[4], 1.25);
        assert_relative_eq!(signal.duration(), 1.25);
    }

    #[test]
    fn rejects_bad_sample_rate() {
        for fs in [0.0, -5.0, f64::NAN] {
            let err = Signal::new(vec![1.0], fs).expect_err("bad rate");
            assert!(matches!(err, Error::InvalidConfig { ref arg, .. } if arg == "sample_rate"));
        }
    }

    #[test]
    fn sub_signal_clamps_and_orders_bounds() {
        let signal = Signal::new((0..10).map(f64::from).collect(), 10.0)
            .expect("signal")
            .with_label("ramp");
        let sub = signal.sub_signal(7, 2).expect("reversed range");
        assert_eq!(sub.data(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(sub.label(), "ramp");

        let tail = signal.sub_signal(8, 400).expect("clamped range");
        assert_eq!(tail.data(), &[8.0, 9.0]);

        let empty = Signal::new(Vec::new(), 1.0).expect("empty signal");
        assert!(matches!(
            empty.sub_signal(0, 1),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn label_is_the_only_mutable_field() {
        let mut signal = Signal::new(vec![1.0, 2.0], 2.0).expect("signal");
        assert_eq!(signal.label(), "signal");
        signal.set_label("imported");
        assert_eq!(signal.label(), "imported");
        assert_eq!(signal.read_slice().expect("read"), &[1.0, 2.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_sample_rate() {
        let signal = Signal::new(vec![0.5, -0.5], 8.0).expect("signal").with_label("pair");
        let json = serde_json::to_string(&signal).expect("serialize");
        let back: Signal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, signal);

        for rate in ["0.0", "-4.0"] {
            let json = format!(r#"{{"data":[1.0],"sample_rate":{rate},"label":"bad"}}"#);
            assert!(serde_json::from_str::<Signal>(&json).is_err(), "rate {rate}");
        }
    }
}
