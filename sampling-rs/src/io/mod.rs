//! Loading and saving single-channel signals.
//!
//! Three input formats are understood, chosen by file extension:
//!
//! * `.csv`: sample rate on the first line, comma separated samples after it.
//! * `.txt`: whitespace separated samples.
//! * `.bin`: raw little-endian `f32` samples.
//!
//! Text and binary files carry no rate, so [`LoadOptions::sample_rate`]
//! applies. Signals are always saved as CSV.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Error;
use crate::signal::Signal;
use tracing::debug;

mod parse;
pub use parse::*;

/// On-disk signal encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalFormat {
    /// Rate header plus comma separated samples.
    Csv,
    /// Whitespace separated samples.
    Text,
    /// Little-endian `f32` samples.
    Binary,
}

impl SignalFormat {
    /// Pick the format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SignalFormat::Csv),
            "txt" => Ok(SignalFormat::Text),
            "bin" => Ok(SignalFormat::Binary),
            _ => Err(Error::unsupported(format!(
                "unknown signal file extension `{ext}` ({})",
                path.display()
            ))),
        }
    }
}

/// Options for [`load_signal_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadOptions {
    /// Rate assigned to formats without a rate header.
    pub sample_rate: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { sample_rate: 1.0 }
    }
}

/// Load a signal with default [`LoadOptions`].
pub fn load_signal(path: impl AsRef<Path>) -> Result<Signal, Error> {
    load_signal_with(path, LoadOptions::default())
}

/// Load a signal, labelled with the file stem.
pub fn load_signal_with(path: impl AsRef<Path>, options: LoadOptions) -> Result<Signal, Error> {
    let path = path.as_ref();
    let format = SignalFormat::from_path(path)?;
    let signal = match format {
        SignalFormat::Csv => read_csv(BufReader::new(File::open(path)?))?,
        SignalFormat::Text => parse_text(&std::fs::read_to_string(path)?, options.sample_rate)?,
        SignalFormat::Binary => decode_f32_le(&std::fs::read(path)?, options.sample_rate)?,
    };
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("signal"));
    debug!(
        path = %path.display(),
        ?format,
        samples = signal.len(),
        sample_rate = signal.sample_rate(),
        "loaded signal"
    );
    Ok(signal.with_label(label))
}

/// Save `signal` as CSV at `path`.
pub fn save_csv(path: impl AsRef<Path>, signal: &Signal) -> Result<(), Error> {
    let path = path.as_ref();
    write_csv(BufWriter::new(File::create(path)?), signal)?;
    debug!(path = %path.display(), samples = signal.len(), "saved signal");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SignalFormat::from_path(Path::new("a/b/ecg.CSV")).expect("csv"),
            SignalFormat::Csv
        );
        assert_eq!(
            SignalFormat::from_path(Path::new("x.txt")).expect("txt"),
            SignalFormat::Text
        );
        assert_eq!(
            SignalFormat::from_path(Path::new("x.bin")).expect("bin"),
            SignalFormat::Binary
        );
        assert!(matches!(
            SignalFormat::from_path(Path::new("x.wav")),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!(SignalFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn save_then_load_restores_signal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.csv");
        let signal = Signal::new(vec![0.25, -1.0 / 3.0, 7.0e-12], 250.0).expect("signal");
        save_csv(&path, &signal).expect("save");
        let back = load_signal(&path).expect("load");
        assert_eq!(back.data(), signal.data());
        assert_eq!(back.sample_rate(), 250.0);
        assert_eq!(back.label(), "capture");
    }

    #[test]
    fn text_and_binary_use_supplied_rate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let txt = dir.path().join("ramp.txt");
        std::fs::write(&txt, "0 1 2 3").expect("write txt");
        let signal = load_signal(&txt).expect("txt");
        assert_eq!(signal.sample_rate(), 1.0);
        assert_eq!(signal.len(), 4);

        let bin = dir.path().join("ramp.bin");
        let mut file = File::create(&bin).expect("create bin");
        for v in [0.5f32, 1.5] {
            file.write_all(&v.to_le_bytes()).expect("write bin");
        }
        drop(file);
        let signal = load_signal_with(&bin, LoadOptions { sample_rate: 48.0 }).expect("bin");
        assert_eq!(signal.data(), &[0.5, 1.5]);
        assert_eq!(signal.sample_rate(), 48.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            load_signal(dir.path().join("absent.csv")),
            Err(Error::Io { .. })
        ));
    }
}
