use core::fmt;

use crate::kernel::{ConfigError, ExecInvariantViolation};

/// Errors raised by the sampling, reconstruction and gluing entrypoints.
///
/// Every variant is recoverable: callers are expected to report the condition
/// and keep whatever state they had before the failing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Sampling rate, duration or another configuration value was rejected.
    InvalidConfig {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Too few samples for the chosen interpolant.
    InsufficientSamples {
        /// Minimum number of distinct samples required.
        required: usize,
        /// Number of samples received.
        got: usize,
    },
    /// Sample times have zero spacing.
    DegenerateSampling {
        /// Why the sampling is degenerate.
        reason: String,
    },
    /// A glue segment or signal was empty.
    InsufficientData {
        /// Which input was empty.
        arg: String,
    },
    /// Two inputs that must be paired have different lengths.
    LengthMismatch {
        /// Name of the argument.
        arg: String,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// Unknown file extension, malformed file content or malformed component.
    UnsupportedFormat {
        /// Explaining what could not be understood.
        reason: String,
    },
    /// Filesystem failure while loading or saving a signal.
    Io {
        /// Rendered `std::io::Error`.
        reason: String,
    },
}

impl Error {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Error::UnsupportedFormat {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { arg, reason } => {
                write!(f, "Invalid configuration `{arg}`: {reason}")
            }
            Error::InsufficientSamples { required, got } => {
                write!(f, "Insufficient samples: need at least {required}, got {got}")
            }
            Error::DegenerateSampling { reason } => write!(f, "Degenerate sampling: {reason}"),
            Error::InsufficientData { arg } => write!(f, "Input `{arg}` contains no samples"),
            Error::LengthMismatch { arg, expected, got } => {
                write!(f, "Length mismatch on `{arg}`: expected {expected}, got {got}")
            }
            Error::UnsupportedFormat { reason } => write!(f, "Unsupported format: {reason}"),
            Error::Io { reason } => write!(f, "I/O failure: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::EmptyInput { arg } => Error::InsufficientData { arg: arg.into() },
            ConfigError::InvalidArgument { arg, reason } => Error::InvalidConfig {
                arg: arg.into(),
                reason: reason.into(),
            },
            ConfigError::NonContiguous { arg } => Error::InvalidConfig {
                arg: arg.into(),
                reason: "input is not contiguous in memory".into(),
            },
            ConfigError::LengthMismatch { arg, expected, got } => Error::LengthMismatch {
                arg: arg.into(),
                expected,
                got,
            },
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::InvalidState { reason } => Error::InvalidConfig {
                arg: "state".into(),
                reason: reason.into(),
            },
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                Error::LengthMismatch {
                    arg: arg.into(),
                    expected,
                    got,
                }
            }
            ExecInvariantViolation::InsufficientSamples { required, got } => {
                Error::InsufficientSamples { required, got }
            }
            ExecInvariantViolation::DegenerateSampling { reason } => Error::DegenerateSampling {
                reason: reason.into(),
            },
            ExecInvariantViolation::InsufficientData { arg } => {
                Error::InsufficientData { arg: arg.into() }
            }
            ExecInvariantViolation::Config(err) => err.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io {
            reason: value.to_string(),
        }
    }
}
