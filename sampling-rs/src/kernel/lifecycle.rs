use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
///
/// Every kernel owns a validated copy of its config, so a kernel that exists
/// can run without re-checking its parameters.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

/// Reject non-finite or non-positive scalar parameters.
pub(crate) fn ensure_positive(
    value: f64,
    arg: &'static str,
    reason: &'static str,
) -> Result<f64, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidArgument { arg, reason });
    }
    Ok(value)
}
