//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rows failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be read.
    #[error("Input error: {0}")]
    Input(String),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(String),

    /// Data could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Serialization(_) => 65,
            Self::Input(_) => 66,
            Self::Internal(_) => 70,
            Self::Output(_) => 73,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code used in logs and reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Input(_) => "INPUT_ERROR",
            Self::Output(_) => "OUTPUT_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Validation(String::new()).exit_code(), 65);
        assert_eq!(AppError::Serialization(String::new()).exit_code(), 65);
        assert_eq!(AppError::Input(String::new()).exit_code(), 66);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 70);
        assert_eq!(AppError::Output(String::new()).exit_code(), 73);
        assert_eq!(AppError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(AppError::Input(String::new()).error_code(), "INPUT_ERROR");
        assert_eq!(AppError::Output(String::new()).error_code(), "OUTPUT_ERROR");
        assert_eq!(
            AppError::Serialization(String::new()).error_code(),
            "SERIALIZATION_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(AppError::Input("msg".into()).to_string(), "Input error: msg");
        assert_eq!(
            AppError::Output("msg".into()).to_string(),
            "Output error: msg"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = config::ConfigError::Message("bad value".into()).into();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("bad value")));
    }
}
