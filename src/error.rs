//! Error types and result aliases for the calllog library.
//!
//! This module defines the core error type [`CallLogError`] and the [`Result`] type alias
//! used by configuration loading and the JSON-based evaluators. The interceptor itself
//! never produces these: a wrapped operation's own error is always handed back untouched.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallLogError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CallLogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CallLogError::ConfigError("line 3: missing '='".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: line 3: missing '='");
    }

    #[test]
    fn test_invalid_level_display() {
        let err = CallLogError::InvalidLevel("LOUD".to_string());
        assert_eq!(err.to_string(), "Invalid level: LOUD");
    }

    #[test]
    fn test_invalid_metadata_display() {
        let err = CallLogError::InvalidMetadata("no 'aspects' member".to_string());
        assert_eq!(err.to_string(), "Invalid metadata: no 'aspects' member");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CallLogError = json_err.into();

        match err {
            CallLogError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CallLogError = io_err.into();

        match err {
            CallLogError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(CallLogError::ConfigError("test".to_string()));
        assert!(err_result.is_err());
    }
}
