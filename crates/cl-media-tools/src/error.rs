//! Error types for cl-media-tools.
//!
//! None of these surface from the version handler itself: an unsupported
//! method is answered with [`MethodResponse::NotImplemented`], not an error.
//! They cover the plumbing around it (configuration, channel lookup, wire
//! decoding, I/O).
//!
//! [`MethodResponse::NotImplemented`]: crate::method::MethodResponse::NotImplemented

use thiserror::Error;

/// The main error type for cl-media-tools operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Channel Errors ===
    /// A channel identifier is not a valid token.
    #[error("invalid channel name '{name}': expected ASCII letters, digits, '_', '.', '-' or '/'")]
    InvalidChannelName {
        /// The rejected name.
        name: String,
    },

    /// Nothing is registered on the channel a call was sent to.
    #[error("no handler registered on channel '{channel}'")]
    NoHandler {
        /// The channel that was called.
        channel: String,
    },

    /// An envelope on the wire could not be decoded.
    #[error("malformed envelope: {message}")]
    Decode {
        /// Description of what was wrong.
        message: String,
    },

    // === I/O Errors ===
    /// Stream or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for cl-media-tools operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new envelope decoding error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from malformed wire data.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Json(_))
    }

    /// Check if this error means nothing listens on the called channel.
    #[must_use]
    pub fn is_no_handler(&self) -> bool {
        matches!(self, Self::NoHandler { .. })
    }

    /// Check if this error is a configuration problem.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } | Self::InvalidChannelName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::decode("expected an object");
        assert_eq!(err.to_string(), "malformed envelope: expected an object");
    }

    #[test]
    fn test_invalid_channel_name_display() {
        let err = Error::InvalidChannelName {
            name: "bad name".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'bad name'"));
        assert!(msg.contains("ASCII"));
    }

    #[test]
    fn test_is_decode_error() {
        assert!(Error::decode("x").is_decode_error());

        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        assert!(Error::from(json_err).is_decode_error());

        assert!(!Error::config_validation("x").is_decode_error());
    }

    #[test]
    fn test_no_handler() {
        let err = Error::NoHandler {
            channel: "cl_media_tools".to_string(),
        };
        assert!(err.is_no_handler());
        assert!(err.to_string().contains("'cl_media_tools'"));
        assert!(!Error::decode("x").is_no_handler());
    }

    #[test]
    fn test_is_config_error() {
        assert!(Error::config_validation("bad").is_config_error());
        assert!(Error::InvalidChannelName {
            name: String::new()
        }
        .is_config_error());
        assert!(!Error::decode("x").is_config_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("host.os_version must not be empty");
        assert!(err.to_string().contains("host.os_version"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("boom".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
        assert!(err.to_string().contains("boom"));
    }
}
