//! Error types for vaani.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaaniError {
    // Capture device errors
    #[error("Audio device not found: {device}")]
    DeviceNotFound { device: String },

    #[error("Audio device access failed: {message}")]
    DeviceAccess { message: String },

    // Decode boundary errors
    #[error("Failed to decode captured audio: {message}")]
    Decode { message: String },

    // Waveform encoder errors
    #[error("Cannot encode waveform: {message}")]
    EncodeInput { message: String },

    // Transfer errors
    #[error("Translation service rejected the request (HTTP {status}): {message}")]
    TransferRejected { status: u16, message: String },

    #[error("Translation request failed: {message}")]
    TransferNetwork { message: String },

    // Playback errors
    #[error("Audio playback failed: {message}")]
    Playback { message: String },

    // Session lifecycle errors
    #[error("Invalid session state: {message}")]
    SessionState { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VaaniError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_device_not_found_display() {
        let error = VaaniError::DeviceNotFound {
            device: "default".to_string(),
        };
        assert_eq!(error.to_string(), "Audio device not found: default");
    }

    #[test]
    fn test_device_access_display() {
        let error = VaaniError::DeviceAccess {
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Audio device access failed: permission denied"
        );
    }

    #[test]
    fn test_decode_display() {
        let error = VaaniError::Decode {
            message: "ragged frame".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode captured audio: ragged frame"
        );
    }

    #[test]
    fn test_encode_input_display() {
        let error = VaaniError::EncodeInput {
            message: "channel count is zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot encode waveform: channel count is zero"
        );
    }

    #[test]
    fn test_transfer_rejected_display() {
        let error = VaaniError::TransferRejected {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Translation service rejected the request (HTTP 503): service unavailable"
        );
    }

    #[test]
    fn test_transfer_network_display() {
        let error = VaaniError::TransferNetwork {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Translation request failed: connection refused"
        );
    }

    #[test]
    fn test_playback_display() {
        let error = VaaniError::Playback {
            message: "no output device".to_string(),
        };
        assert_eq!(error.to_string(), "Audio playback failed: no output device");
    }

    #[test]
    fn test_session_state_display() {
        let error = VaaniError::SessionState {
            message: "already recording".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid session state: already recording");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: VaaniError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: VaaniError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(VaaniError::SessionState {
                message: "test error".to_string(),
            })
        }
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<VaaniError>();
        assert_sync::<VaaniError>();
    }

    #[test]
    fn test_error_debug_format() {
        let error = VaaniError::DeviceNotFound {
            device: "hw:3".to_string(),
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("DeviceNotFound"));
        assert!(debug_str.contains("hw:3"));
    }
}
