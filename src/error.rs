//! Error types for kvctl
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for kvctl operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Local failure to reach or talk to the store (refused, reset,
    /// deadline expired)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failure reported by the remote store, passed through untouched
    #[error(transparent)]
    Remote(tonic::Status),

    // -------------------------------------------------------------------------
    // Invocation Errors
    // -------------------------------------------------------------------------
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Bytes are not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tonic::transport::Error> for KvError {
    fn from(err: tonic::transport::Error) -> Self {
        KvError::Transport(Box::new(err))
    }
}

impl KvError {
    /// Classify a call status as local transport failure or server verdict
    ///
    /// Statuses decoded from the server's trailers carry no source error;
    /// statuses tonic synthesizes from a local failure (timeout, reset,
    /// refused stream) wrap the underlying error as their source.
    pub fn from_status(status: tonic::Status) -> Self {
        if std::error::Error::source(&status).is_some() {
            KvError::Transport(Box::new(status))
        } else {
            KvError::Remote(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_stays_remote() {
        let status = tonic::Status::invalid_argument("etcdserver: key is not provided");

        match KvError::from_status(status) {
            KvError::Remote(status) => {
                assert_eq!(status.code(), tonic::Code::InvalidArgument);
                assert_eq!(status.message(), "etcdserver: key is not provided");
            }
            other => panic!("Expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_with_local_cause_is_transport() {
        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let status = tonic::Status::from_error(Box::new(reset));

        assert!(matches!(KvError::from_status(status), KvError::Transport(_)));
    }
}
