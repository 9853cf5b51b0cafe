//! Error types for the Fulcrum client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the Fulcrum services
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, or the request never
    /// produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status code
    #[error("protocol error (status {status}): {message}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the service
        message: String,
    },

    /// The response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create a protocol error from a status code and response body
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            message: message.into(),
        }
    }

    /// Status code for protocol errors, `None` otherwise
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Protocol { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Protocol { status, .. } if *status >= 500)
    }
}
