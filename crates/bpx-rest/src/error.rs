//! Error types for REST API operations

use bpx_auth::AuthError;
use bpx_types::ValidationError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (network, TLS, proxy, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Arguments failed validation; nothing was sent
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// Credentials could not be loaded
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Failed to decode a response into the requested type
    #[error("Parse error: {0}")]
    Parse(String),

    /// Transport could not be built or failed outside of HTTP
    #[error("Transport error: {0}")]
    Transport(String),
}

impl RestError {
    /// Returns true if the call was rejected before reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Get the HTTP status for status errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
