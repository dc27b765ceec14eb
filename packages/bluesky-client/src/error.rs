//! Error types for the Bluesky client.

use thiserror::Error;

/// Result type for Bluesky client operations.
pub type Result<T> = std::result::Result<T, BlueskyError>;

/// Bluesky client errors.
#[derive(Debug, Error)]
pub enum BlueskyError {
    /// Transport failure (connection refused, DNS, TLS, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the PDS
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body could not be read or did not match the
    /// expected shape. The request itself was accepted by the PDS.
    #[error("Unreadable response ({status}): {message}")]
    Unreadable { status: u16, message: String },
}

impl BlueskyError {
    /// HTTP status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BlueskyError::Api { status, .. } => Some(*status),
            BlueskyError::Network(e) => e.status().map(|s| s.as_u16()),
            BlueskyError::Unreadable { status, .. } => Some(*status),
        }
    }

    /// True when the PDS accepted the request even though the call failed
    /// afterwards, i.e. any write it asked for has happened.
    pub fn is_accepted(&self) -> bool {
        matches!(self, BlueskyError::Unreadable { .. })
    }
}
