//! Error types for remote lookups.
//!
//! Every variant here means the lookup could not be completed. A student that
//! does not exist is not an error; it is reported through the payload itself.

use thiserror::Error;

/// Errors that can occur while talking to the result lookup service.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request did not complete within the configured timeout.
    #[error("Timeout: {client}")]
    Timeout {
        /// The client that timed out
        client: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {client}: {body}")]
    HttpStatus {
        /// The client that received the response
        client: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body could not be interpreted.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A network error occurred while communicating with the service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RemoteError {
    /// Returns true if the lookup failed because it ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}
