//! Error type for store and search operations.

use thiserror::Error;

/// Errors raised by store, auth, and search clients.
///
/// The failure taxonomy is deliberately small: transport failures, API
/// error responses, and the two auth misses the flows distinguish.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Base URL was not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The remote endpoint could not be reached.
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Registration hit an existing username (case-insensitive).
    #[error("Username already exists")]
    UsernameTaken,

    /// Login credentials matched no user.
    #[error("User not found or password incorrect")]
    UserNotFound,
}

impl ClientError {
    /// HTTP status this error maps to when surfaced through an API.
    pub fn status(&self) -> u16 {
        match self {
            ClientError::NotFound(_) | ClientError::UserNotFound => 404,
            ClientError::UsernameTaken => 409,
            ClientError::Api { status, .. } => *status,
            _ => 502,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
