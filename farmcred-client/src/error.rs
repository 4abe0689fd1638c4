//! Error types for the farmcred-client crate.

use thiserror::Error;

/// The main error type for calls to the credential authority.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent or the response not read.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The URL that was called.
        endpoint: String,
        /// The transport error.
        source: reqwest::Error,
    },

    /// No response arrived within the configured timeout.
    #[error("{endpoint} did not respond within {timeout_secs}s")]
    Timeout {
        /// The URL that was called.
        endpoint: String,
        /// The configured timeout.
        timeout_secs: u64,
    },

    /// The authority answered with a non-success status.
    #[error("credential authority {endpoint} returned {status}: {body}")]
    Status {
        /// The URL that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        /// The URL that was called.
        endpoint: String,
        /// The decoding error.
        source: serde_json::Error,
    },

    /// The request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<Error> for farmcred_core::Error {
    fn from(err: Error) -> Self {
        farmcred_core::Error::Forwarding(err.to_string())
    }
}

/// A specialized Result type for farmcred-client operations.
pub type Result<T> = std::result::Result<T, Error>;
