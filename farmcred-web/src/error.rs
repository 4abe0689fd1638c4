//! Error types for the farmcred-web crate.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use farmcred_core::ValidationError;
use thiserror::Error;

use crate::render;

/// Error type for the web services.
///
/// The display form is the detail message reported to callers; the summary
/// is a short fixed label.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be decoded.
    #[error("{0}")]
    InvalidBody(String),

    /// A required field is missing or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No schema exists for the requested type.
    #[error("schema not found for type: {0}")]
    SchemaNotFound(String),

    /// The credential authority call failed.
    #[error("{message}")]
    Upstream {
        /// Short description of the failed operation.
        summary: &'static str,
        /// The external error message.
        message: String,
    },

    /// The service is misconfigured.
    #[error("{0}")]
    Config(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns a mapper that files authority failures under `summary`.
    pub fn upstream(summary: &'static str) -> impl Fn(farmcred_core::Error) -> Error {
        move |err| match err {
            farmcred_core::Error::Forwarding(message) => Error::Upstream { summary, message },
            other => other.into(),
        }
    }

    /// Short label of the error category.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Error::InvalidBody(_) => "Invalid request body",
            Error::Validation(_) => "Validation failed",
            Error::SchemaNotFound(_) => "Schema not found",
            Error::Upstream { summary, .. } => summary,
            Error::Config(_) => "Issuer not configured",
            Error::Internal(_) => "Internal error",
        }
    }
}

impl From<farmcred_core::Error> for Error {
    fn from(err: farmcred_core::Error) -> Self {
        match err {
            farmcred_core::Error::Validation(err) => Error::Validation(err),
            farmcred_core::Error::SchemaNotFound(kind) => Error::SchemaNotFound(kind),
            farmcred_core::Error::InvalidIssuer(message) => Error::Config(message),
            farmcred_core::Error::Forwarding(message) => Error::Upstream {
                summary: "Forwarding failed",
                message,
            },
            farmcred_core::Error::Serialization(err) => Error::Internal(err.to_string()),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::SchemaNotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(render::error_envelope(self))
    }
}

/// Result type for the web services.
pub type Result<T> = std::result::Result<T, Error>;
