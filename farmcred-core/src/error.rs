//! Error types for the farmcred-core crate.

use thiserror::Error;

/// A request that failed local validation.
///
/// The display form names the offending field so it can be reported to the
/// caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The discriminant does not name a known farmer type.
    #[error("invalid farmerType: {0}")]
    InvalidFarmerType(String),

    /// The nested group selected by the discriminant is absent.
    #[error("{group} is required for {farmer_type} farmers")]
    MissingSpecifics {
        /// The request field holding the nested group.
        group: &'static str,
        /// The discriminant value.
        farmer_type: &'static str,
    },
}

impl ValidationError {
    /// Returns the name of the request field this error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidFarmerType(_) => "farmerType",
            ValidationError::MissingSpecifics { group, .. } => group,
        }
    }
}

/// Error type for the farmer credential core library
#[derive(Debug, Error)]
pub enum Error {
    /// The request failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No schema descriptor exists for the requested type.
    #[error("schema not found for type: {0}")]
    SchemaNotFound(String),

    /// The issuer profile cannot be used for the requested operation.
    #[error("Invalid issuer configuration: {0}")]
    InvalidIssuer(String),

    /// The call to the credential authority failed.
    #[error("forwarding failed: {0}")]
    Forwarding(String),

    /// Serialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the farmer credential core library
pub type Result<T> = std::result::Result<T, Error>;
