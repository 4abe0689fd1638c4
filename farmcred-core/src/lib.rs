//! Core of the farmer credential services.
//!
//! This crate holds everything that does not touch the network:
//! - Inbound request types and their validation
//! - Payload builders for the credential authority (W3C credentials,
//!   issuance offers and presentation requests)
//! - The static catalogue of farmer credential types and schemas
//! - Issuer identities and `did:jwk` derivation
//! - The [`CredentialAuthority`] trait implemented by the HTTP client
//!
//! # Examples
//!
//! ```rust
//! use farmcred_core::prelude::*;
//! use serde_json::json;
//!
//! let request: FarmerCredentialRequest = serde_json::from_value(json!({
//!     "farmerType": "dairy",
//!     "firstName": "John",
//!     "county": "Nakuru",
//!     "dairySpecifics": {"cattleBreeds": ["Friesian"], "numberOfCattle": 5, "milkingCows": 3}
//! }))?;
//!
//! let valid = validate_farmer_request(request)?;
//! let context = CredentialContext::now("did:example:issuer");
//! let credential = build_farmer_credential(valid, &context);
//! assert_eq!(credential.types[2], "DairyFarmerCredential");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod authority;
pub mod catalog;
pub mod credential;
pub mod error;
pub mod form;
pub mod issuer;
pub mod offer;
pub mod prelude;
pub mod types;
pub mod validate;
pub mod verification;

pub use authority::CredentialAuthority;
pub use error::{Error, Result, ValidationError};
pub use issuer::{Issuer, Jwk};
pub use types::{FarmerCredentialRequest, FarmerType};
