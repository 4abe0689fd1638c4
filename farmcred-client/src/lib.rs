//! HTTP client for the credential authority.
//!
//! This crate forwards payloads built by `farmcred-core` to an OpenID4VC
//! credential authority:
//! - `POST /openid4vc/jwt/issue` and `POST /openid4vc/sdjwt/issue` on the
//!   issuer API
//! - `POST /openid4vc/verify` on the verifier API
//!
//! [`AuthorityClient`] implements [`farmcred_core::CredentialAuthority`], so
//! services depend on the trait and tests can substitute a mock.
//!
//! # Examples
//!
//! ```rust,no_run
//! use farmcred_client::{AuthorityClient, AuthorityConfig};
//! use farmcred_core::CredentialAuthority;
//!
//! async fn verify(jwt: &str) -> Result<bool, Box<dyn std::error::Error>> {
//!     let client = AuthorityClient::new(AuthorityConfig::from_env()?)?;
//!     Ok(client.verify_credential(jwt).await?.verified)
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;

pub use client::AuthorityClient;
pub use config::AuthorityConfig;
pub use error::{Error, Result};
