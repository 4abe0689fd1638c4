//! HTTP services for farmer credentials.
//!
//! This crate wraps `farmcred-core` and `farmcred-client` in three actix-web
//! services:
//! - The farmer credential API (JSON): issue, verify, type catalogue and
//!   schema lookup
//! - The issuer portal (HTML fragments): PDA1 and farmer credential offers
//! - The verifier portal (HTML fragments): presentation requests
//!
//! Each service runs under its own binary with request tracing and CORS.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod server;
pub mod telemetry;

// Re-export main types for convenience
pub use config::{CorsConfig, ServerConfig};
pub use error::{Error, Result};
pub use server::{CredentialServer, Service};
