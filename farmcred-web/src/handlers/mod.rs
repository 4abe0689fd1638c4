//! HTTP endpoint handlers, one module per service.

pub mod api;
pub mod issuer;
pub mod verifier;
