//! Prelude module for commonly used types and traits.
//!
//! Import everything with `use farmcred_core::prelude::*`.

// Re-export error types
pub use crate::error::{Error, Result, ValidationError};

// Re-export the authority seam
pub use crate::authority::CredentialAuthority;

// Re-export request and payload types
pub use crate::credential::{build_farmer_credential, CredentialContext, FarmerCredential};
pub use crate::issuer::{Issuer, Jwk};
pub use crate::offer::{
    build_farmer_offer, build_pda1_offer, FarmerForm, IssuanceFlow, IssuanceRequest, Pda1Form,
};
pub use crate::types::{FarmSpecifics, FarmerCredentialRequest, FarmerType, ValidFarmerRequest};
pub use crate::validate::validate_farmer_request;
pub use crate::verification::{
    build_verification_request, Verification, VerificationForm, VerificationRequest,
};
