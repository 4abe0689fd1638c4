//! The seam between the services and the external credential authority.
//!
//! Handlers only talk to the authority through [`CredentialAuthority`]. The
//! HTTP implementation lives in `farmcred-client`; tests substitute mocks.

use async_trait::async_trait;

use crate::credential::FarmerCredential;
use crate::error::Result;
use crate::offer::IssuanceRequest;
use crate::verification::{Verification, VerificationRequest};

/// Issues and verifies credentials on behalf of the services.
///
/// Every method performs at most one outbound call. Failures of any kind
/// (transport, timeout, status, undecodable body) are reported as
/// [`crate::Error::Forwarding`].
#[async_trait]
pub trait CredentialAuthority: Send + Sync {
    /// Submits a farmer credential for signing.
    ///
    /// # Returns
    /// The authority's JSON response, unchanged.
    async fn issue_credential(&self, credential: &FarmerCredential) -> Result<serde_json::Value>;

    /// Submits an issuance offer.
    ///
    /// # Returns
    /// The credential offer link to hand to the holder's wallet.
    async fn issue_offer(&self, request: &IssuanceRequest) -> Result<String>;

    /// Verifies a credential presented as a compact JWT.
    async fn verify_credential(&self, credential_jwt: &str) -> Result<Verification>;

    /// Creates a presentation request.
    ///
    /// # Returns
    /// The verification link to hand to the holder's wallet.
    async fn request_presentation(&self, request: &VerificationRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::verification::{build_verification_request, VerificationForm};
    use mockall::mock;
    use serde_json::json;

    mock! {
        Authority {}

        #[async_trait]
        impl CredentialAuthority for Authority {
            async fn issue_credential(&self, credential: &FarmerCredential) -> Result<serde_json::Value>;
            async fn issue_offer(&self, request: &IssuanceRequest) -> Result<String>;
            async fn verify_credential(&self, credential_jwt: &str) -> Result<Verification>;
            async fn request_presentation(&self, request: &VerificationRequest) -> Result<String>;
        }
    }

    #[tokio::test]
    async fn test_authority_is_object_safe() {
        let mut mock = MockAuthority::new();
        mock.expect_verify_credential().times(1).returning(|_| {
            Ok(Verification {
                verified: true,
                result: json!({"status": "ok"}),
            })
        });
        mock.expect_request_presentation()
            .returning(|_| Err(Error::Forwarding("unreachable".into())));

        let authority: Box<dyn CredentialAuthority> = Box::new(mock);

        let verification = authority.verify_credential("eyJ.token").await.unwrap();
        assert!(verification.verified);

        let request = build_verification_request(&VerificationForm::default());
        let err = authority.request_presentation(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "forwarding failed: unreachable");
    }
}
