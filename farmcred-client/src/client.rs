//! HTTP forwarding to the credential authority.
//!
//! One [`AuthorityClient`] is built per process and shared by all requests.
//! Every call is a single POST bounded by the configured timeout; nothing is
//! retried.

use async_trait::async_trait;
use farmcred_core::authority::CredentialAuthority;
use farmcred_core::credential::FarmerCredential;
use farmcred_core::offer::{IssuanceFlow, IssuanceRequest};
use farmcred_core::verification::{Verification, VerificationRequest};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{AuthorityConfig, ISSUE_JWT_PATH, ISSUE_SDJWT_PATH, VERIFY_PATH};
use crate::error::{Error, Result};

const AUTHORIZE_BASE_URL: &str = "openid4vp://authorize";
const RESPONSE_MODE: &str = "direct_post";

/// Client for the credential authority's issuer and verifier APIs.
#[derive(Debug, Clone)]
pub struct AuthorityClient {
    http: Client,
    config: AuthorityConfig,
}

impl AuthorityClient {
    /// Builds the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or the TLS backend cannot be
    /// initialised.
    pub fn new(config: AuthorityConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeout must be positive".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    fn issuer_url(&self, path: &str) -> String {
        join(&self.config.issuer_url, path)
    }

    fn verifier_url(&self, path: &str) -> String {
        join(&self.config.verifier_url, path)
    }

    /// Sends a request, reading the body under the same timeout.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        debug!(endpoint, status, "credential authority responded");
        Ok((status, body))
    }

    fn transport_error(&self, endpoint: &str, source: reqwest::Error) -> Error {
        if source.is_timeout() {
            warn!(endpoint, timeout_secs = self.config.timeout_secs, "credential authority timed out");
            Error::Timeout {
                endpoint: endpoint.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            warn!(endpoint, error = %source, "credential authority unreachable");
            Error::Http {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }

    /// Submits a farmer credential to the JWT issuance endpoint.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a non-2xx status or a non-JSON body.
    pub async fn post_credential(&self, credential: &FarmerCredential) -> Result<serde_json::Value> {
        let endpoint = self.issuer_url(ISSUE_JWT_PATH);
        let request = self
            .http
            .post(&endpoint)
            .header(ACCEPT, "application/json")
            .json(credential);

        let (status, body) = self.send(&endpoint, request).await?;
        ensure_success(&endpoint, status, &body)?;

        let value = decode(&endpoint, &body)?;
        info!(endpoint = %endpoint, "credential issued");
        Ok(value)
    }

    /// Submits an issuance offer and returns the credential offer link.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx status.
    pub async fn post_offer(&self, offer: &IssuanceRequest) -> Result<String> {
        let path = match offer.flow() {
            IssuanceFlow::Jwt => ISSUE_JWT_PATH,
            IssuanceFlow::SdJwt => ISSUE_SDJWT_PATH,
        };
        let endpoint = self.issuer_url(path);
        let body = serde_json::to_vec(offer)?;
        let request = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let (status, body) = self.send(&endpoint, request).await?;
        ensure_success(&endpoint, status, &body)?;

        info!(endpoint = %endpoint, kind = offer.label(), "credential offer created");
        Ok(body)
    }

    /// Verifies a compact JWT credential.
    ///
    /// A 4xx answer with a JSON body is the authority rejecting the
    /// credential and yields `verified: false`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a 5xx status or a non-JSON body.
    pub async fn post_verification(&self, credential_jwt: &str) -> Result<Verification> {
        let endpoint = self.verifier_url(VERIFY_PATH);
        let request = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .header(ACCEPT, "application/json")
            .body(credential_jwt.to_string());

        let (status, body) = self.send(&endpoint, request).await?;

        match status {
            200..=299 => Ok(Verification {
                verified: true,
                result: decode(&endpoint, &body)?,
            }),
            400..=499 => match serde_json::from_str(&body) {
                Ok(result) => {
                    info!(endpoint = %endpoint, status, "credential rejected");
                    Ok(Verification {
                        verified: false,
                        result,
                    })
                }
                Err(_) => Err(status_error(&endpoint, status, body)),
            },
            _ => Err(status_error(&endpoint, status, body)),
        }
    }

    /// Creates a presentation request and returns the verification link.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx status.
    pub async fn post_presentation_request(&self, request: &VerificationRequest) -> Result<String> {
        let endpoint = self.verifier_url(VERIFY_PATH);
        let body = serde_json::to_vec(request)?;
        let request = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/plain")
            .header("authorizeBaseUrl", AUTHORIZE_BASE_URL)
            .header("responseMode", RESPONSE_MODE)
            .body(body);

        let (status, body) = self.send(&endpoint, request).await?;
        ensure_success(&endpoint, status, &body)?;

        info!(endpoint = %endpoint, "presentation request created");
        Ok(body)
    }
}

#[async_trait]
impl CredentialAuthority for AuthorityClient {
    async fn issue_credential(
        &self,
        credential: &FarmerCredential,
    ) -> farmcred_core::Result<serde_json::Value> {
        self.post_credential(credential).await.map_err(Into::into)
    }

    async fn issue_offer(&self, request: &IssuanceRequest) -> farmcred_core::Result<String> {
        self.post_offer(request).await.map_err(Into::into)
    }

    async fn verify_credential(&self, credential_jwt: &str) -> farmcred_core::Result<Verification> {
        self.post_verification(credential_jwt).await.map_err(Into::into)
    }

    async fn request_presentation(
        &self,
        request: &VerificationRequest,
    ) -> farmcred_core::Result<String> {
        self.post_presentation_request(request)
            .await
            .map_err(Into::into)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn ensure_success(endpoint: &str, status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(status_error(endpoint, status, body.to_string()))
    }
}

fn status_error(endpoint: &str, status: u16, body: String) -> Error {
    warn!(endpoint, status, "credential authority returned an error");
    Error::Status {
        endpoint: endpoint.to_string(),
        status,
        body,
    }
}

fn decode(endpoint: &str, body: &str) -> Result<serde_json::Value> {
    serde_json::from_str(body).map_err(|source| Error::Deserialization {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use farmcred_core::credential::{build_farmer_credential, CredentialContext};
    use farmcred_core::issuer::{Issuer, Jwk};
    use farmcred_core::offer::{build_farmer_offer, FarmerForm};
    use farmcred_core::types::FarmerCredentialRequest;
    use farmcred_core::validate::validate_farmer_request;
    use farmcred_core::verification::{build_verification_request, VerificationForm};
    use serde_json::json;
    use std::time::Instant;
    use uuid::Uuid;
    use wiremock::{
        matchers::{body_string, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer, timeout_secs: u64) -> AuthorityClient {
        AuthorityClient::new(AuthorityConfig {
            issuer_url: server.uri(),
            verifier_url: format!("{}/", server.uri()),
            timeout_secs,
        })
        .unwrap()
    }

    fn context() -> CredentialContext {
        CredentialContext {
            issuer_did: "did:key:issuer".into(),
            issued_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            credential_id: Uuid::nil(),
            subject_id: "did:key:farmer_test".into(),
        }
    }

    fn dairy_credential() -> FarmerCredential {
        let request: FarmerCredentialRequest = serde_json::from_value(json!({
            "farmerType": "dairy",
            "firstName": "John",
            "county": "Nakuru",
            "dairySpecifics": {
                "cattleBreeds": ["Friesian"],
                "numberOfCattle": 5,
                "milkingCows": 3
            }
        }))
        .unwrap();
        build_farmer_credential(validate_farmer_request(request).unwrap(), &context())
    }

    #[tokio::test]
    async fn test_issue_credential_returns_authority_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ISSUE_JWT_PATH))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jwt": "eyJ.signed"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let value = client.issue_credential(&dairy_credential()).await.unwrap();
        assert_eq!(value, json!({"jwt": "eyJ.signed"}));
    }

    #[tokio::test]
    async fn test_issue_credential_forwards_status_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ISSUE_JWT_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("signing key unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let err = client.post_credential(&dairy_credential()).await.unwrap_err();

        match &err {
            Error::Status { status, body, .. } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "signing key unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let core: farmcred_core::Error = err.into();
        assert!(core.to_string().contains("signing key unavailable"));
    }

    #[tokio::test]
    async fn test_issue_credential_rejects_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ISSUE_JWT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let err = client.post_credential(&dairy_credential()).await.unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[tokio::test]
    async fn test_timeout_fails_within_bound() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ISSUE_JWT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 1);
        let started = Instant::now();
        let err = client.post_credential(&dairy_credential()).await.unwrap_err();

        assert!(matches!(err, Error::Timeout { timeout_secs: 1, .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_unreachable_authority() {
        let client = AuthorityClient::new(AuthorityConfig {
            issuer_url: "http://127.0.0.1:9".into(),
            verifier_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.post_verification("eyJ.token").await.unwrap_err();
        assert!(matches!(err, Error::Http { .. } | Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_verify_sends_raw_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .and(header("content-type", "text/plain"))
            .and(body_string("eyJ.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let verification = client.verify_credential("eyJ.token").await.unwrap();

        assert!(verification.verified);
        assert_eq!(verification.result, json!({"valid": true}));
    }

    #[tokio::test]
    async fn test_verify_client_error_is_negative_verdict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "signature invalid"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let verification = client.post_verification("eyJ.forged").await.unwrap();

        assert!(!verification.verified);
        assert_eq!(verification.result["error"], "signature invalid");
    }

    #[tokio::test]
    async fn test_verify_server_error_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "down"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let err = client.post_verification("eyJ.token").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_farmer_offer_returns_link() {
        let mock_server = MockServer::start().await;
        let offer_link = "openid-credential-offer://?credential_offer_uri=http%3A%2F%2Fissuer";

        Mock::given(method("POST"))
            .and(path(ISSUE_JWT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(offer_link))
            .expect(1)
            .mount(&mock_server)
            .await;

        let issuer = Issuer::new("did:key:issuer").with_key(Jwk {
            kty: "OKP".into(),
            crv: "Ed25519".into(),
            kid: None,
            x: "x-coord".into(),
            y: None,
            d: Some("secret".into()),
        });
        let form = FarmerForm {
            given_name: "Jane".into(),
            family_name: "Wanjiru".into(),
            farm_type: "dairy".into(),
            ..FarmerForm::default()
        };
        let offer = build_farmer_offer(&form, &issuer, &context()).unwrap();

        let client = client_for(&mock_server, 5);
        assert_eq!(client.issue_offer(&offer).await.unwrap(), offer_link);
    }

    #[tokio::test]
    async fn test_presentation_request_headers() {
        let mock_server = MockServer::start().await;
        let link = "openid4vp://authorize?request_uri=http%3A%2F%2Fverifier";

        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .and(header("accept", "text/plain"))
            .and(header("authorizebaseurl", AUTHORIZE_BASE_URL))
            .and(header("responsemode", RESPONSE_MODE))
            .respond_with(ResponseTemplate::new(200).set_body_string(link))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = build_verification_request(&VerificationForm::default());
        let client = client_for(&mock_server, 5);
        assert_eq!(client.request_presentation(&request).await.unwrap(), link);
    }

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(join("http://authority/", VERIFY_PATH), "http://authority/openid4vc/verify");
        assert_eq!(join("http://authority", ISSUE_SDJWT_PATH), "http://authority/openid4vc/sdjwt/issue");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = AuthorityClient::new(AuthorityConfig {
            timeout_secs: 0,
            ..AuthorityConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
