//! HTML endpoint of the credential verifier portal.

use actix_web::{error::InternalError, post, web, HttpResponse};
use farmcred_core::verification::{build_verification_request, VerificationForm};
use farmcred_core::CredentialAuthority;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::render;

/// Creates a presentation request from the posted verification options.
#[post("/verify-credential")]
pub async fn verify_credential(
    authority: web::Data<dyn CredentialAuthority>,
    form: web::Form<VerificationForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let request = build_verification_request(&form);
    debug!(credential_type = request.credential_type(), "presentation request built");

    let link = match authority
        .request_presentation(&request)
        .await
        .map_err(Error::upstream("Verification service error"))
    {
        Ok(link) => link,
        Err(err) => {
            warn!(error = %err, "presentation request failed");
            return render::html(render::error_fragment(&format!("{}: {err}", err.summary())));
        }
    };

    info!("presentation request created");
    let policies: Vec<&str> = form
        .selected_policies()
        .into_iter()
        .map(|policy| policy.display_name())
        .collect();
    let credential_type = form.requested_type().unwrap_or(render::DEFAULT_TYPE_LABEL);

    render::html(render::verification_fragment(credential_type, &policies, &link))
}

/// Registers the verifier portal routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "undecodable form");
        InternalError::from_response(
            err,
            render::html(render::error_fragment("Failed to parse form data")),
        )
        .into()
    }))
    .service(verify_credential);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::MockAuthority;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;

    fn authority(mock: MockAuthority) -> web::Data<dyn CredentialAuthority> {
        let authority: Arc<dyn CredentialAuthority> = Arc::new(mock);
        web::Data::from(authority)
    }

    #[actix_rt::test]
    async fn test_selected_policies_are_forwarded_and_listed() {
        let mut mock = MockAuthority::new();
        mock.expect_request_presentation().times(1).returning(|request| {
            let body = serde_json::to_value(request).unwrap();
            assert_eq!(body["vc_policies"], json!(["signature", "revoked-status-list"]));
            assert_eq!(request.credential_type(), Some("FarmerCredential"));
            Ok("openid4vp://authorize?request_uri=abc".to_string())
        });

        let app = test::init_service(
            App::new().app_data(authority(mock)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-credential")
            .set_form([
                ("credentialType", "FarmerCredential"),
                ("checkSignature", "on"),
                ("checkRevokedStatus", "on"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("<strong>Credential Type:</strong> FarmerCredential"));
        assert!(body.contains("<ul><li>Signature</li><li>Revocation Status</li></ul>"));
        assert!(body.contains("openid4vp://authorize?request_uri=abc"));
    }

    #[actix_rt::test]
    async fn test_empty_form_uses_defaults() {
        let mut mock = MockAuthority::new();
        mock.expect_request_presentation().times(1).returning(|request| {
            let body = serde_json::to_value(request).unwrap();
            assert_eq!(body["vc_policies"].as_array().unwrap().len(), 4);
            assert_eq!(request.credential_type(), Some("VerifiablePortableDocumentA1"));
            Ok("openid4vp://authorize".to_string())
        });

        let app = test::init_service(
            App::new().app_data(authority(mock)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-credential")
            .set_form([("credentialType", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(render::DEFAULT_TYPE_LABEL));
        assert!(body.contains(render::DEFAULT_POLICIES_LABEL));
    }

    #[actix_rt::test]
    async fn test_downstream_failure_renders_error() {
        let mut mock = MockAuthority::new();
        mock.expect_request_presentation().times(1).returning(|_| {
            Err(farmcred_core::Error::Forwarding(
                "http://authority/openid4vc/verify did not respond within 30s".into(),
            ))
        });

        let app = test::init_service(
            App::new().app_data(authority(mock)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-credential")
            .set_form([("checkExpiration", "on")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("error-message"));
        assert!(body.contains("Verification service error: http://authority/openid4vc/verify did not respond within 30s"));
    }
}
