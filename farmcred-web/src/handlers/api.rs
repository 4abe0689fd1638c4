//! JSON endpoints of the farmer credential API.

use actix_web::{get, post, web, HttpResponse};
use farmcred_core::catalog::{schema_for, CREDENTIAL_TYPES};
use farmcred_core::credential::{build_farmer_credential, CredentialContext};
use farmcred_core::validate::validate_farmer_request;
use farmcred_core::{CredentialAuthority, FarmerCredentialRequest, Issuer, ValidationError};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::render;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "farmer-credential-service";

/// Largest body accepted by `POST /credentials/verify`, in bytes.
pub const VERIFY_BODY_LIMIT: usize = 256 * 1024;

/// Shared state of the farmer credential API.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The issuer named in every credential.
    pub issuer: Issuer,
}

/// Health check.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Validates a farmer credential request, builds the credential and has the
/// authority issue it.
#[post("/credentials/issue")]
pub async fn issue_credential(
    state: web::Data<ApiState>,
    authority: web::Data<dyn CredentialAuthority>,
    request: web::Json<FarmerCredentialRequest>,
) -> Result<HttpResponse> {
    let valid = validate_farmer_request(request.into_inner())?;
    let farmer_type = valid.farmer_type();
    debug!(%farmer_type, "farmer credential request validated");

    let context = CredentialContext::now(state.issuer.did.clone());
    let credential = build_farmer_credential(valid, &context);

    let issued = authority
        .issue_credential(&credential)
        .await
        .map_err(Error::upstream("Failed to issue credential"))?;

    info!(%farmer_type, subject = %context.subject_id, "farmer credential issued");
    Ok(HttpResponse::Ok().json(render::success_envelope(&issued)))
}

/// Verifies a credential posted as a raw JWT body.
///
/// A body that cannot be read or is not UTF-8 is reported as
/// [`Error::InvalidBody`].
#[post("/credentials/verify")]
pub async fn verify_credential(
    authority: web::Data<dyn CredentialAuthority>,
    body: std::result::Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse> {
    let body = body.map_err(|err| Error::InvalidBody(err.to_string()))?;
    let token = std::str::from_utf8(&body)
        .map_err(|err| Error::InvalidBody(err.to_string()))?
        .trim();
    if token.is_empty() {
        return Err(ValidationError::MissingField("credential").into());
    }

    let verification = authority
        .verify_credential(token)
        .await
        .map_err(Error::upstream("Verification failed"))?;

    info!(verified = verification.verified, "credential verification finished");
    Ok(HttpResponse::Ok().json(verification))
}

/// Lists the supported farmer credential types.
#[get("/credentials/types")]
pub async fn list_credential_types() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "types": CREDENTIAL_TYPES }))
}

/// Returns the schema descriptor of one farmer type.
#[get("/credentials/schemas/{type}")]
pub async fn get_credential_schema(path: web::Path<String>) -> Result<HttpResponse> {
    let schema = schema_for(&path)?;
    Ok(HttpResponse::Ok().json(schema))
}

/// Registers the farmer credential API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| Error::InvalidBody(err.to_string()).into()),
    )
    .app_data(web::PayloadConfig::new(VERIFY_BODY_LIMIT))
    .service(health)
    .service(issue_credential)
    .service(verify_credential)
    .service(list_credential_types)
    .service(get_credential_schema);
}
