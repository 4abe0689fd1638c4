//! HTML endpoints of the credential issuer portal.

use actix_web::{error::InternalError, post, web, HttpResponse};
use farmcred_core::credential::CredentialContext;
use farmcred_core::offer::{build_farmer_offer, build_pda1_offer, FarmerForm, IssuanceRequest, Pda1Form};
use farmcred_core::{CredentialAuthority, Issuer};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::render;

/// The issuer profiles used by the portal.
#[derive(Debug, Clone)]
pub struct PortalIssuers {
    /// Issuer of the Portable Document A1.
    pub pda1: Issuer,
    /// Issuer of the farmer credential.
    pub farmer: Issuer,
}

impl PortalIssuers {
    /// Checks that both profiles carry a signing key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first profile without one.
    pub fn new(pda1: Issuer, farmer: Issuer) -> Result<Self> {
        pda1.signing_key()?;
        farmer.signing_key()?;
        Ok(Self { pda1, farmer })
    }
}

/// Issues a PDA1 credential offer from the posted form.
#[post("/issue-credential")]
pub async fn issue_pda1_credential(
    issuers: web::Data<PortalIssuers>,
    authority: web::Data<dyn CredentialAuthority>,
    form: web::Form<Pda1Form>,
) -> HttpResponse {
    let form = form.into_inner();
    let outcome = match form.validate() {
        Ok(()) => {
            let context = CredentialContext::now(issuers.pda1.did.clone());
            match build_pda1_offer(&form, &issuers.pda1, &context) {
                Ok(offer) => submit(authority.get_ref(), &offer, &form.holder_name()).await,
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    };

    respond(outcome)
}

/// Issues a farmer credential offer from the posted form.
#[post("/issue-farmer-credential")]
pub async fn issue_farmer_credential(
    issuers: web::Data<PortalIssuers>,
    authority: web::Data<dyn CredentialAuthority>,
    form: web::Form<FarmerForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let outcome = match form.validate() {
        Ok(()) => {
            let context = CredentialContext::now(issuers.farmer.did.clone());
            match build_farmer_offer(&form, &issuers.farmer, &context) {
                Ok(offer) => submit(authority.get_ref(), &offer, &form.holder_name()).await,
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    };

    respond(outcome)
}

async fn submit(
    authority: &dyn CredentialAuthority,
    offer: &IssuanceRequest,
    holder: &str,
) -> Result<String> {
    let link = authority
        .issue_offer(offer)
        .await
        .map_err(Error::upstream("Credential service error"))?;

    info!(kind = offer.label(), holder, "credential offer created");
    Ok(render::issued_fragment(offer.label(), holder, &link))
}

fn respond(outcome: Result<String>) -> HttpResponse {
    match outcome {
        Ok(fragment) => render::html(fragment),
        Err(err) => {
            warn!(error = %err, "credential issuance failed");
            render::html(render::error_fragment(&format!("{}: {err}", err.summary())))
        }
    }
}

/// Registers the issuer portal routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "undecodable form");
        InternalError::from_response(
            err,
            render::html(render::error_fragment("Failed to parse form data")),
        )
        .into()
    }))
    .service(issue_pda1_credential)
    .service(issue_farmer_credential);
}
