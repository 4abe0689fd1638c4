use std::sync::Arc;

use farmcred_client::{AuthorityClient, AuthorityConfig};
use farmcred_web::config::{issuer_from_env, FARMER_PROFILE, PDA1_PROFILE};
use farmcred_web::handlers::issuer::PortalIssuers;
use farmcred_web::telemetry::init_tracing;
use farmcred_web::{CredentialServer, ServerConfig, Service};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let issuers = PortalIssuers::new(
        issuer_from_env(PDA1_PROFILE)?,
        issuer_from_env(FARMER_PROFILE)?,
    )?;
    info!(pda1 = %issuers.pda1.did, farmer = %issuers.farmer.did, "issuer profiles loaded");

    let service = Service::IssuerPortal(issuers);
    let config = ServerConfig::from_env(service.default_port())?;
    let authority = AuthorityClient::new(AuthorityConfig::from_env()?)?;

    CredentialServer::new(config, service, Arc::new(authority))
        .run()
        .await?;

    Ok(())
}
