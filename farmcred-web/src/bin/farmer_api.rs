use std::sync::Arc;

use farmcred_client::{AuthorityClient, AuthorityConfig};
use farmcred_web::config::{issuer_from_env, FARMER_API_PROFILE};
use farmcred_web::telemetry::init_tracing;
use farmcred_web::{CredentialServer, ServerConfig, Service};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let issuer = issuer_from_env(FARMER_API_PROFILE)?;
    let service = Service::FarmerApi { issuer };
    let config = ServerConfig::from_env(service.default_port())?;
    let authority = AuthorityClient::new(AuthorityConfig::from_env()?)?;

    info!(
        issuer_url = %authority.config().issuer_url,
        verifier_url = %authority.config().verifier_url,
        "Farmer credential service"
    );

    CredentialServer::new(config, service, Arc::new(authority))
        .run()
        .await?;

    Ok(())
}
