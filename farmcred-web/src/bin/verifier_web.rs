use std::sync::Arc;

use farmcred_client::{AuthorityClient, AuthorityConfig};
use farmcred_web::telemetry::init_tracing;
use farmcred_web::{CredentialServer, ServerConfig, Service};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let service = Service::VerifierPortal;
    let config = ServerConfig::from_env(service.default_port())?;
    let authority = AuthorityClient::new(AuthorityConfig::from_env()?)?;

    CredentialServer::new(config, service, Arc::new(authority))
        .run()
        .await?;

    Ok(())
}
