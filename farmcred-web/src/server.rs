//! HTTP server for the three credential services.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use farmcred_core::{CredentialAuthority, Issuer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::config::{CorsConfig, ServerConfig};
use crate::error::{Error, Result};
use crate::handlers::{api, issuer, verifier};

/// Which service a server runs, with the issuer profiles it needs.
#[derive(Debug, Clone)]
pub enum Service {
    /// The JSON farmer credential API.
    FarmerApi {
        /// The issuer named in every credential.
        issuer: Issuer,
    },
    /// The HTML issuer portal.
    IssuerPortal(issuer::PortalIssuers),
    /// The HTML verifier portal.
    VerifierPortal,
}

impl Service {
    /// Name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Service::FarmerApi { .. } => api::SERVICE_NAME,
            Service::IssuerPortal(_) => "credential-issuer-portal",
            Service::VerifierPortal => "credential-verifier-portal",
        }
    }

    /// Port used when `PORT` is not set.
    #[must_use]
    pub fn default_port(&self) -> u16 {
        match self {
            Service::FarmerApi { .. } => 7115,
            Service::IssuerPortal(_) => 8082,
            Service::VerifierPortal => 8081,
        }
    }
}

/// Registers the routes and state of `service`.
pub fn configure(
    service: &Service,
    authority: Arc<dyn CredentialAuthority>,
) -> impl FnOnce(&mut web::ServiceConfig) + '_ {
    move |cfg| {
        cfg.app_data(web::Data::from(authority));
        match service {
            Service::FarmerApi { issuer } => {
                cfg.app_data(web::Data::new(api::ApiState {
                    issuer: issuer.clone(),
                }));
                api::configure(cfg);
            }
            Service::IssuerPortal(issuers) => {
                cfg.app_data(web::Data::new(issuers.clone()));
                issuer::configure(cfg);
            }
            Service::VerifierPortal => verifier::configure(cfg),
        }
    }
}

fn cors(config: &CorsConfig) -> Cors {
    let allowed_origins = config.allowed_origins.clone();
    let cors = Cors::default()
        .allowed_origin_fn(move |origin, _| {
            let origin = origin.to_str().unwrap_or("");
            allowed_origins
                .iter()
                .any(|allowed| allowed == "*" || allowed == origin)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            "Content-Type",
            "Authorization",
            "HX-Request",
            "HX-Target",
            "HX-Trigger",
            "HX-Current-URL",
        ])
        .max_age(3600);

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

/// A credential service HTTP server.
pub struct CredentialServer {
    /// The server configuration.
    config: ServerConfig,
    /// The service to run.
    service: Service,
    /// The credential authority the service forwards to.
    authority: Arc<dyn CredentialAuthority>,
}

impl CredentialServer {
    /// Creates a new server.
    ///
    /// # Arguments
    ///
    /// * `config` - The listener configuration
    /// * `service` - The service to run
    /// * `authority` - The credential authority to forward to
    pub fn new(
        config: ServerConfig,
        service: Service,
        authority: Arc<dyn CredentialAuthority>,
    ) -> Self {
        Self {
            config,
            service,
            authority,
        }
    }

    /// Starts the server and runs until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        info!(
            service = self.service.name(),
            "Starting server on {}:{}", self.config.host, self.config.port
        );

        let Self {
            config,
            service,
            authority,
        } = self;
        let cors_config = config.cors.clone();

        HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .wrap(cors(&cors_config))
                .configure(configure(&service, authority.clone()))
        })
        .bind((config.host.as_str(), config.port))
        .map_err(|e| Error::Internal(format!("Failed to bind server: {e}")))?
        .run()
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use farmcred_client::{AuthorityClient, AuthorityConfig};
    use farmcred_core::Jwk;
    use serde_json::{json, Value};
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client(mock_server: &MockServer) -> Arc<dyn CredentialAuthority> {
        let config = AuthorityConfig {
            issuer_url: mock_server.uri(),
            verifier_url: mock_server.uri(),
            timeout_secs: 5,
        };
        Arc::new(AuthorityClient::new(config).unwrap())
    }

    #[::core::prelude::v1::test]
    fn test_service_defaults() {
        let api = Service::FarmerApi {
            issuer: Issuer::new("did:jwk:issuer"),
        };
        assert_eq!(api.default_port(), 7115);
        assert_eq!(api.name(), "farmer-credential-service");
        assert_eq!(Service::VerifierPortal.default_port(), 8081);
    }

    #[::core::prelude::v1::test]
    fn test_server_keeps_config() {
        let server = CredentialServer::new(
            ServerConfig {
                host: "127.0.0.1".into(),
                port: 8081,
                cors: CorsConfig {
                    allowed_origins: vec!["*".into()],
                    allow_credentials: true,
                },
            },
            Service::VerifierPortal,
            Arc::new(
                AuthorityClient::new(AuthorityConfig::default()).unwrap(),
            ),
        );

        assert_eq!(server.config.host, "127.0.0.1");
        assert_eq!(server.config.port, 8081);
        assert!(server.config.cors.allow_credentials);
    }

    #[actix_rt::test]
    async fn test_farmer_api_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openid4vc/jwt/issue"))
            .and(body_partial_json(json!({
                "issuer": "did:jwk:issuer",
                "credentialSubject": {
                    "farmerType": "poultry",
                    "poultrySpecifics": {
                        "farmingType": "layers",
                        "birdPopulation": 1200,
                        "housingType": "deep litter"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credential": "eyJ.vc"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = Service::FarmerApi {
            issuer: Issuer::new("did:jwk:issuer"),
        };
        let app = test::init_service(
            App::new()
                .wrap(TracingLogger::default())
                .wrap(cors(&CorsConfig::default()))
                .configure(configure(&service, client(&mock_server))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/credentials/issue")
            .set_json(json!({
                "farmerType": "poultry",
                "firstName": "Amina",
                "county": "Kiambu",
                "poultrySpecifics": {
                    "farmingType": "layers",
                    "birdPopulation": 1200,
                    "housingType": "deep litter"
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"success": true, "data": {"credential": "eyJ.vc"}})
        );
    }

    #[actix_rt::test]
    async fn test_verify_negative_verdict_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openid4vc/verify"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "expired"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = Service::FarmerApi {
            issuer: Issuer::new("did:jwk:issuer"),
        };
        let app = test::init_service(
            App::new().configure(configure(&service, client(&mock_server))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/credentials/verify")
            .set_payload("eyJ.expired.sig")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"verified": false, "result": {"message": "expired"}}));
    }

    #[actix_rt::test]
    async fn test_issuer_portal_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openid4vc/sdjwt/issue"))
            .and(body_partial_json(json!({
                "issuerDid": "did:ebsi:issuer",
                "issuerKey": {"type": "jwk"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("openid-credential-offer://pda1"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let key = Jwk {
            kty: "OKP".into(),
            crv: "Ed25519".into(),
            kid: None,
            x: "x".into(),
            y: None,
            d: Some("d".into()),
        };
        let issuers = issuer::PortalIssuers::new(
            Issuer::new("did:ebsi:issuer").with_key(key.clone()),
            Issuer::from_key(key).unwrap(),
        )
        .unwrap();
        let service = Service::IssuerPortal(issuers);
        let app = test::init_service(
            App::new().configure(configure(&service, client(&mock_server))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/issue-credential")
            .set_form([
                ("personalId", "P-7"),
                ("surname", "Kamau"),
                ("forenames", "Peter"),
            ])
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("openid-credential-offer://pda1"));
        assert!(body.contains("Peter Kamau"));
    }
}
