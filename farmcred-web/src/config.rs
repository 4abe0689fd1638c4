//! Service configuration read from the environment.

use farmcred_core::{Issuer, Jwk};

use crate::error::{Error, Result};

/// Issuer profile prefix of the farmer credential API.
pub const FARMER_API_PROFILE: &str = "FARMER_API";

/// Issuer profile prefix of the PDA1 credential.
pub const PDA1_PROFILE: &str = "PDA1";

/// Issuer profile prefix of the portal's farmer credential.
pub const FARMER_PROFILE: &str = "FARMER";

/// Configuration for a service's HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The host to bind to.
    pub host: String,
    /// The port to bind to.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
}

/// CORS configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any.
    pub allowed_origins: Vec<String>,
    /// Whether to allow credentials.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
        }
    }
}

impl ServerConfig {
    /// A listener on all interfaces at `port`.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            cors: CorsConfig::default(),
        }
    }

    /// Reads `HOST`, `PORT` and `CORS_ALLOWED_ORIGINS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_env(default_port: u16) -> Result<Self> {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_lookup(default_port: u16, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::with_port(default_port);

        if let Some(host) = non_blank(lookup("HOST")) {
            config.host = host;
        }
        if let Some(port) = non_blank(lookup("PORT")) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {port:?}")))?;
        }
        if let Some(origins) = non_blank(lookup("CORS_ALLOWED_ORIGINS")) {
            config.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }
}

/// Loads the issuer profile `prefix` from the environment.
///
/// # Errors
///
/// See [`issuer_from_lookup`].
pub fn issuer_from_env(prefix: &str) -> Result<Issuer> {
    issuer_from_lookup(prefix, |key| std::env::var(key).ok())
}

/// Loads an issuer profile from `<PREFIX>_ISSUER_DID`, `<PREFIX>_ISSUER_JWK`
/// and `<PREFIX>_ISSUER_NAME`.
///
/// An explicit DID wins; otherwise it is derived from the key as a `did:jwk`.
///
/// # Errors
///
/// Returns an error if the key is not a valid JWK or neither a DID nor a key
/// is configured.
pub fn issuer_from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Issuer> {
    let did_var = format!("{prefix}_ISSUER_DID");
    let jwk_var = format!("{prefix}_ISSUER_JWK");

    let key = non_blank(lookup(&jwk_var))
        .map(|raw| {
            serde_json::from_str::<Jwk>(&raw)
                .map_err(|e| Error::Config(format!("{jwk_var} is not a valid JWK: {e}")))
        })
        .transpose()?;

    let issuer = match (non_blank(lookup(&did_var)), key) {
        (Some(did), Some(key)) => Issuer::new(did).with_key(key),
        (Some(did), None) => Issuer::new(did),
        (None, Some(key)) => Issuer::from_key(key)?,
        (None, None) => {
            return Err(Error::Config(format!("set {did_var} or {jwk_var}")));
        }
    };

    Ok(match non_blank(lookup(&format!("{prefix}_ISSUER_NAME"))) {
        Some(name) => issuer.with_name(name),
        None => issuer,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const JWK: &str = r#"{"kty":"OKP","d":"mJJv_Hzv8--BHJaJlvB9KM8XQnM9M8J7LHJ_jz-pZYw","crv":"Ed25519","kid":"ynzK6u55SjO6hFEsW0kBKon_bpvpf5zrr-Q3FNHeAVE","x":"e3CE1EOpYtE_6UyIN58UJwWmGGesV3kZHMVZABIQI3M"}"#;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(7115, lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7115);
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
        assert!(!config.cors.allow_credentials);
    }

    #[test]
    fn test_server_config_overrides() {
        let config = ServerConfig::from_lookup(
            8082,
            lookup(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "9000"),
                ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ]),
        )
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_server_config_rejects_bad_port() {
        let err = ServerConfig::from_lookup(8081, lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_issuer_did_derived_from_key() {
        let issuer = issuer_from_lookup("FARMER", lookup(&[("FARMER_ISSUER_JWK", JWK)])).unwrap();

        assert_eq!(
            issuer.did,
            "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5Iiwia2lkIjoieW56SzZ1NTVTak82aEZFc1cwa0JLb25fYnB2cGY1enJyLVEzRk5IZUFWRSIsIngiOiJlM0NFMUVPcFl0RV82VXlJTjU4VUp3V21HR2VzVjNrWkhNVlpBQklRSTNNIn0"
        );
        assert!(issuer.signing_key().is_ok());
        assert_eq!(issuer.name, None);
    }

    #[test]
    fn test_issuer_explicit_did_wins() {
        let issuer = issuer_from_lookup(
            "PDA1",
            lookup(&[
                ("PDA1_ISSUER_DID", "did:ebsi:zf39qHTXaLrr6iy3tQhT3UZ"),
                ("PDA1_ISSUER_JWK", JWK),
                ("PDA1_ISSUER_NAME", "Social Security Office"),
            ]),
        )
        .unwrap();

        assert_eq!(issuer.did, "did:ebsi:zf39qHTXaLrr6iy3tQhT3UZ");
        assert_eq!(issuer.name.as_deref(), Some("Social Security Office"));
        assert!(issuer.key.is_some());
    }

    #[test]
    fn test_issuer_requires_did_or_key() {
        let err = issuer_from_lookup("FARMER_API", lookup(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "set FARMER_API_ISSUER_DID or FARMER_API_ISSUER_JWK"
        );

        let err = issuer_from_lookup("FARMER_API", lookup(&[("FARMER_API_ISSUER_JWK", "{")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("FARMER_API_ISSUER_JWK is not a valid JWK"));
    }
}
