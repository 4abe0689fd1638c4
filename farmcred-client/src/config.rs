//! Configuration of the credential authority client.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Path of the JWT issuance endpoint.
pub const ISSUE_JWT_PATH: &str = "/openid4vc/jwt/issue";

/// Path of the SD-JWT issuance endpoint.
pub const ISSUE_SDJWT_PATH: &str = "/openid4vc/sdjwt/issue";

/// Path of the verification endpoint.
pub const VERIFY_PATH: &str = "/openid4vc/verify";

/// Where the credential authority lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Base URL of the issuer API
    pub issuer_url: String,
    /// Base URL of the verifier API
    pub verifier_url: String,
    /// The HTTP client timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            issuer_url: "http://localhost:7002".to_string(),
            verifier_url: "http://localhost:7003".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AuthorityConfig {
    /// Reads `AUTHORITY_ISSUER_URL`, `AUTHORITY_VERIFIER_URL` and
    /// `AUTHORITY_TIMEOUT_SECS`, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AuthorityConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match read("AUTHORITY_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::InvalidConfig(format!("AUTHORITY_TIMEOUT_SECS must be a positive integer, got {raw:?}"))
                })?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            issuer_url: read("AUTHORITY_ISSUER_URL").unwrap_or(defaults.issuer_url),
            verifier_url: read("AUTHORITY_VERIFIER_URL").unwrap_or(defaults.verifier_url),
            timeout_secs,
        })
    }
}
