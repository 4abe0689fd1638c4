//! Issuer identity and signing key material.
//!
//! Keys and DIDs are supplied by configuration. When only a key is given, the
//! issuer DID is derived as a `did:jwk` from its public half.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A JSON Web Key as accepted by the credential authority.
///
/// Field order is significant: the public half is serialized in this order
/// when deriving a `did:jwk`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, e.g. `OKP` or `EC`.
    pub kty: String,
    /// Curve name, e.g. `Ed25519` or `P-256`.
    pub crv: String,
    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Public x coordinate.
    pub x: String,
    /// Public y coordinate (EC keys only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Private key component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl std::fmt::Debug for Jwk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jwk")
            .field("kty", &self.kty)
            .field("crv", &self.crv)
            .field("kid", &self.kid)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("d", &self.d.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Jwk {
    /// Returns a copy without the private component.
    #[must_use]
    pub fn public(&self) -> Jwk {
        Jwk {
            d: None,
            ..self.clone()
        }
    }

    /// Derives the `did:jwk` identifier for this key.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the key cannot be encoded.
    pub fn to_did_jwk(&self) -> Result<String> {
        let encoded = serde_json::to_vec(&self.public())?;
        Ok(format!("did:jwk:{}", URL_SAFE_NO_PAD.encode(encoded)))
    }
}

/// The issuer key envelope sent with issuance requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerKey {
    /// Always `jwk`.
    #[serde(rename = "type")]
    pub key_type: &'static str,
    /// The signing key.
    pub jwk: Jwk,
}

impl From<Jwk> for IssuerKey {
    fn from(jwk: Jwk) -> Self {
        Self {
            key_type: "jwk",
            jwk,
        }
    }
}

/// An issuer profile: DID, display name and optional signing key.
#[derive(Debug, Clone, PartialEq)]
pub struct Issuer {
    /// The issuer's DID.
    pub did: String,
    /// Display name shown in issued credentials.
    pub name: Option<String>,
    /// Signing key, required for issuance offers.
    pub key: Option<Jwk>,
}

impl Issuer {
    /// Creates an issuer from an explicit DID, without key material.
    pub fn new(did: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            name: None,
            key: None,
        }
    }

    /// Creates an issuer whose DID is derived from `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the DID cannot be derived.
    pub fn from_key(key: Jwk) -> Result<Self> {
        Ok(Self {
            did: key.to_did_jwk()?,
            name: None,
            key: Some(key),
        })
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the signing key, keeping the configured DID.
    #[must_use]
    pub fn with_key(mut self, key: Jwk) -> Self {
        self.key = Some(key);
        self
    }

    /// Returns the signing key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIssuer`] if no key is configured or the key
    /// has no private component.
    pub fn signing_key(&self) -> Result<&Jwk> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| Error::InvalidIssuer(format!("no signing key for {}", self.did)))?;
        if key.d.is_none() {
            return Err(Error::InvalidIssuer(format!(
                "signing key for {} has no private component",
                self.did
            )));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ed25519_key() -> Jwk {
        Jwk {
            kty: "OKP".into(),
            crv: "Ed25519".into(),
            kid: Some("ynzK6u55SjO6hFEsW0kBKon_bpvpf5zrr-Q3FNHeAVE".into()),
            x: "e3CE1EOpYtE_6UyIN58UJwWmGGesV3kZHMVZABIQI3M".into(),
            y: None,
            d: Some("private".into()),
        }
    }

    #[test]
    fn test_did_jwk_derivation() {
        let did = ed25519_key().to_did_jwk().unwrap();
        assert_eq!(
            did,
            "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5Iiwia2lkIjoieW56SzZ1NTVTak82aEZFc1cwa0JLb25fYnB2cGY1enJyLVEzRk5IZUFWRSIsIngiOiJlM0NFMUVPcFl0RV82VXlJTjU4VUp3V21HR2VzVjNrWkhNVlpBQklRSTNNIn0"
        );
    }

    #[test]
    fn test_debug_redacts_private_component() {
        let rendered = format!("{:?}", ed25519_key());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("private"));
    }

    #[test]
    fn test_signing_key_requirements() {
        let issuer = Issuer::new("did:example:issuer");
        assert!(matches!(issuer.signing_key(), Err(Error::InvalidIssuer(_))));

        let public_only = Issuer::from_key(ed25519_key().public()).unwrap();
        assert!(public_only.signing_key().is_err());

        let issuer = Issuer::from_key(ed25519_key()).unwrap().with_name("Registry");
        assert_eq!(issuer.signing_key().unwrap().crv, "Ed25519");
        assert_eq!(issuer.name.as_deref(), Some("Registry"));
        assert!(issuer.did.starts_with("did:jwk:"));
    }
}
