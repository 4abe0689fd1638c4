//! W3C Verifiable Credential assembly for the farmer credential API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{FarmSpecifics, FarmerProfile, FarmerType, ValidFarmerRequest};

/// The W3C credentials v1 context.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// The JWS 2020 security suite context.
pub const JWS_2020_CONTEXT: &str = "https://w3id.org/security/suites/jws-2020/v1";

/// The per-request values injected into a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialContext {
    /// DID of the issuing party.
    pub issuer_did: String,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
    /// Fresh identifier for the credential.
    pub credential_id: Uuid,
    /// Identifier of the credential subject.
    pub subject_id: String,
}

impl CredentialContext {
    /// Creates a context stamped with the current time and fresh identifiers.
    ///
    /// The subject id is a placeholder until holders present their own DID.
    pub fn now(issuer_did: impl Into<String>) -> Self {
        let credential_id = Uuid::new_v4();
        Self {
            issuer_did: issuer_did.into(),
            issued_at: Utc::now(),
            credential_id,
            subject_id: format!("did:key:farmer_{}", Uuid::new_v4().simple()),
        }
    }

    /// The issuance time as an RFC 3339 string, e.g. `2024-05-01T08:30:00Z`.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.issued_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// The credential id as a URN.
    #[must_use]
    pub fn credential_urn(&self) -> String {
        format!("urn:uuid:{}", self.credential_id)
    }
}

/// Subject of a farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerSubject {
    /// Identifier of the holder.
    pub id: String,
    /// The farmer category.
    pub farmer_type: FarmerType,
    /// Shared profile fields, flattened into the subject.
    #[serde(flatten)]
    pub profile: FarmerProfile,
    /// Registration time, equal to the issuance date.
    pub registration_date: String,
    /// The single nested group, flattened under its `<type>Specifics` key.
    #[serde(flatten)]
    pub specifics: FarmSpecifics,
}

/// The credential posted to the authority's JWT issuance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerCredential {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Credential types, most specific last.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// DID of the issuer.
    pub issuer: String,
    /// Issuance time in RFC 3339 form.
    pub issuance_date: String,
    /// The farmer subject.
    pub credential_subject: FarmerSubject,
}

/// Builds the W3C credential for a validated farmer request.
#[must_use]
pub fn build_farmer_credential(
    request: ValidFarmerRequest,
    context: &CredentialContext,
) -> FarmerCredential {
    let farmer_type = request.farmer_type();
    let timestamp = context.timestamp();

    FarmerCredential {
        context: vec![
            CREDENTIALS_V1_CONTEXT.to_string(),
            JWS_2020_CONTEXT.to_string(),
        ],
        types: vec![
            "VerifiableCredential".to_string(),
            "FarmerCredential".to_string(),
            farmer_type.credential_type(),
        ],
        issuer: context.issuer_did.clone(),
        issuance_date: timestamp.clone(),
        credential_subject: FarmerSubject {
            id: context.subject_id.clone(),
            farmer_type,
            profile: request.profile,
            registration_date: timestamp,
            specifics: request.specifics,
        },
    }
}
