//! OpenID4VP presentation requests and verification results.

use serde::{Deserialize, Serialize};

use crate::form::checkbox;

/// Credential type requested when the form leaves it blank.
pub const DEFAULT_CREDENTIAL_TYPE: &str = "VerifiablePortableDocumentA1";

/// Input descriptor id of the presentation definition.
const INPUT_DESCRIPTOR_ID: &str = "e3d700aa-0988-4eb6-b9c9-e00f4b27f1d8";

/// A verification policy applied by the credential authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Policy {
    /// Signature check.
    #[serde(rename = "signature")]
    Signature,
    /// Expiration date check.
    #[serde(rename = "expired")]
    Expired,
    /// Not-before date check.
    #[serde(rename = "not-before")]
    NotBefore,
    /// Status list revocation check.
    #[serde(rename = "revoked-status-list")]
    RevokedStatusList,
}

impl Policy {
    /// All policies, in request order.
    pub const ALL: [Policy; 4] = [
        Policy::Signature,
        Policy::Expired,
        Policy::NotBefore,
        Policy::RevokedStatusList,
    ];

    /// Human readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Policy::Signature => "Signature",
            Policy::Expired => "Expiration",
            Policy::NotBefore => "Not-Before",
            Policy::RevokedStatusList => "Revocation Status",
        }
    }
}

/// The verification form as posted by the verifier portal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerificationForm {
    /// Credential type to request. Blank selects the default.
    pub credential_type: String,
    /// Signature policy ticked.
    #[serde(deserialize_with = "checkbox")]
    pub check_signature: bool,
    /// Expiration policy ticked.
    #[serde(deserialize_with = "checkbox")]
    pub check_expiration: bool,
    /// Not-before policy ticked.
    #[serde(deserialize_with = "checkbox")]
    pub check_not_before: bool,
    /// Revocation policy ticked.
    #[serde(deserialize_with = "checkbox")]
    pub check_revoked_status: bool,
}

impl VerificationForm {
    /// The policies ticked on the form, in request order.
    #[must_use]
    pub fn selected_policies(&self) -> Vec<Policy> {
        let ticked = [
            self.check_signature,
            self.check_expiration,
            self.check_not_before,
            self.check_revoked_status,
        ];
        Policy::ALL
            .into_iter()
            .zip(ticked)
            .filter_map(|(policy, on)| on.then_some(policy))
            .collect()
    }

    /// The requested credential type, if one was entered.
    #[must_use]
    pub fn requested_type(&self) -> Option<&str> {
        let value = self.credential_type.trim();
        (!value.is_empty()).then_some(value)
    }
}

/// A filter on the `contains` value of an array field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainsConst {
    /// The value the array must contain.
    #[serde(rename = "const")]
    pub value: String,
}

/// A JSON schema filter applied to a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    /// The required array member.
    pub contains: ContainsConst,
    /// JSON type of the field, always `array`.
    #[serde(rename = "type")]
    pub filter_type: &'static str,
}

/// A constrained field of the presented credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldConstraint {
    /// JSON paths to the constrained field.
    pub path: Vec<String>,
    /// Filter the field must satisfy.
    pub filter: Filter,
}

/// Constraints of an input descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraints {
    /// The constrained fields.
    pub fields: Vec<FieldConstraint>,
}

/// Describes the credential the holder must present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputDescriptor {
    /// Descriptor id, the requested credential type.
    pub id: &'static str,
    /// Field constraints on the presented credential.
    pub constraints: Constraints,
}

/// One requested credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestCredential {
    /// Credential format, e.g. `jwt_vc_json`.
    pub format: &'static str,
    /// What the holder must present.
    pub input_descriptor: InputDescriptor,
}

/// The presentation request sent to the authority's verify endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationRequest {
    /// Policies applied to every presented credential.
    pub vc_policies: Vec<Policy>,
    /// The credentials requested from the holder.
    pub request_credentials: Vec<RequestCredential>,
}

impl VerificationRequest {
    /// The credential type the request asks for.
    #[must_use]
    pub fn credential_type(&self) -> Option<&str> {
        self.request_credentials
            .first()
            .and_then(|c| c.input_descriptor.constraints.fields.first())
            .map(|f| f.filter.contains.value.as_str())
    }
}

/// Builds a presentation request from the verification form.
///
/// An empty policy selection requests every policy; an empty credential type
/// requests [`DEFAULT_CREDENTIAL_TYPE`].
#[must_use]
pub fn build_verification_request(form: &VerificationForm) -> VerificationRequest {
    let mut policies = form.selected_policies();
    if policies.is_empty() {
        policies = Policy::ALL.to_vec();
    }

    let credential_type = form
        .requested_type()
        .unwrap_or(DEFAULT_CREDENTIAL_TYPE)
        .to_string();

    VerificationRequest {
        vc_policies: policies,
        request_credentials: vec![RequestCredential {
            format: "jwt_vc",
            input_descriptor: InputDescriptor {
                id: INPUT_DESCRIPTOR_ID,
                constraints: Constraints {
                    fields: vec![FieldConstraint {
                        path: vec!["$.vc.type".to_string()],
                        filter: Filter {
                            contains: ContainsConst {
                                value: credential_type,
                            },
                            filter_type: "array",
                        },
                    }],
                },
            },
        }],
    }
}

/// The authority's verdict on a presented credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    /// Whether the credential passed verification.
    pub verified: bool,
    /// The authority's response body.
    pub result: serde_json::Value,
}
