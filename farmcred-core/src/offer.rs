//! Credential offer requests built from the issuer portal's forms.
//!
//! Two credential kinds are offered: the Portable Document A1 (issued as an
//! SD-JWT with a selective-disclosure table) and a lightweight farmer
//! credential (issued as a JWT). Both carry the issuer's signing key, since
//! the credential authority signs on the issuer's behalf.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::credential::{CredentialContext, CREDENTIALS_V1_CONTEXT};
use crate::error::{Result, ValidationError};
use crate::form::{checkbox, split_list};
use crate::issuer::{Issuer, IssuerKey};
use crate::validate::require;

/// Configuration id of the PDA1 credential at the authority.
pub const PDA1_CONFIGURATION_ID: &str = "VerifiablePortableDocumentA1_jwt_vc";

/// Configuration id of the farmer credential at the authority.
pub const FARMER_CONFIGURATION_ID: &str = "FarmerCredential_jwt_vc_json";

/// EBSI trusted schema the PDA1 credential is validated against.
pub const PDA1_SCHEMA_ID: &str = "https://api-conformance.ebsi.eu/trusted-schemas-registry/v3/schemas/z5qB8tydkn3Xk3VXb15SJ9dAWW6wky1YEoVdGzudWzhcW";

/// Nationality used when the form leaves the field blank.
const DEFAULT_NATIONALITY: &str = "BE";

/// Which issuance endpoint of the authority handles an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceFlow {
    /// Plain JWT credential.
    Jwt,
    /// Selective-disclosure JWT credential.
    SdJwt,
}

/// An issuance offer request, one case per credential kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IssuanceRequest {
    /// Portable Document A1.
    Pda1(Box<Pda1Offer>),
    /// Farmer credential.
    Farmer(FarmerOffer),
}

impl IssuanceRequest {
    /// The endpoint flow this offer is sent to.
    #[must_use]
    pub fn flow(&self) -> IssuanceFlow {
        match self {
            IssuanceRequest::Pda1(_) => IssuanceFlow::SdJwt,
            IssuanceRequest::Farmer(_) => IssuanceFlow::Jwt,
        }
    }

    /// Short label of the credential kind, used in rendered output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            IssuanceRequest::Pda1(_) => "PDA1",
            IssuanceRequest::Farmer(_) => "Farmer",
        }
    }
}

/// The PDA1 form as posted by the issuer portal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pda1Form {
    // Section 1
    /// Personal identification number.
    pub personal_id: String,
    /// Sex code.
    pub sex: String,
    /// Surname.
    pub surname: String,
    /// Forenames.
    pub forenames: String,
    /// Date of birth.
    pub date_of_birth: String,
    /// Comma separated nationality codes.
    pub nationalities: String,
    /// Street of the residence address.
    pub residence_street: String,
    /// Post code of the residence address.
    pub residence_post_code: String,
    /// Town of the residence address.
    pub residence_town: String,
    /// Country code of the residence address.
    pub residence_country: String,
    /// Street of the stay address.
    pub stay_street: String,
    /// Post code of the stay address.
    pub stay_post_code: String,
    /// Town of the stay address.
    pub stay_town: String,
    /// Country code of the stay address.
    pub stay_country: String,

    // Section 2
    /// Member state whose legislation applies.
    pub member_state: String,
    /// Start of the covered period.
    pub starting_date: String,
    /// End of the covered period.
    pub ending_date: String,
    /// Certificate covers the whole activity.
    #[serde(deserialize_with = "checkbox")]
    pub certificate_duration: bool,
    /// Determination is provisional.
    #[serde(deserialize_with = "checkbox")]
    pub provisional: bool,
    /// Transition rules of EC 883/2004 apply.
    #[serde(deserialize_with = "checkbox")]
    pub transition_rules: bool,

    // Section 3
    /// Posted employed person.
    #[serde(deserialize_with = "checkbox")]
    pub posted_employed: bool,
    /// Employed in two or more states.
    #[serde(deserialize_with = "checkbox")]
    pub employed_multi_state: bool,
    /// Posted self-employed person.
    #[serde(deserialize_with = "checkbox")]
    pub posted_self_employed: bool,
    /// Self-employed in two or more states.
    #[serde(deserialize_with = "checkbox")]
    pub self_employed_multi_state: bool,
    /// Civil servant.
    #[serde(deserialize_with = "checkbox")]
    pub civil_servant: bool,
    /// Contract staff.
    #[serde(deserialize_with = "checkbox")]
    pub contract_staff: bool,
    /// Mariner.
    #[serde(deserialize_with = "checkbox")]
    pub mariner: bool,
    /// Employed and self-employed.
    #[serde(deserialize_with = "checkbox")]
    pub employed_and_self: bool,
    /// Civil servant and employed or self-employed.
    #[serde(deserialize_with = "checkbox")]
    pub civil_and_employed: bool,
    /// Flight crew member.
    #[serde(deserialize_with = "checkbox")]
    pub flight_crew: bool,
    /// An exception applies.
    #[serde(deserialize_with = "checkbox")]
    pub exception: bool,
    /// Description of the exception.
    pub exception_desc: String,
    /// Working in a state under article 21.
    #[serde(deserialize_with = "checkbox")]
    pub working_under21: bool,

    // Section 4
    /// Holder is an employee.
    #[serde(deserialize_with = "checkbox")]
    pub employee: bool,
    /// Holder is self-employed.
    #[serde(deserialize_with = "checkbox")]
    pub self_employed: bool,
    /// Name of the employer or business.
    pub business_name: String,
    /// Street of the employer address.
    pub business_street: String,
    /// Post code of the employer address.
    pub business_post_code: String,
    /// Town of the employer address.
    pub business_town: String,
    /// Country code of the employer address.
    pub business_country: String,

    // Section 5
    /// No fixed place of work.
    #[serde(deserialize_with = "checkbox")]
    pub no_fixed_address: bool,

    // Section 6
    /// Name of the issuing institution.
    pub institution_name: String,
    /// Street of the institution address.
    pub institution_street: String,
    /// Post code of the institution address.
    pub institution_post_code: String,
    /// Town of the institution address.
    pub institution_town: String,
    /// Country code of the institution address.
    pub institution_country: String,
    /// Institution identifier.
    pub institution_id: String,
    /// Office fax number.
    pub office_fax: String,
    /// Office phone number.
    pub office_phone: String,
    /// Institution email.
    pub email: String,
    /// Date of issue.
    pub issue_date: String,
    /// Signature text.
    pub signature: String,
}

impl Pda1Form {
    /// Checks the fields a PDA1 cannot be issued without.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        require("personalId", &self.personal_id)?;
        require("surname", &self.surname)?;
        require("forenames", &self.forenames)
    }

    /// The holder's display name.
    #[must_use]
    pub fn holder_name(&self) -> String {
        format!("{} {}", self.forenames.trim(), self.surname.trim())
    }

    fn nationalities(&self) -> Vec<String> {
        let parsed = split_list(&self.nationalities);
        if parsed.is_empty() {
            vec![DEFAULT_NATIONALITY.to_string()]
        } else {
            parsed
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street and number.
    pub street_no: String,
    /// Post code.
    pub post_code: String,
    /// Town.
    pub town: String,
    /// Country code.
    pub country_code: String,
}

impl Address {
    fn new(street_no: &str, post_code: &str, town: &str, country_code: &str) -> Self {
        Self {
            street_no: street_no.to_string(),
            post_code: post_code.to_string(),
            town: town.to_string(),
            country_code: country_code.to_string(),
        }
    }
}

/// Section 1: personal information.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSection {
    /// Personal identification number.
    pub personal_identification_number: String,
    /// Sex code.
    pub sex: String,
    /// Surname.
    pub surname: String,
    /// Forenames.
    pub forenames: String,
    /// Date of birth.
    pub date_birth: String,
    /// Nationality codes.
    pub nationalities: Vec<String>,
    /// Address in the state of residence.
    pub state_of_residence_address: Address,
    /// Address in the state of stay.
    pub state_of_stay_address: Address,
}

/// Section 2: applicable legislation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegislationSection {
    /// Member state whose legislation applies.
    pub member_state_which_legislation_applies: String,
    /// Start of the covered period.
    pub starting_date: String,
    /// End of the covered period.
    pub ending_date: String,
    /// Certificate covers the whole activity.
    pub certificate_for_duration_activity: bool,
    /// Determination is provisional.
    pub determination_provisional: bool,
    /// Transition rules of EC 883/2004 apply.
    #[serde(rename = "transitionRulesApplyAsEC8832004")]
    pub transition_rules_apply: bool,
}

/// Section 3: activity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySection {
    /// Posted employed person.
    pub posted_employed_person: bool,
    /// Employed in two or more states.
    pub employed_two_or_more_states: bool,
    /// Posted self-employed person.
    pub posted_self_employed_person: bool,
    /// Self-employed in two or more states.
    pub self_employed_two_or_more_states: bool,
    /// Civil servant.
    pub civil_servant: bool,
    /// Contract staff.
    pub contract_staff: bool,
    /// Mariner.
    pub mariner: bool,
    /// Employed and self-employed.
    pub employed_and_self_employed: bool,
    /// Civil servant and employed or self-employed.
    pub civil_and_employed_self_employed: bool,
    /// Flight crew member.
    pub flight_crew_member: bool,
    /// An exception applies.
    pub exception: bool,
    /// Description of the exception.
    pub exception_description: String,
    /// Working in a state under article 21.
    #[serde(rename = "workingInStateUnder21")]
    pub working_in_state_under_21: bool,
}

/// Section 4: employer or self-employed activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSection {
    /// Holder is an employee.
    pub employee: bool,
    /// Holder is self-employed.
    pub self_employed_activity: bool,
    /// Name of the employer or business.
    pub name_business_name: String,
    /// Registered address of the employer.
    pub registered_address: Address,
}

/// Section 5: place of work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlaceSection {
    /// No fixed place of work.
    pub no_fixed_address: bool,
}

/// Section 6: issuing institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionSection {
    /// Name of the institution.
    pub name: String,
    /// Address of the institution.
    pub address: Address,
    /// Institution identifier.
    #[serde(rename = "institutionID")]
    pub institution_id: String,
    /// Office fax number.
    pub office_fax_no: String,
    /// Office phone number.
    pub office_phone_no: String,
    /// Institution email.
    pub email: String,
    /// Date of issue.
    pub date: String,
    /// Signature text.
    pub signature: String,
}

/// Subject of a PDA1 credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pda1Subject {
    /// Identifier of the holder.
    pub id: String,
    /// Personal information.
    pub section1: PersonalSection,
    /// Applicable legislation.
    pub section2: LegislationSection,
    /// Activity type.
    pub section3: ActivitySection,
    /// Employer or self-employed activity.
    pub section4: EmployerSection,
    /// Place of work.
    pub section5: WorkPlaceSection,
    /// Issuing institution.
    pub section6: InstitutionSection,
}

/// The unsigned PDA1 credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pda1CredentialData {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Credential id.
    pub id: String,
    /// Credential types.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// DID of the issuer.
    pub issuer: String,
    /// Issuance time.
    pub issuance_date: String,
    /// The PDA1 subject.
    pub credential_subject: Pda1Subject,
}

/// Reference to the schema a credential conforms to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialSchema {
    /// Schema URL.
    pub id: &'static str,
    /// Schema type, serialized as `type`.
    #[serde(rename = "type")]
    pub schema_type: &'static str,
}

/// Placeholder for the subject DID inside a mapping template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMapping {
    /// Subject DID placeholder.
    pub id: &'static str,
}

/// The PDA1 mapping template. The authority substitutes the placeholders at
/// issuance time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pda1Mapping {
    /// Credential id placeholder.
    pub id: &'static str,
    /// Issuer DID placeholder.
    pub issuer: &'static str,
    /// Subject placeholders.
    pub credential_subject: SubjectMapping,
    /// Issuance time placeholder.
    pub issuance_date: &'static str,
    /// Issued time placeholder.
    pub issued: &'static str,
    /// Validity start placeholder.
    pub valid_from: &'static str,
    /// Expiry placeholder.
    pub expiration_date: &'static str,
    /// Schema the credential conforms to.
    pub credential_schema: CredentialSchema,
}

impl Pda1Mapping {
    /// The fixed mapping template.
    #[must_use]
    pub fn template() -> Self {
        Self {
            id: "<uuid>",
            issuer: "<issuerDid>",
            credential_subject: SubjectMapping { id: "<subjectDid>" },
            issuance_date: "<timestamp-ebsi>",
            issued: "<timestamp-ebsi>",
            valid_from: "<timestamp-ebsi>",
            expiration_date: "<timestamp-ebsi-in:365d>",
            credential_schema: CredentialSchema {
                id: PDA1_SCHEMA_ID,
                schema_type: "FullJsonSchemaValidator2021",
            },
        }
    }
}

/// Fields of the PDA1 subject that may be selectively disclosed, by section.
const PDA1_DISCLOSABLE: &[(&str, &[&str])] = &[
    (
        "section1",
        &[
            "personalIdentificationNumber",
            "sex",
            "surname",
            "forenames",
            "dateBirth",
            "nationalities",
            "stateOfResidenceAddress",
            "stateOfStayAddress",
        ],
    ),
    (
        "section3",
        &[
            "postedEmployedPerson",
            "employedTwoOrMoreStates",
            "postedSelfEmployedPerson",
            "selfEmployedTwoOrMoreStates",
            "civilServant",
            "contractStaff",
            "mariner",
            "employedAndSelfEmployed",
            "civilAndEmployedSelfEmployed",
            "flightCrewMember",
            "exception",
            "exceptionDescription",
            "workingInStateUnder21",
        ],
    ),
    (
        "section4",
        &[
            "employee",
            "selfEmployedActivity",
            "nameBusinessName",
            "registeredAddress",
        ],
    ),
    ("section5", &["noFixedAddress"]),
    (
        "section6",
        &[
            "name",
            "address",
            "institutionID",
            "officeFaxNo",
            "officePhoneNo",
            "email",
            "date",
            "signature",
        ],
    ),
];

/// A node of the selective-disclosure tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdNode {
    /// Whether this node is disclosed selectively.
    pub sd: bool,
    /// Child configuration, for containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<SdChildren>,
}

/// The children of a container node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdChildren {
    /// Child nodes by field name.
    pub fields: BTreeMap<&'static str, SdNode>,
}

impl SdNode {
    fn leaf() -> Self {
        Self {
            sd: true,
            children: None,
        }
    }

    fn container(fields: BTreeMap<&'static str, SdNode>) -> Self {
        Self {
            sd: false,
            children: Some(SdChildren { fields }),
        }
    }
}

/// Selective-disclosure configuration of an SD-JWT offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectiveDisclosure {
    /// Top-level fields of the credential.
    pub fields: BTreeMap<&'static str, SdNode>,
}

impl SelectiveDisclosure {
    /// The PDA1 disclosure table: every listed field is disclosable, while
    /// the section containers are always revealed.
    #[must_use]
    pub fn pda1() -> Self {
        let sections = PDA1_DISCLOSABLE
            .iter()
            .map(|(section, fields)| {
                let leaves = fields.iter().map(|f| (*f, SdNode::leaf())).collect();
                (*section, SdNode::container(leaves))
            })
            .collect();

        let mut fields = BTreeMap::new();
        fields.insert("credentialSubject", SdNode::container(sections));
        Self { fields }
    }
}

/// The SD-JWT issuance request for a PDA1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pda1Offer {
    /// Signing key of the issuer.
    pub issuer_key: IssuerKey,
    /// Credential configuration at the authority.
    pub credential_configuration_id: &'static str,
    /// The unsigned credential.
    pub credential_data: Pda1CredentialData,
    /// Placeholder template.
    pub mapping: Pda1Mapping,
    /// Fields the holder may disclose selectively.
    pub selective_disclosure: SelectiveDisclosure,
    /// DID of the issuer.
    pub issuer_did: String,
}

/// Builds the PDA1 issuance request.
///
/// # Errors
///
/// Fails if the issuer has no signing key.
pub fn build_pda1_offer(
    form: &Pda1Form,
    issuer: &Issuer,
    context: &CredentialContext,
) -> Result<IssuanceRequest> {
    let key = issuer.signing_key()?.clone();

    let subject = Pda1Subject {
        id: context.subject_id.clone(),
        section1: PersonalSection {
            personal_identification_number: form.personal_id.clone(),
            sex: form.sex.clone(),
            surname: form.surname.clone(),
            forenames: form.forenames.clone(),
            date_birth: form.date_of_birth.clone(),
            nationalities: form.nationalities(),
            state_of_residence_address: Address::new(
                &form.residence_street,
                &form.residence_post_code,
                &form.residence_town,
                &form.residence_country,
            ),
            state_of_stay_address: Address::new(
                &form.stay_street,
                &form.stay_post_code,
                &form.stay_town,
                &form.stay_country,
            ),
        },
        section2: LegislationSection {
            member_state_which_legislation_applies: form.member_state.clone(),
            starting_date: form.starting_date.clone(),
            ending_date: form.ending_date.clone(),
            certificate_for_duration_activity: form.certificate_duration,
            determination_provisional: form.provisional,
            transition_rules_apply: form.transition_rules,
        },
        section3: ActivitySection {
            posted_employed_person: form.posted_employed,
            employed_two_or_more_states: form.employed_multi_state,
            posted_self_employed_person: form.posted_self_employed,
            self_employed_two_or_more_states: form.self_employed_multi_state,
            civil_servant: form.civil_servant,
            contract_staff: form.contract_staff,
            mariner: form.mariner,
            employed_and_self_employed: form.employed_and_self,
            civil_and_employed_self_employed: form.civil_and_employed,
            flight_crew_member: form.flight_crew,
            exception: form.exception,
            exception_description: form.exception_desc.clone(),
            working_in_state_under_21: form.working_under21,
        },
        section4: EmployerSection {
            employee: form.employee,
            self_employed_activity: form.self_employed,
            name_business_name: form.business_name.clone(),
            registered_address: Address::new(
                &form.business_street,
                &form.business_post_code,
                &form.business_town,
                &form.business_country,
            ),
        },
        section5: WorkPlaceSection {
            no_fixed_address: form.no_fixed_address,
        },
        section6: InstitutionSection {
            name: form.institution_name.clone(),
            address: Address::new(
                &form.institution_street,
                &form.institution_post_code,
                &form.institution_town,
                &form.institution_country,
            ),
            institution_id: form.institution_id.clone(),
            office_fax_no: form.office_fax.clone(),
            office_phone_no: form.office_phone.clone(),
            email: form.email.clone(),
            date: form.issue_date.clone(),
            signature: form.signature.clone(),
        },
    };

    Ok(IssuanceRequest::Pda1(Box::new(Pda1Offer {
        issuer_key: key.into(),
        credential_configuration_id: PDA1_CONFIGURATION_ID,
        credential_data: Pda1CredentialData {
            context: vec![CREDENTIALS_V1_CONTEXT.to_string()],
            id: context.credential_urn(),
            types: vec![
                "VerifiableCredential".to_string(),
                "VerifiableAttestation".to_string(),
                "VerifiablePortableDocumentA1".to_string(),
            ],
            issuer: issuer.did.clone(),
            issuance_date: context.timestamp(),
            credential_subject: subject,
        },
        mapping: Pda1Mapping::template(),
        selective_disclosure: SelectiveDisclosure::pda1(),
        issuer_did: issuer.did.clone(),
    })))
}

/// The farmer form as posted by the issuer portal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FarmerForm {
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Farm name.
    pub farm_name: String,
    /// Farm type.
    pub farm_type: String,
    /// Licence number.
    pub license_no: String,
    /// Region.
    pub region: String,
}

impl FarmerForm {
    /// Checks the fields a farmer credential cannot be issued without.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        require("given_name", &self.given_name)?;
        require("family_name", &self.family_name)?;
        require("farm_type", &self.farm_type)
    }

    /// The holder's display name.
    #[must_use]
    pub fn holder_name(&self) -> String {
        format!("{} {}", self.given_name.trim(), self.family_name.trim())
    }
}

/// Issuer reference embedded in the farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerRef {
    /// DID of the issuer.
    pub id: String,
    /// Display name of the issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Subject of the farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerOfferSubject {
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Farm name.
    pub farm_name: String,
    /// Farm type.
    pub farm_type: String,
    /// Licence number.
    pub license_no: String,
    /// Region.
    pub region: String,
}

/// The unsigned farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerOfferData {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Credential id.
    pub id: String,
    /// Credential types.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// The issuer reference.
    pub issuer: IssuerRef,
    /// The farmer subject.
    pub credential_subject: FarmerOfferSubject,
}

/// Mapping template of the farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerMapping {
    /// Credential id placeholder.
    pub id: &'static str,
    /// Issuance time placeholder.
    pub issuance_date: &'static str,
    /// Expiry placeholder.
    pub expiration_date: &'static str,
}

impl FarmerMapping {
    /// The fixed mapping template.
    #[must_use]
    pub fn template() -> Self {
        Self {
            id: "<uuid>",
            issuance_date: "<timestamp>",
            expiration_date: "<timestamp-in:365d>",
        }
    }
}

/// The JWT issuance request for a farmer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerOffer {
    /// Signing key of the issuer.
    pub issuer_key: IssuerKey,
    /// DID of the issuer.
    pub issuer_did: String,
    /// Credential configuration at the authority.
    pub credential_configuration_id: &'static str,
    /// The unsigned credential.
    pub credential_data: FarmerOfferData,
    /// Placeholder template.
    pub mapping: FarmerMapping,
}

/// Builds the farmer credential issuance request.
///
/// # Errors
///
/// Fails if the issuer has no signing key.
pub fn build_farmer_offer(
    form: &FarmerForm,
    issuer: &Issuer,
    context: &CredentialContext,
) -> Result<IssuanceRequest> {
    let key = issuer.signing_key()?.clone();

    Ok(IssuanceRequest::Farmer(FarmerOffer {
        issuer_key: key.into(),
        issuer_did: issuer.did.clone(),
        credential_configuration_id: FARMER_CONFIGURATION_ID,
        credential_data: FarmerOfferData {
            context: vec![CREDENTIALS_V1_CONTEXT.to_string()],
            id: context.credential_urn(),
            types: vec![
                "VerifiableCredential".to_string(),
                "FarmerCredential".to_string(),
            ],
            issuer: IssuerRef {
                id: issuer.did.clone(),
                name: issuer.name.clone(),
            },
            credential_subject: FarmerOfferSubject {
                given_name: form.given_name.clone(),
                family_name: form.family_name.clone(),
                farm_name: form.farm_name.clone(),
                farm_type: form.farm_type.clone(),
                license_no: form.license_no.clone(),
                region: form.region.clone(),
            },
        },
        mapping: FarmerMapping::template(),
    }))
}
