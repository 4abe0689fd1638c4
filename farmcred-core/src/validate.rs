//! Required-field checks for inbound requests.
//!
//! Validation never parses dates or checks numeric ranges. It only verifies
//! that required fields are present, that the discriminant names a known
//! farmer type, and that the matching nested group was supplied.

use crate::error::ValidationError;
use crate::types::{FarmSpecifics, FarmerCredentialRequest, FarmerProfile, FarmerType, ValidFarmerRequest};

/// Fails with [`ValidationError::MissingField`] when `value` is blank.
///
/// # Errors
///
/// Returns `MissingField(field)` if the trimmed value is empty.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Validates a farmer credential request.
///
/// Checks run in a fixed order: `farmerType`, `firstName`, `county`, then the
/// discriminant value and its nested group. Groups belonging to other farmer
/// types are dropped.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_farmer_request(
    request: FarmerCredentialRequest,
) -> Result<ValidFarmerRequest, ValidationError> {
    require("farmerType", &request.farmer_type)?;
    require("firstName", &request.first_name)?;
    require("county", &request.county)?;

    let farmer_type: FarmerType = request.farmer_type.parse()?;
    let missing = || ValidationError::MissingSpecifics {
        group: farmer_type.specifics_field(),
        farmer_type: farmer_type.as_str(),
    };

    let specifics = match farmer_type {
        FarmerType::Dairy => FarmSpecifics::Dairy(request.dairy_specifics.ok_or_else(missing)?),
        FarmerType::Poultry => {
            FarmSpecifics::Poultry(request.poultry_specifics.ok_or_else(missing)?)
        }
        FarmerType::Horticulture => {
            FarmSpecifics::Horticulture(request.horticulture_specifics.ok_or_else(missing)?)
        }
        FarmerType::Aquaculture => {
            FarmSpecifics::Aquaculture(request.aquaculture_specifics.ok_or_else(missing)?)
        }
    };

    Ok(ValidFarmerRequest {
        profile: FarmerProfile {
            first_name: request.first_name,
            family_name: request.family_name,
            phone_number: request.phone_number,
            birth_date: request.birth_date,
            county: request.county,
            sub_county: request.sub_county,
            farm_size: request.farm_size,
        },
        specifics,
    })
}
