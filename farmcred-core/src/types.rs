//! Farmer request types and the per-category nested groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::form::string_or_null;

/// The farmer category carried in the `farmerType` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmerType {
    /// Cattle rearing and milk production
    Dairy,
    /// Chicken farming for eggs and meat
    Poultry,
    /// Vegetables, fruits and flowers
    Horticulture,
    /// Fish and aquatic organism farming
    Aquaculture,
}

impl FarmerType {
    /// All farmer types, in catalogue order.
    pub const ALL: [FarmerType; 4] = [
        FarmerType::Dairy,
        FarmerType::Poultry,
        FarmerType::Horticulture,
        FarmerType::Aquaculture,
    ];

    /// Get the discriminant value as a string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FarmerType::Dairy => "dairy",
            FarmerType::Poultry => "poultry",
            FarmerType::Horticulture => "horticulture",
            FarmerType::Aquaculture => "aquaculture",
        }
    }

    /// The request field that holds this type's nested group.
    #[must_use]
    pub fn specifics_field(self) -> &'static str {
        match self {
            FarmerType::Dairy => "dairySpecifics",
            FarmerType::Poultry => "poultrySpecifics",
            FarmerType::Horticulture => "horticultureSpecifics",
            FarmerType::Aquaculture => "aquacultureSpecifics",
        }
    }

    /// The type-specific credential type, e.g. `DairyFarmerCredential`.
    #[must_use]
    pub fn credential_type(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}FarmerCredential",
                first.to_ascii_uppercase(),
                chars.as_str()
            ),
            None => "FarmerCredential".to_string(),
        }
    }
}

impl fmt::Display for FarmerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FarmerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FarmerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFarmerType(s.to_string()))
    }
}

/// A value with a unit, e.g. `{"value": 2.5, "unit": "acres"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// The numeric value.
    pub value: f64,
    /// The unit of measure.
    pub unit: String,
}

/// Dairy-specific farm data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DairySpecifics {
    /// Breeds kept on the farm.
    pub cattle_breeds: Vec<String>,
    /// Total head of cattle.
    pub number_of_cattle: u32,
    /// Cows currently in milk.
    pub milking_cows: u32,
    /// Average milk output per day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_daily_production: Option<Measure>,
    /// Kenya Dairy Board registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdb_number: Option<String>,
}

/// Poultry output figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoultryProduction {
    /// Eggs collected per day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eggs_per_day: Option<u32>,
    /// Meat produced per cycle, in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meat_per_cycle: Option<f64>,
}

/// Poultry-specific farm data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoultrySpecifics {
    /// Layers, broilers or mixed.
    pub farming_type: String,
    /// Number of birds kept.
    pub bird_population: u32,
    /// How the birds are housed.
    pub housing_type: String,
    /// Output figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_capacity: Option<PoultryProduction>,
    /// Biosecurity rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biosecurity_level: Option<String>,
    /// Veterinary registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinary_registration: Option<String>,
}

/// Horticulture-specific farm data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorticultureSpecifics {
    /// Crops grown.
    pub crops: Vec<String>,
    /// Organic, conventional and so on.
    pub farming_method: String,
    /// The irrigation in use.
    pub irrigation_system: String,
    /// Number of greenhouses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greenhouse_count: Option<u32>,
    /// Certifications held, e.g. GlobalGAP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    /// Whether the produce is exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_market: Option<bool>,
    /// Horticultural Crops Directorate number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcd_number: Option<String>,
}

/// Aquaculture production cycle figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AquaProduction {
    /// Harvest cycles per year.
    pub cycles_per_year: u32,
    /// Fish stocked per cycle.
    pub fish_per_cycle: u32,
    /// Harvest weight per cycle, in kilograms.
    pub kg_per_cycle: f64,
}

/// Aquaculture-specific farm data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AquacultureSpecifics {
    /// Species farmed.
    pub species: Vec<String>,
    /// Ponds, cages, tanks and so on.
    pub farming_system: String,
    /// Where the water comes from.
    pub water_source: String,
    /// Number of ponds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_ponds: Option<u32>,
    /// Production cycle figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_cycle: Option<AquaProduction>,
    /// Feed used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_type: Option<String>,
    /// Fisheries department permit number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fish_department_permit: Option<String>,
    /// Whether water quality is actively managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_quality_management: Option<bool>,
}

/// The nested group selected by the discriminant.
///
/// Serializes as a single `<type>Specifics` key, so it can be flattened into
/// the credential subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FarmSpecifics {
    /// Dairy group.
    #[serde(rename = "dairySpecifics")]
    Dairy(DairySpecifics),
    /// Poultry group.
    #[serde(rename = "poultrySpecifics")]
    Poultry(PoultrySpecifics),
    /// Horticulture group.
    #[serde(rename = "horticultureSpecifics")]
    Horticulture(HorticultureSpecifics),
    /// Aquaculture group.
    #[serde(rename = "aquacultureSpecifics")]
    Aquaculture(AquacultureSpecifics),
}

impl FarmSpecifics {
    /// The farmer type this group belongs to.
    #[must_use]
    pub fn farmer_type(&self) -> FarmerType {
        match self {
            FarmSpecifics::Dairy(_) => FarmerType::Dairy,
            FarmSpecifics::Poultry(_) => FarmerType::Poultry,
            FarmSpecifics::Horticulture(_) => FarmerType::Horticulture,
            FarmSpecifics::Aquaculture(_) => FarmerType::Aquaculture,
        }
    }
}

/// Inbound body of `POST /credentials/issue`.
///
/// Top-level strings decode absent or `null` as empty so that a missing field
/// reaches the validator and is reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerCredentialRequest {
    /// The farmer category, e.g. `dairy`.
    #[serde(default, deserialize_with = "string_or_null")]
    pub farmer_type: String,
    /// Given name.
    #[serde(default, deserialize_with = "string_or_null")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "string_or_null")]
    pub family_name: String,
    /// Contact phone number.
    #[serde(default, deserialize_with = "string_or_null")]
    pub phone_number: String,
    /// Date of birth.
    #[serde(default, deserialize_with = "string_or_null")]
    pub birth_date: String,
    /// County of the farm.
    #[serde(default, deserialize_with = "string_or_null")]
    pub county: String,
    /// Sub-county of the farm.
    #[serde(default, deserialize_with = "string_or_null")]
    pub sub_county: String,
    /// Farm area.
    #[serde(default)]
    pub farm_size: Option<Measure>,
    /// Group for dairy farmers.
    #[serde(default)]
    pub dairy_specifics: Option<DairySpecifics>,
    /// Group for poultry farmers.
    #[serde(default)]
    pub poultry_specifics: Option<PoultrySpecifics>,
    /// Group for horticulture farmers.
    #[serde(default)]
    pub horticulture_specifics: Option<HorticultureSpecifics>,
    /// Group for aquaculture farmers.
    #[serde(default)]
    pub aquaculture_specifics: Option<AquacultureSpecifics>,
}

/// The profile fields shared by every farmer type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    /// Given name.
    pub first_name: String,
    /// Family name, empty when not supplied.
    pub family_name: String,
    /// Contact phone number, empty when not supplied.
    pub phone_number: String,
    /// Date of birth, empty when not supplied.
    pub birth_date: String,
    /// County of the farm.
    pub county: String,
    /// Sub-county, empty when not supplied.
    pub sub_county: String,
    /// Farm area, serialized as `null` when not supplied.
    pub farm_size: Option<Measure>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFarmerRequest {
    /// The shared profile fields.
    pub profile: FarmerProfile,
    /// The nested group matching the discriminant.
    pub specifics: FarmSpecifics,
}

impl ValidFarmerRequest {
    /// The farmer type named by the request.
    #[must_use]
    pub fn farmer_type(&self) -> FarmerType {
        self.specifics.farmer_type()
    }
}
