//! Static catalogue of farmer credential types and their schemas.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::FarmerType;

/// An entry of the credential type listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialTypeInfo {
    /// The farmer type, serialized as `type`.
    #[serde(rename = "type")]
    pub farmer_type: FarmerType,
    /// Display name.
    pub name: &'static str,
    /// Emoji shown next to the name.
    pub icon: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// JSON type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON integer.
    Integer,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

/// One field of a schema descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// The request field name.
    pub name: &'static str,
    /// JSON type of the field.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether the field must be present.
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

/// Describes the nested group of one farmer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDescriptor {
    /// The farmer type, serialized as `type`.
    #[serde(rename = "type")]
    pub farmer_type: FarmerType,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Fields of the nested group.
    pub fields: &'static [FieldSpec],
}

/// The credential type listing.
pub const CREDENTIAL_TYPES: [CredentialTypeInfo; 4] = [
    CredentialTypeInfo {
        farmer_type: FarmerType::Dairy,
        name: "Dairy Farmer",
        icon: "🐄",
        description: "Cattle rearing and milk production",
    },
    CredentialTypeInfo {
        farmer_type: FarmerType::Poultry,
        name: "Poultry Farmer",
        icon: "🐔",
        description: "Chicken farming for eggs and meat",
    },
    CredentialTypeInfo {
        farmer_type: FarmerType::Horticulture,
        name: "Horticulture Farmer",
        icon: "🥬",
        description: "Vegetables, fruits, and flowers",
    },
    CredentialTypeInfo {
        farmer_type: FarmerType::Aquaculture,
        name: "Aquaculture Farmer",
        icon: "🐟",
        description: "Fish and aquatic organism farming",
    },
];

static SCHEMAS: [SchemaDescriptor; 4] = [
    SchemaDescriptor {
        farmer_type: FarmerType::Dairy,
        name: "Dairy Farmer Credential",
        description: "Credential for dairy farmers in Kenya",
        fields: &[
            required("cattleBreeds", FieldKind::Array),
            required("numberOfCattle", FieldKind::Integer),
            required("milkingCows", FieldKind::Integer),
            required("averageDailyProduction", FieldKind::Object),
        ],
    },
    SchemaDescriptor {
        farmer_type: FarmerType::Poultry,
        name: "Poultry Farmer Credential",
        description: "Credential for poultry farmers in Kenya",
        fields: &[
            required("farmingType", FieldKind::String),
            required("birdPopulation", FieldKind::Integer),
            required("housingType", FieldKind::String),
        ],
    },
    SchemaDescriptor {
        farmer_type: FarmerType::Horticulture,
        name: "Horticulture Farmer Credential",
        description: "Credential for horticulture farmers in Kenya",
        fields: &[
            required("crops", FieldKind::Array),
            required("farmingMethod", FieldKind::String),
            required("irrigationSystem", FieldKind::String),
        ],
    },
    SchemaDescriptor {
        farmer_type: FarmerType::Aquaculture,
        name: "Aquaculture Farmer Credential",
        description: "Credential for aquaculture farmers in Kenya",
        fields: &[
            required("species", FieldKind::Array),
            required("farmingSystem", FieldKind::String),
            required("waterSource", FieldKind::String),
        ],
    },
];

/// Looks up the schema descriptor for a farmer type name.
///
/// # Errors
///
/// Returns [`Error::SchemaNotFound`] for unknown type names.
pub fn schema_for(type_name: &str) -> Result<&'static SchemaDescriptor> {
    SCHEMAS
        .iter()
        .find(|s| s.farmer_type.as_str() == type_name)
        .ok_or_else(|| Error::SchemaNotFound(type_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_type_has_a_schema() {
        for info in CREDENTIAL_TYPES {
            let schema = schema_for(info.farmer_type.as_str()).unwrap();
            assert_eq!(schema.farmer_type, info.farmer_type);
        }
    }

    #[test]
    fn test_schema_serialization() {
        let schema = schema_for("poultry").unwrap();
        assert_eq!(
            serde_json::to_value(schema).unwrap(),
            json!({
                "type": "poultry",
                "name": "Poultry Farmer Credential",
                "description": "Credential for poultry farmers in Kenya",
                "fields": [
                    {"name": "farmingType", "type": "string", "required": true},
                    {"name": "birdPopulation", "type": "integer", "required": true},
                    {"name": "housingType", "type": "string", "required": true}
                ]
            })
        );
    }

    #[test]
    fn test_unknown_schema() {
        let err = schema_for("beekeeping").unwrap_err();
        assert_eq!(err.to_string(), "schema not found for type: beekeeping");
    }
}
