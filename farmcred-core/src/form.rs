//! Helpers for decoding form posts and loosely typed JSON bodies.

use serde::{Deserialize, Deserializer};

/// Deserializes an HTML checkbox: ticked boxes post `on`, unticked ones are
/// absent.
///
/// # Errors
///
/// Propagates the deserializer's error if the value is not a string.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref() == Some("on"))
}

/// Deserializes a string that may be sent as `null`, decoding it as empty.
///
/// # Errors
///
/// Propagates the deserializer's error if the value is neither a string nor
/// `null`.
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Splits a comma separated list, trimming entries and dropping blanks.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "checkbox")]
        ticked: bool,
        #[serde(default, deserialize_with = "checkbox")]
        unticked: bool,
        #[serde(default, deserialize_with = "checkbox")]
        absent: bool,
    }

    #[test]
    fn test_checkbox_values() {
        let form: Form =
            serde_json::from_value(serde_json::json!({"ticked": "on", "unticked": "off"}))
                .unwrap();
        assert!(form.ticked);
        assert!(!form.unticked);
        assert!(!form.absent);
    }

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "string_or_null")]
        name: String,
    }

    #[test]
    fn test_string_or_null() {
        let body: Body = serde_json::from_value(serde_json::json!({"name": null})).unwrap();
        assert_eq!(body.name, "");

        let body: Body = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(body.name, "");

        let body: Body = serde_json::from_value(serde_json::json!({"name": "Kamau"})).unwrap();
        assert_eq!(body.name, "Kamau");

        assert!(serde_json::from_value::<Body>(serde_json::json!({"name": 7})).is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" KE, UG ,,TZ"), vec!["KE", "UG", "TZ"]);
        assert!(split_list("  ").is_empty());
    }
}
