//! Lenient deserializers for CV documents.
//!
//! The profile backend aggregates every non-key column into a list, so a
//! scalar such as `workTitle` may arrive as `"Engineer"` or `["Engineer"]`.
//! Nulls and missing values collapse to the empty default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn flatten(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items.into_iter().flat_map(flatten).collect(),
        other => vec![other.to_string()],
    }
}

/// A scalar text field. Lists are joined with `", "`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten(Value::deserialize(deserializer)?).join(", "))
}

/// A multi-valued field. A bare string becomes a one-element list.
pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten(Value::deserialize(deserializer)?))
}

/// Treats `null` like a missing field.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "text")]
        title: String,
        #[serde(default, deserialize_with = "list")]
        tags: Vec<String>,
    }

    #[test]
    fn test_text_accepts_single_element_list() {
        let p: Probe = serde_json::from_str(r#"{"title": ["Engineer"]}"#).unwrap();
        assert_eq!(p.title, "Engineer");
    }

    #[test]
    fn test_text_joins_multiple_values() {
        let p: Probe = serde_json::from_str(r#"{"title": ["Berlin", "Germany"]}"#).unwrap();
        assert_eq!(p.title, "Berlin, Germany");
    }

    #[test]
    fn test_numbers_become_text() {
        let p: Probe = serde_json::from_str(r#"{"title": 80}"#).unwrap();
        assert_eq!(p.title, "80");
    }

    #[test]
    fn test_list_accepts_bare_string_and_null() {
        let p: Probe = serde_json::from_str(r#"{"tags": "software"}"#).unwrap();
        assert_eq!(p.tags, vec!["software"]);

        let p: Probe = serde_json::from_str(r#"{"tags": null, "title": null}"#).unwrap();
        assert!(p.tags.is_empty());
        assert!(p.title.is_empty());
    }
}
