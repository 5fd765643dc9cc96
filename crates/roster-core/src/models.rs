//! Canonical data types shared across roster-link crates.
//!
//! Raw documents coming out of a record source can spell the same field in
//! several ways (`first_name` / `given_name`, `surname` / `last_name`) and may
//! wrap everything in a `metadata` sub-object. [`IdentityRecord::from_document`]
//! is the one place that knows about that variance; everything downstream
//! works with the canonical struct.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

// =============================================================================
// IDENTITY RECORD
// =============================================================================

/// Field names accepted for the first name, in priority order.
const FIRST_NAME_KEYS: &[&str] = &["first_name", "given_name"];
/// Field names accepted for the surname, in priority order.
const SURNAME_KEYS: &[&str] = &["surname", "last_name"];
/// Field names accepted for the internal record identifier, in priority order.
const RECORD_ID_KEYS: &[&str] = &["_id", "record_id"];

/// Name of the sub-object some documents nest their fields under.
pub const METADATA_KEY: &str = "metadata";

/// A person known to the linker.
///
/// Every field is optional. Missing fields shrink the set of aliases and
/// index entries a record contributes; they never cause an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Stable external identifier (e.g. `PDM-2024-00017`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Internal identifier assigned by the record store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl IdentityRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = non_blank(value.into());
        self
    }

    pub fn with_middle_name(mut self, value: impl Into<String>) -> Self {
        self.middle_name = non_blank(value.into());
        self
    }

    pub fn with_surname(mut self, value: impl Into<String>) -> Self {
        self.surname = non_blank(value.into());
        self
    }

    pub fn with_full_name(mut self, value: impl Into<String>) -> Self {
        self.full_name = non_blank(value.into());
        self
    }

    pub fn with_student_id(mut self, value: impl Into<String>) -> Self {
        self.student_id = non_blank(value.into());
        self
    }

    pub fn with_record_id(mut self, value: impl Into<String>) -> Self {
        self.record_id = non_blank(value.into());
        self
    }

    /// Normalize a raw document into a canonical record.
    ///
    /// Documents that carry a `metadata` object are read from that object;
    /// anything that is not a JSON object yields an empty record.
    pub fn from_document(doc: &JsonValue) -> Self {
        match metadata_of(doc) {
            Some(fields) => Self::from_fields(fields),
            None => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, JsonValue>) -> Self {
        Self {
            first_name: first_present(fields, FIRST_NAME_KEYS),
            middle_name: first_present(fields, &["middle_name"]),
            surname: first_present(fields, SURNAME_KEYS),
            full_name: first_present(fields, &["full_name"]),
            student_id: first_present(fields, &["student_id"]),
            record_id: first_present(fields, RECORD_ID_KEYS),
        }
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_name.is_none()
            && self.surname.is_none()
            && self.full_name.is_none()
            && self.student_id.is_none()
            && self.record_id.is_none()
    }
}

/// Return the field map of a document, unwrapping `metadata` when present.
///
/// Returns `None` for non-object documents.
pub fn metadata_of(doc: &JsonValue) -> Option<&Map<String, JsonValue>> {
    let outer = doc.as_object()?;
    match outer.get(METADATA_KEY) {
        Some(JsonValue::Object(inner)) => Some(inner),
        _ => Some(outer),
    }
}

/// Convert a batch of raw documents into canonical records.
///
/// `null` is treated as an empty batch. Any other non-array value is a
/// contract violation and fails fast.
pub fn records_from_json(docs: &JsonValue) -> Result<Vec<IdentityRecord>> {
    match docs {
        JsonValue::Array(items) => Ok(items.iter().map(IdentityRecord::from_document).collect()),
        JsonValue::Null => Ok(Vec::new()),
        other => Err(Error::InvalidInput(format!(
            "identity records must be a JSON array, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// First key whose value renders to a non-blank string.
fn first_present(fields: &Map<String, JsonValue>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(scalar_to_string)
}

/// Render a scalar JSON value as a trimmed, non-empty string.
///
/// Handles the extended-JSON `{"$oid": "..."}` shape used for object IDs.
pub fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => non_blank(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Object(map) => map.get("$oid").and_then(scalar_to_string),
        JsonValue::Null | JsonValue::Array(_) => None,
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// LINK RESULT
// =============================================================================

/// Resolution of a matched name: one URL, or every candidate when ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkTarget {
    Single(String),
    Ambiguous(Vec<String>),
}

impl LinkTarget {
    /// Build a target from a candidate set.
    ///
    /// A one-element set yields [`LinkTarget::Single`]; anything else yields
    /// the sorted candidates.
    pub fn from_candidates(urls: &BTreeSet<String>) -> Self {
        let mut iter = urls.iter();
        match (iter.next(), iter.next()) {
            (Some(only), None) => Self::Single(only.clone()),
            _ => Self::Ambiguous(urls.iter().cloned().collect()),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// Output of a link-map build.
///
/// `by_id` keys are upper-cased structured IDs; `by_name` keys are
/// normalized (lower-cased, whitespace-collapsed) aliases or tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    pub by_id: BTreeMap<String, String>,
    pub by_name: BTreeMap<String, LinkTarget>,
}

impl LinkResult {
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_name.is_empty()
    }

    /// Total number of entries across both maps.
    pub fn len(&self) -> usize {
        self.by_id.len() + self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_document_reads_flat_fields() {
        let record = IdentityRecord::from_document(&json!({
            "first_name": "Jane",
            "middle_name": "Q",
            "surname": "Doe",
            "student_id": "PDM-2024-00017"
        }));
        assert_eq!(record.first_name.as_deref(), Some("Jane"));
        assert_eq!(record.middle_name.as_deref(), Some("Q"));
        assert_eq!(record.surname.as_deref(), Some("Doe"));
        assert_eq!(record.student_id.as_deref(), Some("PDM-2024-00017"));
        assert_eq!(record.record_id, None);
    }

    #[test]
    fn test_from_document_unwraps_metadata() {
        let record = IdentityRecord::from_document(&json!({
            "id": "ignored",
            "metadata": { "given_name": "Ann", "last_name": "Lee" }
        }));
        assert_eq!(record.first_name.as_deref(), Some("Ann"));
        assert_eq!(record.surname.as_deref(), Some("Lee"));
    }

    #[test]
    fn test_from_document_non_object_metadata_is_ignored() {
        let record = IdentityRecord::from_document(&json!({
            "metadata": "not a map",
            "first_name": "Ann"
        }));
        assert_eq!(record.first_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_blank_primary_key_falls_back() {
        let record = IdentityRecord::from_document(&json!({
            "first_name": "   ",
            "given_name": "Maria",
            "surname": "",
            "last_name": "Santos"
        }));
        assert_eq!(record.first_name.as_deref(), Some("Maria"));
        assert_eq!(record.surname.as_deref(), Some("Santos"));
    }

    #[test]
    fn test_values_are_trimmed_and_stringified() {
        let record = IdentityRecord::from_document(&json!({
            "first_name": "  Jose ",
            "student_id": 12345,
            "_id": { "$oid": "65f0c0ffee" }
        }));
        assert_eq!(record.first_name.as_deref(), Some("Jose"));
        assert_eq!(record.student_id.as_deref(), Some("12345"));
        assert_eq!(record.record_id.as_deref(), Some("65f0c0ffee"));
    }

    #[test]
    fn test_non_object_document_is_empty() {
        assert!(IdentityRecord::from_document(&json!("Jane Doe")).is_empty());
        assert!(IdentityRecord::from_document(&json!(42)).is_empty());
        assert!(IdentityRecord::from_document(&json!(null)).is_empty());
    }

    #[test]
    fn test_records_from_json_rejects_non_array() {
        let err = records_from_json(&json!({"first_name": "Jane"})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_records_from_json_null_is_empty() {
        assert!(records_from_json(&JsonValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_records_from_json_keeps_positions() {
        let records = records_from_json(&json!([{"first_name": "A"}, 7, {"surname": "B"}])).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].is_empty());
    }

    #[test]
    fn test_builder_drops_blank_values() {
        let record = IdentityRecord::new().with_first_name(" ").with_surname(" Doe ");
        assert_eq!(record.first_name, None);
        assert_eq!(record.surname.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_link_target_from_candidates() {
        let one: BTreeSet<String> = ["u1".to_string()].into_iter().collect();
        assert_eq!(LinkTarget::from_candidates(&one), LinkTarget::Single("u1".into()));

        let two: BTreeSet<String> = ["u2".to_string(), "u1".to_string()].into_iter().collect();
        let target = LinkTarget::from_candidates(&two);
        assert!(target.is_ambiguous());
        assert_eq!(target, LinkTarget::Ambiguous(vec!["u1".into(), "u2".into()]));
    }

    #[test]
    fn test_link_result_wire_shape() {
        let mut result = LinkResult::default();
        result
            .by_id
            .insert("PDM-2024-00017".into(), "http://x/api/student_image/PDM-2024-00017".into());
        result
            .by_name
            .insert("jane doe".into(), LinkTarget::Single("http://x/a".into()));
        result.by_name.insert(
            "smith".into(),
            LinkTarget::Ambiguous(vec!["http://x/b".into(), "http://x/c".into()]),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "by_id": {"PDM-2024-00017": "http://x/api/student_image/PDM-2024-00017"},
                "by_name": {
                    "jane doe": "http://x/a",
                    "smith": ["http://x/b", "http://x/c"]
                }
            })
        );

        let back: LinkResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.len(), 3);
    }
}
