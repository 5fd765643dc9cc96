//! Record filters for identity-record sources.
//!
//! A small, typed model of the document-store query operators callers use to
//! narrow a record batch before linking:
//!
//! - `{"field": value}` / `{"field": {"$eq": value}}` - equality
//! - `{"field": {"$ne": value}}` - inequality
//! - `{"field": {"$in": [..]}}` / `{"field": {"$nin": [..]}}` - membership
//! - `{"$or": [..]}` / `{"$and": [..]}` - composition
//!
//! Several keys in one object combine with AND.
//!
//! # Example
//!
//! ```
//! use roster_core::RecordFilter;
//! use serde_json::json;
//!
//! let filter = RecordFilter::from_json(&json!({
//!     "$or": [
//!         {"surname": "Doe"},
//!         {"student_id": {"$in": ["PDM-2024-00017", "PDM-2024-00018"]}}
//!     ]
//! }))
//! .unwrap();
//!
//! assert!(filter.matches(&json!({"surname": "Doe"})));
//! assert!(!filter.matches(&json!({"surname": "Smith"})));
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::models::metadata_of;

/// Filter over raw identity documents.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    /// Field equals value.
    Eq(String, JsonValue),
    /// Field is absent or differs from value.
    Ne(String, JsonValue),
    /// Field equals one of the values.
    In(String, Vec<JsonValue>),
    /// Field is absent or equals none of the values.
    NotIn(String, Vec<JsonValue>),
    /// Every sub-filter matches. An empty list matches everything.
    And(Vec<RecordFilter>),
    /// At least one sub-filter matches. An empty list matches nothing.
    Or(Vec<RecordFilter>),
}

impl RecordFilter {
    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Shorthand for a membership filter.
    pub fn one_of<V: Into<JsonValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    /// Parse a filter from its JSON form.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidInput("record filter must be a JSON object".to_string())
        })?;
        let mut clauses = Self::parse_object(object)?;
        if clauses.len() == 1 {
            Ok(clauses.remove(0))
        } else {
            Ok(Self::And(clauses))
        }
    }

    fn parse_object(object: &Map<String, JsonValue>) -> Result<Vec<Self>> {
        let mut clauses = Vec::with_capacity(object.len());
        for (key, value) in object {
            let clause = match key.as_str() {
                "$or" => Self::Or(Self::parse_list(key, value)?),
                "$and" => Self::And(Self::parse_list(key, value)?),
                op if op.starts_with('$') => {
                    return Err(Error::InvalidInput(format!(
                        "unsupported top-level operator: {}",
                        op
                    )));
                }
                field => Self::parse_field(field, value)?,
            };
            clauses.push(clause);
        }
        Ok(clauses)
    }

    fn parse_list(op: &str, value: &JsonValue) -> Result<Vec<Self>> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::InvalidInput(format!("{} expects an array", op)))?;
        items.iter().map(Self::from_json).collect()
    }

    fn parse_field(field: &str, value: &JsonValue) -> Result<Self> {
        let operators = match value {
            JsonValue::Object(map) if map.keys().any(|k| k.starts_with('$')) => map,
            _ => return Ok(Self::Eq(field.to_string(), value.clone())),
        };

        let mut clauses = Vec::with_capacity(operators.len());
        for (op, operand) in operators {
            let clause = match op.as_str() {
                "$eq" => Self::Eq(field.to_string(), operand.clone()),
                "$ne" => Self::Ne(field.to_string(), operand.clone()),
                "$in" => Self::In(field.to_string(), Self::operand_list(op, operand)?),
                "$nin" => Self::NotIn(field.to_string(), Self::operand_list(op, operand)?),
                other => {
                    return Err(Error::InvalidInput(format!(
                        "unsupported operator {} on field {}",
                        other, field
                    )));
                }
            };
            clauses.push(clause);
        }

        if clauses.len() == 1 {
            Ok(clauses.remove(0))
        } else {
            Ok(Self::And(clauses))
        }
    }

    fn operand_list(op: &str, operand: &JsonValue) -> Result<Vec<JsonValue>> {
        operand
            .as_array()
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("{} expects an array", op)))
    }

    /// Evaluate the filter against a raw document.
    ///
    /// Fields are looked up inside `metadata` when the document wraps one.
    pub fn matches(&self, doc: &JsonValue) -> bool {
        let fields = match metadata_of(doc) {
            Some(fields) => fields,
            None => return false,
        };
        self.matches_fields(fields)
    }

    fn matches_fields(&self, fields: &Map<String, JsonValue>) -> bool {
        match self {
            Self::Eq(field, value) => fields.get(field) == Some(value),
            Self::Ne(field, value) => fields.get(field) != Some(value),
            Self::In(field, values) => fields
                .get(field)
                .is_some_and(|actual| values.contains(actual)),
            Self::NotIn(field, values) => fields
                .get(field)
                .map_or(true, |actual| !values.contains(actual)),
            Self::And(clauses) => clauses.iter().all(|c| c.matches_fields(fields)),
            Self::Or(clauses) => clauses.iter().any(|c| c.matches_fields(fields)),
        }
    }
}
