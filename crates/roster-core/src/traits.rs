//! Core traits for roster-link abstractions.
//!
//! These traits define the seams between the linker and its collaborators:
//! how a record becomes a URL, and where records come from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::IdentityRecord;
use crate::record_filter::RecordFilter;

// =============================================================================
// URL RESOLUTION
// =============================================================================

/// Strategy turning an identity record into a resource URL.
///
/// Returning `None` (or an empty string) marks the record as unlinkable; the
/// indexer skips it entirely.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, record: &IdentityRecord) -> Option<String>;
}

impl<T: UrlResolver + ?Sized> UrlResolver for &T {
    fn resolve(&self, record: &IdentityRecord) -> Option<String> {
        (**self).resolve(record)
    }
}

impl<T: UrlResolver + ?Sized> UrlResolver for Box<T> {
    fn resolve(&self, record: &IdentityRecord) -> Option<String> {
        (**self).resolve(record)
    }
}

// =============================================================================
// RECORD SOURCES
// =============================================================================

/// Result of a record-source query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Document identifiers, parallel to `records`.
    pub ids: Vec<String>,
    /// Raw documents as stored.
    pub records: Vec<JsonValue>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize every returned document into a canonical record.
    pub fn identities(&self) -> Vec<IdentityRecord> {
        self.records.iter().map(IdentityRecord::from_document).collect()
    }
}

/// A collection of identity documents.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Return up to `limit` documents matching `filter`.
    async fn query(&self, filter: Option<&RecordFilter>, limit: usize) -> Result<QueryResult>;

    /// Return a small sample of documents.
    async fn peek(&self, limit: usize) -> Result<Vec<JsonValue>>;

    /// Total number of documents.
    async fn count(&self) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StudentIdOnly;

    impl UrlResolver for StudentIdOnly {
        fn resolve(&self, record: &IdentityRecord) -> Option<String> {
            record.student_id.as_ref().map(|id| format!("/img/{}", id))
        }
    }

    #[test]
    fn test_resolver_through_references_and_boxes() {
        let record = IdentityRecord::new().with_student_id("PDM-2024-00001");
        let direct = StudentIdOnly;
        let boxed: Box<dyn UrlResolver> = Box::new(StudentIdOnly);

        assert_eq!(direct.resolve(&record).as_deref(), Some("/img/PDM-2024-00001"));
        assert_eq!((&direct).resolve(&record), direct.resolve(&record));
        assert_eq!(boxed.resolve(&record), direct.resolve(&record));
        assert_eq!(direct.resolve(&IdentityRecord::new()), None);
    }

    #[test]
    fn test_query_result_identities() {
        let result = QueryResult {
            ids: vec!["a".into(), "b".into()],
            records: vec![
                json!({"first_name": "Jane", "surname": "Doe"}),
                json!({"metadata": {"given_name": "Ann"}}),
            ],
        };
        let identities = result.identities();
        assert_eq!(result.len(), 2);
        assert_eq!(identities[0].surname.as_deref(), Some("Doe"));
        assert_eq!(identities[1].first_name.as_deref(), Some("Ann"));
    }
}
