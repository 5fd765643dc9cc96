//! In-memory record store implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

use roster_core::{
    defaults, metadata_of, scalar_to_string, Error, QueryResult, RecordFilter, RecordSource,
    Result,
};

/// In-memory implementation of RecordSource.
///
/// Documents are kept in insertion order. Cloning shares the underlying
/// documents.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    docs: Arc<RwLock<Vec<JsonValue>>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents.
    pub fn with_documents(docs: Vec<JsonValue>) -> Self {
        Self {
            docs: Arc::new(RwLock::new(docs)),
        }
    }

    /// Load documents from a file.
    ///
    /// The file may hold a single JSON array, or one JSON document per line
    /// (blank lines ignored).
    pub async fn load_json_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let docs = parse_documents(&content)?;
        debug!(
            path = %path.display(),
            record_count = docs.len(),
            "Loaded identity documents"
        );
        Ok(Self::with_documents(docs))
    }

    /// Append a document.
    pub async fn insert(&self, doc: JsonValue) {
        self.docs.write().await.push(doc);
    }
}

/// Parse a JSON array or a JSON-lines payload into documents.
pub fn parse_documents(content: &str) -> Result<Vec<JsonValue>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return match serde_json::from_str::<JsonValue>(trimmed)? {
            JsonValue::Array(items) => Ok(items),
            _ => Err(Error::InvalidInput(
                "expected a JSON array of documents".to_string(),
            )),
        };
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).map_err(|e| {
                Error::Serialization(format!("line {}: {}", n + 1, e))
            })
        })
        .collect()
}

/// Identifier of a document: its `_id` when present, else its position.
fn document_id(doc: &JsonValue, position: usize) -> String {
    metadata_of(doc)
        .and_then(|fields| fields.get("_id").or_else(|| doc.get("_id")))
        .and_then(scalar_to_string)
        .unwrap_or_else(|| position.to_string())
}

#[async_trait]
impl RecordSource for MemoryRecordStore {
    #[instrument(
        skip(self, filter),
        fields(subsystem = "db", component = "memory_store", op = "query")
    )]
    async fn query(&self, filter: Option<&RecordFilter>, limit: usize) -> Result<QueryResult> {
        let limit = limit.min(defaults::QUERY_LIMIT);
        let docs = self.docs.read().await;

        let mut result = QueryResult::default();
        for (position, doc) in docs.iter().enumerate() {
            if result.records.len() >= limit {
                break;
            }
            if filter.is_some_and(|f| !f.matches(doc)) {
                trace!(position, "Document rejected by filter");
                continue;
            }
            result.ids.push(document_id(doc, position));
            result.records.push(doc.clone());
        }

        debug!(
            record_count = result.len(),
            filtered = filter.is_some(),
            "Query complete"
        );
        Ok(result)
    }

    async fn peek(&self, limit: usize) -> Result<Vec<JsonValue>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.docs.read().await.len())
    }
}
