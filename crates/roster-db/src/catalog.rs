//! Named collections of identity records.
//!
//! A catalog maps collection names (`students`, `faculty`, ...) to record
//! sources and restricts reads to an allow-list. Records leave the catalog
//! already normalized into [`IdentityRecord`]s.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use roster_core::{defaults, Error, IdentityRecord, RecordFilter, RecordSource, Result};

/// Registry of named record sources.
#[derive(Clone, Default)]
pub struct RecordCatalog {
    sources: BTreeMap<String, Arc<dyn RecordSource>>,
    allowed: Vec<String>,
}

impl RecordCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under `name`. Registered names are readable until
    /// an explicit allow-list is set.
    pub fn with_source(mut self, name: impl Into<String>, source: Arc<dyn RecordSource>) -> Self {
        self.sources.insert(name.into(), source);
        self
    }

    /// Restrict reads to the named collections, in the given order.
    pub fn allow_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = names.into_iter().map(Into::into).collect();
        self
    }

    /// Collections a read will visit.
    pub fn allowed_collections(&self) -> Vec<&str> {
        if self.allowed.is_empty() {
            self.sources.keys().map(String::as_str).collect()
        } else {
            self.allowed.iter().map(String::as_str).collect()
        }
    }

    /// Look up a registered source.
    pub fn source(&self, name: &str) -> Result<&Arc<dyn RecordSource>> {
        self.sources
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("collection {}", name)))
    }

    /// Total document count over the allowed collections.
    pub async fn count(&self) -> Result<usize> {
        let mut total = 0;
        for name in self.allowed_collections() {
            total += self.source(name)?.count().await?;
        }
        Ok(total)
    }

    /// Gather identity records from every allowed collection.
    ///
    /// `limit` bounds the total number of records returned and is capped at
    /// the per-query maximum.
    #[instrument(
        skip(self, filter),
        fields(subsystem = "db", component = "catalog", op = "collect_identities")
    )]
    pub async fn collect_identities(
        &self,
        filter: Option<&RecordFilter>,
        limit: usize,
    ) -> Result<Vec<IdentityRecord>> {
        let mut remaining = limit.min(defaults::QUERY_LIMIT);
        let mut identities = Vec::new();

        for name in self.allowed_collections() {
            if remaining == 0 {
                break;
            }
            let source = match self.source(name) {
                Ok(source) => source,
                Err(e) => {
                    warn!(collection = name, error = %e, "Allowed collection is not registered");
                    return Err(e);
                }
            };

            let result = source.query(filter, remaining).await?;
            remaining = remaining.saturating_sub(result.len());
            debug!(
                collection = name,
                record_count = result.len(),
                "Collected identity records"
            );
            identities.extend(result.identities());
        }

        Ok(identities)
    }
}
