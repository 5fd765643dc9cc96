//! # roster-db
//!
//! Identity-record sources for roster-link.
//!
//! This crate provides:
//! - An in-memory record store loadable from JSON or JSON-lines files
//! - Filtered queries, sampling (`peek`), and counts over a collection
//! - A catalog of named collections with an allow-list
//!
//! ## Example
//!
//! ```rust,ignore
//! use roster_db::{MemoryRecordStore, RecordCatalog};
//! use std::sync::Arc;
//!
//! let students = MemoryRecordStore::load_json_file(Path::new("students.json")).await?;
//! let catalog = RecordCatalog::new()
//!     .with_source("students", Arc::new(students))
//!     .allow_only(["students"]);
//!
//! let identities = catalog.collect_identities(None, 1000).await?;
//! ```

pub mod catalog;
pub mod store;

// Re-export core types
pub use roster_core::*;

pub use catalog::RecordCatalog;
pub use store::{parse_documents, MemoryRecordStore};
