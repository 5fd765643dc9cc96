//! # roster-core
//!
//! Core types, traits, and abstractions for roster-link.
//!
//! This crate provides the canonical identity record, the link result shape,
//! and the trait seams (URL resolution, record sources) that the other
//! roster-link crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod record_filter;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    metadata_of, records_from_json, scalar_to_string, IdentityRecord, LinkResult, LinkTarget,
    METADATA_KEY,
};
pub use record_filter::RecordFilter;
pub use traits::{QueryResult, RecordSource, UrlResolver};
