//! # roster-link
//!
//! Entity linking of person names and structured IDs in free text.
//!
//! Given a block of generated text and a batch of identity records, the
//! linker finds mentions of those people (full names, name variants, single
//! first names or surnames) and of their structured IDs, and maps each
//! mention to a resource URL. It runs after text generation and never feeds
//! back into it.
//!
//! This crate provides:
//! - Name-variant (alias) generation from structured name fields
//! - Per-call lookup tables over a record batch
//! - A deterministic, ambiguity-aware text scanner
//! - A default, replaceable URL strategy
//!
//! ## Example
//!
//! ```
//! use roster_link::{build_link_map, default_url_resolver, IdentityRecord, LinkTarget};
//!
//! let records = vec![IdentityRecord::new()
//!     .with_first_name("Jane")
//!     .with_surname("Doe")
//!     .with_student_id("PDM-2024-00017")];
//! let resolver = default_url_resolver("https://school.example");
//!
//! let links = build_link_map("Jane Doe (pdm-2024-00017) passed.", &records, &resolver, true);
//!
//! let url = "https://school.example/api/student_image/PDM-2024-00017";
//! assert_eq!(links.by_id["PDM-2024-00017"], url);
//! assert_eq!(links.by_name["jane doe"], LinkTarget::Single(url.to_string()));
//! ```

pub mod aliases;
pub mod config;
pub mod index;
pub mod normalize;
pub mod resolver;
pub mod scanner;

use serde_json::Value as JsonValue;
use tracing::instrument;

// Re-export core types
pub use roster_core::*;

pub use aliases::generate_aliases;
pub use config::{ConfigError, ConfigResult, LinkerConfig};
pub use index::{LookupTables, TableStats};
pub use normalize::{collapse_whitespace, contains_phrase, is_bounded, is_word_char, normalize_name};
pub use resolver::{default_url_resolver, DefaultUrlResolver};
pub use scanner::{validate_id_prefix, LinkScanner, ScanOptions};

/// Reusable linker: a compiled scanner plus its options.
///
/// A `Linker` holds no per-call state; every [`Linker::link`] call builds
/// its own lookup tables, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Linker {
    scanner: LinkScanner,
}

impl Linker {
    pub fn new(options: &ScanOptions) -> Result<Self> {
        Ok(Self {
            scanner: LinkScanner::new(options)?,
        })
    }

    /// Linker for the default ID prefix.
    pub fn with_ambiguous_single_tokens(allow: bool) -> Self {
        let options = ScanOptions::default().with_ambiguous_single_tokens(allow);
        let scanner =
            LinkScanner::new(&options).expect("default structured ID prefix must be valid");
        Self { scanner }
    }

    /// Linker for a configuration, which is validated first.
    ///
    /// An invalid configuration fails with [`Error::Config`].
    pub fn from_config(config: &LinkerConfig) -> Result<Self> {
        config.validate()?;
        Self::new(&config.scan_options())
    }

    /// Index `records` and resolve every mention in `text`.
    #[instrument(
        skip_all,
        fields(subsystem = "link", component = "linker", op = "link", record_count = records.len())
    )]
    pub fn link<R>(&self, text: &str, records: &[IdentityRecord], resolver: &R) -> LinkResult
    where
        R: UrlResolver + ?Sized,
    {
        let tables = LookupTables::build(records, resolver);
        self.scanner.scan(text, &tables)
    }

    /// Like [`Linker::link`], for raw documents as returned by a record source.
    ///
    /// Fails with [`Error::InvalidInput`] when `docs` is not a JSON array.
    pub fn link_documents<R>(&self, text: &str, docs: &JsonValue, resolver: &R) -> Result<LinkResult>
    where
        R: UrlResolver + ?Sized,
    {
        let records = records_from_json(docs)?;
        Ok(self.link(text, &records, resolver))
    }
}

/// Build the link map for `text` over `records`.
///
/// `allow_ambiguous_single_tokens` controls whether a lone first name or
/// surname shared by several people is reported with all candidates (`true`)
/// or dropped (`false`).
pub fn build_link_map<R>(
    text: &str,
    records: &[IdentityRecord],
    url_resolver: &R,
    allow_ambiguous_single_tokens: bool,
) -> LinkResult
where
    R: UrlResolver + ?Sized,
{
    Linker::with_ambiguous_single_tokens(allow_ambiguous_single_tokens).link(
        text,
        records,
        url_resolver,
    )
}

/// Build the link map from raw JSON documents.
///
/// Fails fast with [`Error::InvalidInput`] when `docs` is not an array.
pub fn build_link_map_from_json<R>(
    text: &str,
    docs: &JsonValue,
    url_resolver: &R,
    allow_ambiguous_single_tokens: bool,
) -> Result<LinkResult>
where
    R: UrlResolver + ?Sized,
{
    Linker::with_ambiguous_single_tokens(allow_ambiguous_single_tokens).link_documents(
        text,
        docs,
        url_resolver,
    )
}
