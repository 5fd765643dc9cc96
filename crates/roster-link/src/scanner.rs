//! Text scanning and resolution against lookup tables.
//!
//! Passes run in a fixed order:
//!
//! 1. Structured IDs (`PDM-2024-00017`), case-insensitive
//! 2. Aliases, matched as whole phrases in the lower-cased text
//! 3. Single tokens against the first-name table, then the surname table
//!
//! Every pass uses the same word boundary (see [`is_bounded`]): a match may
//! not touch a letter, digit or `_` on either side. A key recorded by an
//! earlier pass is never overwritten by a later one.

use std::collections::BTreeSet;
use std::time::Instant;

use regex::Regex;
use tracing::{debug, trace};

use roster_core::{defaults, Error, LinkResult, LinkTarget, Result};

use crate::index::LookupTables;
use crate::normalize::is_bounded;

/// Runs of letters. Boundaries are checked separately.
const TOKEN_PATTERN: &str = r"[^\W\d_]+";

/// Scanner options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Prefix of structured IDs, e.g. `PDM`.
    pub id_prefix: String,
    /// Emit single-token matches that resolve to several URLs.
    pub allow_ambiguous_single_tokens: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            id_prefix: defaults::ID_PREFIX.to_string(),
            allow_ambiguous_single_tokens: defaults::ALLOW_AMBIGUOUS_SINGLE_TOKENS,
        }
    }
}

impl ScanOptions {
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_ambiguous_single_tokens(mut self, allow: bool) -> Self {
        self.allow_ambiguous_single_tokens = allow;
        self
    }
}

/// Check that a structured-ID prefix is usable.
pub fn validate_id_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(Error::InvalidInput("ID prefix cannot be empty".to_string()));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidInput(format!(
            "ID prefix must be ASCII letters or digits, got: {}",
            prefix
        )));
    }
    Ok(())
}

/// Compiled scanner. Holds no state between scans.
#[derive(Debug, Clone)]
pub struct LinkScanner {
    id_pattern: Regex,
    token_pattern: Regex,
    allow_ambiguous_single_tokens: bool,
}

impl LinkScanner {
    pub fn new(options: &ScanOptions) -> Result<Self> {
        validate_id_prefix(&options.id_prefix)?;

        let id_pattern = Regex::new(&format!(
            r"(?i){}-\d{{{}}}-\d{{{}}}",
            regex::escape(&options.id_prefix),
            defaults::ID_YEAR_DIGITS,
            defaults::ID_SERIAL_DIGITS
        ))
        .map_err(|e| Error::Internal(format!("Failed to compile ID pattern: {}", e)))?;
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::Internal(format!("Failed to compile token pattern: {}", e)))?;

        Ok(Self {
            id_pattern,
            token_pattern,
            allow_ambiguous_single_tokens: options.allow_ambiguous_single_tokens,
        })
    }

    /// Structured IDs mentioned in `text`, upper-cased and deduplicated.
    pub fn extract_ids(&self, text: &str) -> BTreeSet<String> {
        self.id_pattern
            .find_iter(text)
            .filter(|m| is_bounded(text, m.start(), m.end()))
            .map(|m| m.as_str().to_uppercase())
            .collect()
    }

    /// Distinct lower-cased letter tokens of `text`.
    pub fn tokenize<'t>(&self, lowered: &'t str) -> BTreeSet<&'t str> {
        self.token_pattern
            .find_iter(lowered)
            .filter(|m| is_bounded(lowered, m.start(), m.end()))
            .map(|m| m.as_str())
            .collect()
    }

    /// Resolve every mention in `text` against `tables`.
    pub fn scan(&self, text: &str, tables: &LookupTables) -> LinkResult {
        let mut result = LinkResult::default();
        if text.is_empty() {
            return result;
        }
        let start = Instant::now();
        let lowered = text.to_lowercase();

        for id in self.extract_ids(text) {
            if let Some(url) = tables.student_id_url(&id) {
                result.by_id.insert(id, url.to_string());
            }
        }

        for (alias, urls) in tables.matched_aliases(&lowered) {
            result
                .by_name
                .insert(alias.to_string(), LinkTarget::from_candidates(urls));
        }
        let alias_matches = result.by_name.len();

        let mut suppressed = 0usize;
        for token in self.tokenize(&lowered) {
            // First-name table is consulted first and keeps the slot.
            for table in [tables.first_name_table(), tables.surname_table()] {
                if result.by_name.contains_key(token) {
                    break;
                }
                let Some(urls) = table.get(token) else {
                    continue;
                };
                if urls.len() == 1 || self.allow_ambiguous_single_tokens {
                    result
                        .by_name
                        .insert(token.to_string(), LinkTarget::from_candidates(urls));
                } else {
                    trace!(token, candidates = urls.len(), "Suppressed ambiguous token");
                    suppressed += 1;
                }
            }
        }

        debug!(
            text_len = text.len(),
            id_matches = result.by_id.len(),
            name_matches = result.by_name.len(),
            alias_matches,
            suppressed_count = suppressed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Scan complete"
        );
        result
    }
}
