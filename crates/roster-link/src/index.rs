//! Lookup tables built from a batch of identity records.
//!
//! Four tables are derived per call and discarded afterwards:
//!
//! - normalized alias -> candidate URLs
//! - normalized first name -> candidate URLs
//! - normalized surname -> candidate URLs
//! - upper-cased student ID -> URL (last record wins)
//!
//! A candidate set holds more than one URL only when distinct records that
//! resolve to different URLs share the same key. That is the ambiguity
//! signal the scanner reports.
//!
//! Alias keys are also compiled into one Aho-Corasick automaton, so a text
//! is scanned for every alias in a single pass.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use aho_corasick::AhoCorasick;
use tracing::{debug, trace, warn};

use roster_core::{IdentityRecord, UrlResolver};

use crate::aliases::generate_aliases;
use crate::normalize::{contains_phrase, is_bounded, normalize_name};

type CandidateTable = HashMap<String, BTreeSet<String>>;

/// In-memory lookup tables for one linking call.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    aliases: CandidateTable,
    first_names: CandidateTable,
    surnames: CandidateTable,
    student_ids: HashMap<String, String>,
    alias_matcher: Option<AliasMatcher>,
    indexed: usize,
    skipped: usize,
}

/// Automaton over the alias keys; pattern `i` is `keys[i]`.
#[derive(Debug, Clone)]
struct AliasMatcher {
    automaton: AhoCorasick,
    keys: Vec<String>,
}

impl AliasMatcher {
    fn compile(aliases: &CandidateTable) -> Option<Self> {
        if aliases.is_empty() {
            return None;
        }
        let mut keys: Vec<String> = aliases.keys().cloned().collect();
        keys.sort();

        match AhoCorasick::new(&keys) {
            Ok(automaton) => Some(Self { automaton, keys }),
            Err(e) => {
                warn!(
                    error = %e,
                    alias_count = keys.len(),
                    "Failed to build alias automaton, searching aliases one by one"
                );
                None
            }
        }
    }
}

/// Sizes of the lookup tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Records that added at least one table entry.
    pub indexed_records: usize,
    /// Records skipped because no URL resolved.
    pub skipped_records: usize,
    pub alias_keys: usize,
    pub first_name_keys: usize,
    pub surname_keys: usize,
    pub student_id_keys: usize,
    /// Total (key, URL) pairs across all tables.
    pub entries: usize,
}

impl LookupTables {
    /// Index a batch of records.
    ///
    /// Records whose URL does not resolve are skipped without error. Records
    /// that resolve but carry no ID or name add nothing and are not counted
    /// as indexed.
    pub fn build<R>(records: &[IdentityRecord], resolver: &R) -> Self
    where
        R: UrlResolver + ?Sized,
    {
        let start = Instant::now();
        let mut tables = Self::default();
        for record in records {
            match resolver.resolve(record).filter(|url| !url.trim().is_empty()) {
                Some(url) => {
                    if tables.insert(record, &url) {
                        tables.indexed += 1;
                    } else {
                        trace!(?record, "Record has a URL but nothing to index");
                    }
                }
                None => {
                    trace!(?record, "Record has no URL, skipping");
                    tables.skipped += 1;
                }
            }
        }
        tables.alias_matcher = AliasMatcher::compile(&tables.aliases);

        let stats = tables.stats();
        debug!(
            record_count = records.len(),
            skipped_count = stats.skipped_records,
            alias_count = stats.alias_keys,
            id_count = stats.student_id_keys,
            duration_ms = start.elapsed().as_millis() as u64,
            "Lookup tables built"
        );
        tables
    }

    /// Index one record under an already-resolved URL. Returns whether any
    /// entry was added.
    fn insert(&mut self, record: &IdentityRecord, url: &str) -> bool {
        let mut added = false;

        if let Some(student_id) = record.student_id.as_deref() {
            let key = student_id.trim().to_uppercase();
            if !key.is_empty() {
                self.student_ids.insert(key, url.to_string());
                added = true;
            }
        }

        for alias in generate_aliases(record) {
            added |= add_candidate(&mut self.aliases, normalize_name(&alias), url);
        }

        if let Some(first) = record.first_name.as_deref() {
            added |= add_candidate(&mut self.first_names, normalize_name(first), url);
        }
        if let Some(surname) = record.surname.as_deref() {
            added |= add_candidate(&mut self.surnames, normalize_name(surname), url);
        }
        added
    }

    /// Alias keys occurring as whole phrases in `lowered`, with their
    /// candidate URLs, in key order.
    ///
    /// `lowered` must already be lower-cased.
    pub fn matched_aliases<'a>(&'a self, lowered: &str) -> Vec<(&'a str, &'a BTreeSet<String>)> {
        let keys: BTreeSet<&str> = match &self.alias_matcher {
            Some(matcher) => matcher
                .automaton
                .find_overlapping_iter(lowered)
                .filter(|m| is_bounded(lowered, m.start(), m.end()))
                .map(|m| matcher.keys[m.pattern().as_usize()].as_str())
                .collect(),
            None => self
                .aliases
                .keys()
                .filter(|alias| contains_phrase(lowered, alias))
                .map(String::as_str)
                .collect(),
        };

        keys.into_iter()
            .filter_map(|key| {
                self.aliases
                    .get_key_value(key)
                    .map(|(key, urls)| (key.as_str(), urls))
            })
            .collect()
    }

    pub fn alias_urls(&self, alias: &str) -> Option<&BTreeSet<String>> {
        self.aliases.get(&normalize_name(alias))
    }

    pub fn first_name_urls(&self, first_name: &str) -> Option<&BTreeSet<String>> {
        self.first_names.get(&normalize_name(first_name))
    }

    pub fn surname_urls(&self, surname: &str) -> Option<&BTreeSet<String>> {
        self.surnames.get(&normalize_name(surname))
    }

    /// URL registered for a student ID (case-insensitive).
    pub fn student_id_url(&self, student_id: &str) -> Option<&str> {
        self.student_ids
            .get(&student_id.trim().to_uppercase())
            .map(String::as_str)
    }

    pub(crate) fn first_name_table(&self) -> &CandidateTable {
        &self.first_names
    }

    pub(crate) fn surname_table(&self) -> &CandidateTable {
        &self.surnames
    }

    pub fn stats(&self) -> TableStats {
        let pairs = |table: &CandidateTable| table.values().map(BTreeSet::len).sum::<usize>();
        TableStats {
            indexed_records: self.indexed,
            skipped_records: self.skipped,
            alias_keys: self.aliases.len(),
            first_name_keys: self.first_names.len(),
            surname_keys: self.surnames.len(),
            student_id_keys: self.student_ids.len(),
            entries: pairs(&self.aliases)
                + pairs(&self.first_names)
                + pairs(&self.surnames)
                + self.student_ids.len(),
        }
    }

    /// True when no record contributed anything.
    pub fn is_empty(&self) -> bool {
        self.stats().entries == 0
    }
}

fn add_candidate(table: &mut CandidateTable, key: String, url: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    table.entry(key).or_default().insert(url.to_string());
    true
}
