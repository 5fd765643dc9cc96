//! Structured logging field name constants for roster-link.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query the same field names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and the caller sees an error |
//! | WARN  | Recoverable issue, input ignored or fallback applied |
//! | INFO  | Lifecycle events (startup, config loaded), command completions |
//! | DEBUG | Decision points, per-call summaries (index sizes, match counts) |
//! | TRACE | Per-item iteration (individual records, suppressed tokens) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "link", "db", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "indexer", "scanner", "memory_store", "catalog"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "build_tables", "scan", "query", "peek"
pub const OPERATION: &str = "op";

/// Collection name a record source reads from.
pub const COLLECTION: &str = "collection";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records offered to an operation.
pub const RECORD_COUNT: &str = "record_count";

/// Number of records skipped (no resolvable URL).
pub const SKIPPED_COUNT: &str = "skipped_count";

/// Number of distinct alias keys in the alias table.
pub const ALIAS_COUNT: &str = "alias_count";

/// Number of structured IDs in the ID table.
pub const ID_COUNT: &str = "id_count";

/// Number of structured IDs resolved from text.
pub const ID_MATCHES: &str = "id_matches";

/// Number of names resolved from text.
pub const NAME_MATCHES: &str = "name_matches";

/// Number of ambiguous single tokens suppressed by policy.
pub const SUPPRESSED_COUNT: &str = "suppressed_count";

/// Byte length of scanned text.
pub const TEXT_LEN: &str = "text_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
