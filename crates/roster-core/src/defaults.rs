//! Centralized default constants for roster-link.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates and the CLI reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// STRUCTURED IDS
// =============================================================================

/// Default prefix of structured identifiers (`PDM-2024-00017`).
pub const ID_PREFIX: &str = "PDM";

/// Width of the first digit group of a structured identifier.
pub const ID_YEAR_DIGITS: usize = 4;

/// Width of the second digit group of a structured identifier.
pub const ID_SERIAL_DIGITS: usize = 5;

// =============================================================================
// LINKING
// =============================================================================

/// Whether ambiguous single-token names are emitted by default.
pub const ALLOW_AMBIGUOUS_SINGLE_TOKENS: bool = true;

/// Base URL used when none is configured.
pub const BASE_URL: &str = "http://localhost:8000";

/// Route for images keyed by student ID.
pub const IMAGE_ROUTE: &str = "/api/student_image";

/// Route segment for images keyed by internal record ID.
pub const IMAGE_BY_OID_SEGMENT: &str = "by_oid";

/// Route segment for images keyed by name.
pub const IMAGE_BY_NAME_SEGMENT: &str = "by_name";

// =============================================================================
// RECORD SOURCES
// =============================================================================

/// Maximum records returned by a single query.
pub const QUERY_LIMIT: usize = 1000;

/// Default sample size for `peek`.
pub const PEEK_LIMIT: usize = 3;

/// Default collection read by the linker.
pub const COLLECTION: &str = "students";

// =============================================================================
// LOGGING
// =============================================================================

/// Default `RUST_LOG` filter for the CLI.
pub const LOG_FILTER: &str = "roster_link=info,roster_db=info";
