//! Record files used by store integration tests.

#![allow(dead_code)]

/// A class roster as a single JSON array.
pub const ROSTER_ARRAY: &str = r#"[
  {"_id": {"$oid": "65f0aa"}, "first_name": "John", "surname": "Smith", "section": "A"},
  {"_id": {"$oid": "65f0bb"}, "first_name": "Mary", "surname": "Smith", "section": "B"},
  {"_id": {"$oid": "65f0cc"}, "metadata": {"given_name": "Jane", "last_name": "Doe", "section": "A"}},
  {"_id": {"$oid": "65f0dd"}, "first_name": "Omar", "surname": "Haddad", "section": "C"}
]"#;

/// The same roster as JSON lines, with a blank line in the middle.
pub const ROSTER_LINES: &str = "\
{\"_id\": \"r1\", \"first_name\": \"John\", \"surname\": \"Smith\", \"section\": \"A\"}
{\"_id\": \"r2\", \"first_name\": \"Mary\", \"surname\": \"Smith\", \"section\": \"B\"}

{\"_id\": \"r3\", \"metadata\": {\"given_name\": \"Jane\", \"last_name\": \"Doe\", \"section\": \"A\"}}
{\"_id\": \"r4\", \"first_name\": \"Omar\", \"surname\": \"Haddad\", \"section\": \"C\"}
";

/// JSON lines with a malformed third line.
pub const BROKEN_LINES: &str = "\
{\"first_name\": \"John\"}
{\"first_name\": \"Mary\"}
{\"first_name\": \"Jane\"
";
