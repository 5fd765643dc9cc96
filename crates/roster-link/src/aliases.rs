//! Name-variant generation.
//!
//! From the structured name fields of a record, produce the spellings a
//! person is likely to be mentioned by in free text:
//!
//! | Fields present          | Aliases added |
//! |-------------------------|---------------|
//! | full name               | the full name, commas removed |
//! | first + surname         | `First Last`, `Last, First`, `Last First` |
//! | first + middle + surname| `First Middle Last`, `First M. Last`, `F. Last`, `Last, First M.` |
//!
//! Every alias is whitespace-collapsed and trimmed; original casing is kept.

use std::collections::BTreeSet;

use roster_core::IdentityRecord;

use crate::normalize::collapse_whitespace;

/// Generate the alias set for a record.
///
/// The set is deduplicated and never contains empty strings. It is empty
/// only when the record carries no usable name fields.
pub fn generate_aliases(record: &IdentityRecord) -> BTreeSet<String> {
    let first = field(&record.first_name);
    let middle = field(&record.middle_name);
    let surname = field(&record.surname);
    let full = record
        .full_name
        .as_deref()
        .map(|name| name.replace(',', " "))
        .unwrap_or_default();

    let mut candidates = Vec::with_capacity(8);
    candidates.push(full);

    if !first.is_empty() && !surname.is_empty() {
        candidates.push(format!("{} {}", first, surname));
        candidates.push(format!("{}, {}", surname, first));
        candidates.push(format!("{} {}", surname, first));

        if !middle.is_empty() {
            let middle_initial = leading(middle);
            candidates.push(format!("{} {} {}", first, middle, surname));
            candidates.push(format!("{} {}. {}", first, middle_initial, surname));
            candidates.push(format!("{}. {}", leading(first).to_uppercase(), surname));
            candidates.push(format!("{}, {} {}.", surname, first, middle_initial));
        }
    }

    candidates
        .iter()
        .map(|alias| collapse_whitespace(alias))
        .filter(|alias| !alias.is_empty())
        .collect()
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// First character of a non-empty string, as written.
fn leading(s: &str) -> &str {
    s.chars().next().map_or("", |c| &s[..c.len_utf8()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases_of(record: &IdentityRecord) -> Vec<String> {
        generate_aliases(record).into_iter().collect()
    }

    #[test]
    fn test_first_middle_surname_variants() {
        let record = IdentityRecord::new()
            .with_first_name("Jane")
            .with_middle_name("Q")
            .with_surname("Doe");
        let aliases = generate_aliases(&record);

        for expected in [
            "Jane Doe",
            "Doe, Jane",
            "Doe Jane",
            "Jane Q Doe",
            "Jane Q. Doe",
            "J. Doe",
            "Doe, Jane Q.",
        ] {
            assert!(aliases.contains(expected), "missing alias {:?}", expected);
        }
        assert_eq!(aliases.len(), 7);
    }

    #[test]
    fn test_first_and_surname_only() {
        let record = IdentityRecord::new().with_first_name("John").with_surname("Smith");
        assert_eq!(aliases_of(&record), vec!["John Smith", "Smith John", "Smith, John"]);
    }

    #[test]
    fn test_full_name_commas_are_stripped() {
        let record = IdentityRecord::new().with_full_name("Doe, Jane");
        assert_eq!(aliases_of(&record), vec!["Doe Jane"]);
    }

    #[test]
    fn test_full_name_deduplicates_with_generated() {
        let record = IdentityRecord::new()
            .with_full_name("John  Smith")
            .with_first_name("John")
            .with_surname("Smith");
        assert_eq!(aliases_of(&record), vec!["John Smith", "Smith John", "Smith, John"]);
    }

    #[test]
    fn test_middle_name_needs_first_and_surname() {
        let record = IdentityRecord::new().with_first_name("Jane").with_middle_name("Q");
        assert!(generate_aliases(&record).is_empty());
    }

    #[test]
    fn test_partial_record_degrades_gracefully() {
        assert!(generate_aliases(&IdentityRecord::new()).is_empty());
        assert!(generate_aliases(&IdentityRecord::new().with_surname("Doe")).is_empty());
        assert!(generate_aliases(&IdentityRecord::new().with_full_name(" , ")).is_empty());
    }

    #[test]
    fn test_multi_word_middle_name_uses_initial() {
        let record = IdentityRecord::new()
            .with_first_name("maria")
            .with_middle_name("luisa ana")
            .with_surname("Santos");
        let aliases = generate_aliases(&record);
        assert!(aliases.contains("maria luisa ana Santos"));
        assert!(aliases.contains("maria l. Santos"));
        assert!(aliases.contains("M. Santos"));
        assert!(aliases.contains("Santos, maria l."));
    }

    #[test]
    fn test_non_ascii_initials() {
        let record = IdentityRecord::new()
            .with_first_name("élodie")
            .with_middle_name("Ève")
            .with_surname("Martin");
        let aliases = generate_aliases(&record);
        assert!(aliases.contains("É. Martin"));
        assert!(aliases.contains("élodie È. Martin"));
    }

    #[test]
    fn test_deterministic() {
        let record = IdentityRecord::new()
            .with_first_name("Jane")
            .with_middle_name("Q")
            .with_surname("Doe")
            .with_full_name("Jane Quinn Doe");
        assert_eq!(generate_aliases(&record), generate_aliases(&record.clone()));
    }
}
