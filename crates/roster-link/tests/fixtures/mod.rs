//! Test fixtures for link-map integration tests.
//!
//! Provides a small class roster and texts that mention its members.

#![allow(dead_code)]

use roster_link::IdentityRecord;
use serde_json::{json, Value as JsonValue};

pub const BASE_URL: &str = "https://school.example";

/// Image URL the default resolver produces for a student ID.
pub fn image_url(student_id: &str) -> String {
    format!("{}/api/student_image/{}", BASE_URL, student_id)
}

/// Two people sharing the surname Smith.
pub mod smiths {
    pub const JOHN_ID: &str = "PDM-2024-00001";
    pub const MARY_ID: &str = "PDM-2024-00002";

    pub const TEXT_SURNAME_ONLY: &str = "Smith handed in the report on time.";
    pub const TEXT_FULL_AND_SURNAME: &str = "John Smith met Smith after class.";
}

/// One person with a middle name.
pub mod jane {
    pub const ID: &str = "PDM-2024-00017";
    pub const RECORD_ID: &str = "65f0c0ffee";

    pub const TEXT: &str = "Doe, Jane Q. (pdm-2024-00017) led the robotics club.";
}

pub fn john_smith() -> IdentityRecord {
    IdentityRecord::new()
        .with_first_name("John")
        .with_surname("Smith")
        .with_student_id(smiths::JOHN_ID)
}

pub fn mary_smith() -> IdentityRecord {
    IdentityRecord::new()
        .with_first_name("Mary")
        .with_surname("Smith")
        .with_student_id(smiths::MARY_ID)
}

pub fn jane_doe() -> IdentityRecord {
    IdentityRecord::new()
        .with_first_name("Jane")
        .with_middle_name("Q")
        .with_surname("Doe")
        .with_student_id(jane::ID)
}

pub fn ann_lee() -> IdentityRecord {
    IdentityRecord::new()
        .with_first_name("Ann")
        .with_surname("Lee")
        .with_student_id("PDM-2023-00450")
}

/// The same roster as raw documents, in the shapes record sources return.
pub fn roster_documents() -> JsonValue {
    json!([
        {
            "_id": {"$oid": "65f0aa"},
            "first_name": "John",
            "surname": "Smith",
            "student_id": "PDM-2024-00001",
            "section": "A"
        },
        {
            "metadata": {
                "given_name": "Mary",
                "last_name": "Smith",
                "student_id": "PDM-2024-00002",
                "section": "B"
            }
        },
        {
            "first_name": "Jane",
            "middle_name": "Q",
            "surname": "Doe",
            "student_id": "PDM-2024-00017",
            "section": "A"
        }
    ])
}
