//! Default URL resolution strategy.
//!
//! ## Resolution Order
//!
//! 1. Student ID: `{base}/api/student_image/{student_id}`
//! 2. Internal record ID: `{base}/api/student_image/by_oid/{record_id}`
//! 3. Full name, else `first surname`: `{base}/api/student_image/by_name/{name}`
//!    with whitespace runs encoded as `%20`
//! 4. Otherwise the record is unlinkable

use roster_core::{defaults, IdentityRecord, UrlResolver};

/// Route-based resolver used when callers do not supply their own strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultUrlResolver {
    base_url: String,
    image_route: String,
}

/// Build the default resolver for `base_url`.
///
/// A trailing `/` on the base URL is ignored.
pub fn default_url_resolver(base_url: &str) -> DefaultUrlResolver {
    DefaultUrlResolver::new(base_url)
}

impl DefaultUrlResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            image_route: defaults::IMAGE_ROUTE.to_string(),
        }
    }

    /// Serve images from a different route (e.g. `/media/photos`).
    pub fn with_image_route(mut self, route: &str) -> Self {
        let route = route.trim_end_matches('/');
        self.image_route = if route.starts_with('/') || route.is_empty() {
            route.to_string()
        } else {
            format!("/{}", route)
        };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn route(&self, tail: &str) -> String {
        format!("{}{}/{}", self.base_url, self.image_route, tail)
    }
}

impl UrlResolver for DefaultUrlResolver {
    fn resolve(&self, record: &IdentityRecord) -> Option<String> {
        if let Some(student_id) = present(&record.student_id) {
            return Some(self.route(student_id));
        }

        if let Some(record_id) = present(&record.record_id) {
            return Some(self.route(&format!(
                "{}/{}",
                defaults::IMAGE_BY_OID_SEGMENT,
                record_id
            )));
        }

        let name = match present(&record.full_name) {
            Some(full) => full.to_string(),
            None => format!(
                "{} {}",
                present(&record.first_name).unwrap_or(""),
                present(&record.surname).unwrap_or("")
            ),
        };
        let encoded = name.split_whitespace().collect::<Vec<_>>().join("%20");
        if encoded.is_empty() {
            return None;
        }

        Some(self.route(&format!(
            "{}/{}",
            defaults::IMAGE_BY_NAME_SEGMENT,
            encoded
        )))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://school.example";

    #[test]
    fn test_student_id_wins() {
        let resolver = default_url_resolver(BASE);
        let record = IdentityRecord::new()
            .with_student_id("PDM-2024-00017")
            .with_record_id("65f0")
            .with_full_name("Jane Doe");
        assert_eq!(
            resolver.resolve(&record).as_deref(),
            Some("https://school.example/api/student_image/PDM-2024-00017")
        );
    }

    #[test]
    fn test_record_id_fallback() {
        let resolver = default_url_resolver(BASE);
        let record = IdentityRecord::new().with_record_id("65f0c0ffee").with_full_name("Jane Doe");
        assert_eq!(
            resolver.resolve(&record).as_deref(),
            Some("https://school.example/api/student_image/by_oid/65f0c0ffee")
        );
    }

    #[test]
    fn test_full_name_is_percent_encoded() {
        let resolver = default_url_resolver(BASE);
        let record = IdentityRecord::new().with_full_name("Jane  Quinn Doe");
        assert_eq!(
            resolver.resolve(&record).as_deref(),
            Some("https://school.example/api/student_image/by_name/Jane%20Quinn%20Doe")
        );
    }

    #[test]
    fn test_first_and_surname_fallback() {
        let resolver = default_url_resolver(BASE);
        let both = IdentityRecord::new().with_first_name("Jane").with_surname("Doe");
        assert_eq!(
            resolver.resolve(&both).as_deref(),
            Some("https://school.example/api/student_image/by_name/Jane%20Doe")
        );

        let surname_only = IdentityRecord::new().with_surname("Doe");
        assert_eq!(
            resolver.resolve(&surname_only).as_deref(),
            Some("https://school.example/api/student_image/by_name/Doe")
        );
    }

    #[test]
    fn test_unlinkable_record() {
        let resolver = default_url_resolver(BASE);
        assert_eq!(resolver.resolve(&IdentityRecord::new()), None);
        assert_eq!(
            resolver.resolve(&IdentityRecord::new().with_middle_name("Q")),
            None
        );
    }

    #[test]
    fn test_trailing_slash_and_custom_route() {
        let resolver = default_url_resolver("http://localhost:8000/").with_image_route("media/");
        assert_eq!(resolver.base_url(), "http://localhost:8000");
        let record = IdentityRecord::new().with_student_id("PDM-2024-00001");
        assert_eq!(
            resolver.resolve(&record).as_deref(),
            Some("http://localhost:8000/media/PDM-2024-00001")
        );
    }
}
