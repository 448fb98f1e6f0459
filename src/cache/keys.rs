//! Cache key composition.
//!
//! Keys are opaque strings composed by callers; the keyspace carries no
//! schema version, so a shape change surfaces as a decode miss on read.

use crate::domain::language::Language;

/// Fixed key of the all-posts summary collection.
pub const ALL_POSTS_KEY: &str = "all-posts";

/// Key of the composed per-post bundle for one slug in one language.
pub fn bundle_key(slug: &str, language: &Language) -> String {
    format!("{slug}-{language}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_key_joins_slug_and_language() {
        assert_eq!(bundle_key("first-post", &Language::en()), "first-post-en");
        assert_eq!(bundle_key("first-post", &Language::pl()), "first-post-pl");
    }

    #[test]
    fn bundle_keys_differ_per_language() {
        let en = bundle_key("hello", &Language::en());
        let pl = bundle_key("hello", &Language::pl());
        assert_ne!(en, pl);
    }
}
