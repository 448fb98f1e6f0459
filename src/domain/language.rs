//! Language tags and bilingual field resolution.
//!
//! Content records carry fields in one of two shapes: a plain value (the
//! legacy single-language form) or a map keyed by language tag. Resolution
//! is total — a missing translation degrades to the `en` entry or to the
//! field's typed empty value, never to an error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A lowercase primary language subtag (`en`, `pl`, …).
///
/// Serializes transparently as its tag, so it doubles as the key type of
/// per-language field maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase())
    }

    /// The universal fallback language.
    pub fn en() -> Self {
        Self("en".to_owned())
    }

    pub fn pl() -> Self {
        Self("pl".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A value that knows its own empty representation.
///
/// Needed so resolution can degrade to `''`/`[]` without knowing the
/// concrete field type.
pub trait LocalizedValue: Clone {
    fn empty() -> Self;
    fn is_empty_value(&self) -> bool;
}

impl LocalizedValue for String {
    fn empty() -> Self {
        String::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Clone> LocalizedValue for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// A possibly-localized field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Localized<T> {
    /// Legacy single-language shape: the value applies to every language.
    Plain(T),
    /// One value per language tag.
    PerLanguage(BTreeMap<Language, T>),
}

impl<T: LocalizedValue> Localized<T> {
    /// Resolve for `lang`, falling back to `en`, then to the typed empty
    /// value. Total: never panics, never yields a missing sentinel.
    pub fn resolve(&self, lang: &Language) -> T {
        self.resolve_with_fallback(lang, &Language::en())
    }

    /// Resolution with a configurable fallback language.
    pub fn resolve_with_fallback(&self, lang: &Language, fallback: &Language) -> T {
        match self {
            Localized::Plain(value) => value.clone(),
            Localized::PerLanguage(values) => values
                .get(lang)
                .filter(|value| !value.is_empty_value())
                .or_else(|| values.get(fallback).filter(|value| !value.is_empty_value()))
                .cloned()
                .unwrap_or_else(T::empty),
        }
    }
}

impl<T: LocalizedValue> Default for Localized<T> {
    fn default() -> Self {
        Localized::Plain(T::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_language(entries: &[(&str, &str)]) -> Localized<String> {
        Localized::PerLanguage(
            entries
                .iter()
                .map(|(lang, value)| (Language::new(lang), (*value).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn plain_value_resolves_for_any_language() {
        let field = Localized::Plain("hello".to_owned());
        assert_eq!(field.resolve(&Language::en()), "hello");
        assert_eq!(field.resolve(&Language::pl()), "hello");
        assert_eq!(field.resolve(&Language::new("de")), "hello");
    }

    #[test]
    fn requested_language_wins() {
        let field = per_language(&[("en", "hello"), ("pl", "cześć")]);
        assert_eq!(field.resolve(&Language::pl()), "cześć");
        assert_eq!(field.resolve(&Language::en()), "hello");
    }

    #[test]
    fn missing_language_falls_back_to_en() {
        let field = per_language(&[("en", "hello")]);
        assert_eq!(field.resolve(&Language::pl()), "hello");
    }

    #[test]
    fn empty_entry_is_treated_as_missing() {
        let field = per_language(&[("en", "hello"), ("pl", "")]);
        assert_eq!(field.resolve(&Language::pl()), "hello");
    }

    #[test]
    fn absent_everywhere_degrades_to_empty_string() {
        let field = per_language(&[("pl", "")]);
        assert_eq!(field.resolve(&Language::pl()), "");
        assert_eq!(field.resolve(&Language::new("de")), "");

        let empty: Localized<String> = Localized::PerLanguage(BTreeMap::new());
        assert_eq!(empty.resolve(&Language::en()), "");
    }

    #[test]
    fn array_fields_degrade_to_empty_vec() {
        let field: Localized<Vec<String>> = Localized::PerLanguage(BTreeMap::new());
        assert_eq!(field.resolve(&Language::en()), Vec::<String>::new());
    }

    #[test]
    fn custom_fallback_language() {
        let field = per_language(&[("pl", "cześć")]);
        assert_eq!(
            field.resolve_with_fallback(&Language::new("de"), &Language::pl()),
            "cześć"
        );
    }

    #[test]
    fn language_tags_normalize_to_lowercase() {
        assert_eq!(Language::new(" EN "), Language::en());
        assert_eq!(Language::new("Pl").as_str(), "pl");
    }

    #[test]
    fn deserializes_both_shapes() {
        let plain: Localized<String> = serde_json::from_str(r#""hello""#).expect("plain shape");
        assert_eq!(plain, Localized::Plain("hello".to_owned()));

        let mapped: Localized<String> =
            serde_json::from_str(r#"{"en":"hello","pl":"cześć"}"#).expect("mapped shape");
        assert_eq!(mapped.resolve(&Language::pl()), "cześć");
    }
}
