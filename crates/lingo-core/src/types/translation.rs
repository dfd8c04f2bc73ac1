//! Translation value types.
//!
//! This module provides the [`Translation`] entry and the [`TranslationGroup`]
//! that bundles entries under one case-insensitive name. The serde field
//! renames preserve the on-disk shape consumed by existing catalog files:
//!
//! ```json
//! { "Name": "greeting", "Translations": [ { "LanguageCode": "en", "Text": "Hello" } ] }
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Returns the canonical lookup key for a group name.
///
/// Names are compared case-insensitively; the canonical form (trimmed,
/// Unicode-lowercased) is computed once at entry into store operations and
/// used as the index key from there on.
///
/// # Examples
///
/// ```
/// use lingo_core::name_key;
///
/// assert_eq!(name_key("Greeting"), name_key("greeting"));
/// assert_eq!(name_key("  Hello "), "hello");
/// ```
#[inline]
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single localized text entry.
///
/// Language-code uniqueness within a group is a collaborator policy and is
/// not enforced here; entries keep their insertion order.
///
/// # Examples
///
/// ```
/// use lingo_core::Translation;
///
/// let t = Translation::new("en", "Hello");
/// assert_eq!(t.language_code, "en");
/// assert_eq!(t.text, "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Translation {
    /// The language code this entry is written in (e.g., `en`, `fr-FR`).
    pub language_code: String,

    /// The localized text.
    pub text: String,
}

impl Translation {
    /// Creates a new translation entry.
    #[inline]
    #[must_use]
    pub fn new(language_code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            text: text.into(),
        }
    }
}

/// A named bundle of per-language text entries, the catalog's unit of CRUD.
///
/// Identity is the `name`, compared case-insensitively. The payload is an
/// insertion-ordered sequence of [`Translation`] entries.
///
/// # Memory Efficiency
///
/// Uses [`SmallVec`] with inline storage for up to 4 entries, avoiding heap
/// allocation for groups translated into a handful of languages (the common
/// case).
///
/// # Examples
///
/// ```
/// use lingo_core::{Translation, TranslationGroup};
///
/// let mut group = TranslationGroup::new("greeting");
/// group.push(Translation::new("en", "Hello"));
/// group.push(Translation::new("fr", "Bonjour"));
///
/// assert_eq!(group.name, "greeting");
/// assert_eq!(group.translations.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranslationGroup {
    /// The group name; compared case-insensitively across the store.
    pub name: String,

    /// The localized entries, in insertion order.
    pub translations: SmallVec<[Translation; 4]>,
}

impl TranslationGroup {
    /// Creates an empty group with the given name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translations: SmallVec::new(),
        }
    }

    /// Creates a group with the given name and entries.
    #[must_use]
    pub fn with_translations(
        name: impl Into<String>,
        translations: impl IntoIterator<Item = Translation>,
    ) -> Self {
        Self {
            name: name.into(),
            translations: translations.into_iter().collect(),
        }
    }

    /// Appends a translation entry, preserving insertion order.
    #[inline]
    pub fn push(&mut self, translation: Translation) {
        self.translations.push(translation);
    }

    /// Returns the canonical lookup key for this group's name.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingo_core::TranslationGroup;
    ///
    /// let group = TranslationGroup::new("Greeting");
    /// assert_eq!(group.key(), "greeting");
    /// ```
    #[inline]
    #[must_use]
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Returns the text for the given language code, if present.
    ///
    /// When duplicate language codes exist, the first entry wins.
    #[must_use]
    pub fn text_for(&self, language_code: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code)
            .map(|t| t.text.as_str())
    }
}
