//! Key resolution against translation stores.
//!
//! [`KeyResolver`] is the shared core of every command: it extracts keys from
//! markup, classifies each one against a store and writes extracted content
//! back. Commands only differ in what they do with the classification.

use std::fmt;

use serde_json::Value;

use super::{
    key::TranslationKey,
    markup::{self, KeyOccurrence},
    store::TranslationStore,
};

/// Sentinel value of an intentionally unfilled translation slot.
pub const DEFAULT_PLACEHOLDER: &str = "TODO: Adicionar tradução";

/// Outcome of resolving one key against one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A real value.
    Present(String),
    /// Empty or whitespace-only leaf.
    Empty,
    /// Leaf holds the sentinel placeholder.
    Unfilled,
    /// Path absent, or it ends on a subtree.
    Missing,
}

impl Resolution {
    pub fn is_present(&self) -> bool {
        matches!(self, Resolution::Present(_))
    }

    /// True for every outcome that needs a translator's attention.
    pub fn is_unresolved(&self) -> bool {
        !self.is_present()
    }

    pub fn status(&self) -> ResolutionStatus {
        match self {
            Resolution::Present(_) => ResolutionStatus::Present,
            Resolution::Empty => ResolutionStatus::Empty,
            Resolution::Unfilled => ResolutionStatus::Unfilled,
            Resolution::Missing => ResolutionStatus::Missing,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.status().fmt(f)
    }
}

/// Value-less form of [`Resolution`], as stored in audit reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    Present,
    Empty,
    Unfilled,
    Missing,
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStatus::Present => write!(f, "present"),
            ResolutionStatus::Empty => write!(f, "empty"),
            ResolutionStatus::Unfilled => write!(f, "unfilled"),
            ResolutionStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Resolves markup keys against stores using a configurable sentinel.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    placeholder: String,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl KeyResolver {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Every key referenced by `document`, in document order, duplicates included.
    pub fn extract_keys<'a>(
        &self,
        document: &'a str,
    ) -> impl Iterator<Item = TranslationKey> + 'a {
        markup::extract_keys(document)
    }

    /// Like [`extract_keys`](Self::extract_keys), with source positions.
    pub fn key_occurrences<'a>(
        &self,
        document: &'a str,
    ) -> impl Iterator<Item = KeyOccurrence> + 'a {
        markup::key_occurrences(document)
    }

    /// Classify `key` against `store` mounted at `mount_point`.
    ///
    /// ```
    /// use pageglot::core::{KeyResolver, Resolution, TranslationKey, TranslationStore};
    ///
    /// let store = TranslationStore::from_json(r#"{"title": "Olá"}"#).unwrap();
    /// let resolver = KeyResolver::default();
    ///
    /// let full = TranslationKey::parse("m1.p1.title");
    /// let short = TranslationKey::parse("[html]title");
    /// assert_eq!(resolver.resolve(&full, &store, "m1.p1"), Resolution::Present("Olá".into()));
    /// assert_eq!(resolver.resolve(&short, &store, "m1.p1"), Resolution::Present("Olá".into()));
    /// ```
    pub fn resolve(
        &self,
        key: &TranslationKey,
        store: &TranslationStore,
        mount_point: &str,
    ) -> Resolution {
        match store.lookup(key.lookup_path(mount_point)) {
            Some(value) => self.classify(value),
            None => Resolution::Missing,
        }
    }

    /// Classify a value found at the end of a lookup path.
    pub fn classify(&self, value: &Value) -> Resolution {
        match value {
            Value::String(s) if *s == self.placeholder => Resolution::Unfilled,
            Value::String(s) if s.trim().is_empty() => Resolution::Empty,
            Value::String(s) => Resolution::Present(s.clone()),
            Value::Object(_) => Resolution::Missing,
            Value::Null => Resolution::Empty,
            other => Resolution::Present(other.to_string()),
        }
    }

    /// Content for `key` as it currently appears in `document`.
    pub fn extract_content(&self, document: &str, key: &TranslationKey) -> Option<String> {
        markup::extract_content(document, key)
    }

    /// Set the leaf for `key` in `store`, overwriting any previous value.
    pub fn write_back(&self, store: &mut TranslationStore, key: &TranslationKey, value: &str) {
        store.write_back(key, value);
    }
}
