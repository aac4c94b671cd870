//! Translation keys as they appear in `data-i18n` attributes.
//!
//! A key is a dot-separated path into a translation store, optionally carrying
//! an annotation marker that says how its value is rendered:
//!
//! - `[html]hero.body`: the value may contain markup and is kept verbatim
//! - `[placeholder]search.hint`: the value comes from the element's `placeholder` attribute
//!
//! Markers are metadata, never part of the path.

use std::fmt;

/// Marker for values that may contain embedded markup.
pub const HTML_MARKER: &str = "[html]";

/// Marker for values sourced from a `placeholder` attribute.
pub const PLACEHOLDER_MARKER: &str = "[placeholder]";

/// How the value referenced by a key is rendered in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Annotation {
    /// Plain text content, tags stripped.
    #[default]
    Text,
    /// Inner markup preserved.
    Html,
    /// Read from the `placeholder` attribute.
    Placeholder,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Text => write!(f, "text"),
            Annotation::Html => write!(f, "html"),
            Annotation::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A parsed `data-i18n` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    raw: String,
    path: String,
    annotation: Annotation,
}

impl TranslationKey {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let annotation = if raw.contains(PLACEHOLDER_MARKER) {
            Annotation::Placeholder
        } else if raw.contains(HTML_MARKER) {
            Annotation::Html
        } else {
            Annotation::Text
        };
        let path = strip_annotations(&raw);
        Self {
            raw,
            path,
            annotation,
        }
    }

    /// The attribute value exactly as written in the markup.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The annotation-free path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn annotation(&self) -> Annotation {
        self.annotation
    }

    pub fn is_html(&self) -> bool {
        self.annotation == Annotation::Html
    }

    pub fn is_placeholder(&self) -> bool {
        self.annotation == Annotation::Placeholder
    }

    /// Path used to look the key up in a store mounted at `mount_point`.
    ///
    /// Documents may reference keys fully qualified by their own mount point
    /// (`m1.p1.title`) while the store is rooted at that mount point, so a
    /// leading `mount_point.` is removed. An empty mount point strips nothing.
    ///
    /// ```
    /// use pageglot::core::TranslationKey;
    ///
    /// let key = TranslationKey::parse("[html]m1.p1.intro.body");
    /// assert_eq!(key.lookup_path("m1.p1"), "intro.body");
    /// assert_eq!(key.lookup_path("m2.p1"), "m1.p1.intro.body");
    /// assert_eq!(key.lookup_path(""), "m1.p1.intro.body");
    /// ```
    pub fn lookup_path(&self, mount_point: &str) -> &str {
        if mount_point.is_empty() {
            return &self.path;
        }
        self.path
            .strip_prefix(mount_point)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.path)
    }

    /// Path segments of the annotation-free path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }
}

impl From<&str> for TranslationKey {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Remove every annotation marker from a raw key.
pub fn strip_annotations(raw: &str) -> String {
    raw.replace(HTML_MARKER, "")
        .replace(PLACEHOLDER_MARKER, "")
        .trim()
        .to_string()
}
