//! Translation store: one nested JSON document per (locale, page).
//!
//! Stores are read wholesale, mutated in memory and written back wholesale.
//! Key order is preserved (`serde_json` with `preserve_order`), output is
//! pretty-printed with 2-space indentation and a trailing newline.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

use super::key::TranslationKey;

/// Failure to load or save a store file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file does not exist.
    #[error("store file not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The store file exists but cannot be read or parsed.
    #[error("failed to read store file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// Writing the store file failed.
    #[error("failed to write store file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

/// An ordered, arbitrarily nested mapping of translation strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationStore {
    root: Map<String, Value>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from JSON text. The document root must be an object.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(format!(
                "expected a JSON object at the root, found {}",
                json_kind(&other)
            )),
        }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(StoreError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        Self::from_json(&content).map_err(|reason| StoreError::Unreadable {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Write the whole store to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, self.to_pretty_json()).map_err(write_error)
    }

    /// Serialized form written by [`save`](Self::save).
    pub fn to_pretty_json(&self) -> String {
        // Serializing a Map<String, Value> cannot fail
        let mut content = serde_json::to_string_pretty(&self.root).unwrap_or_default();
        content.push('\n');
        content
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Walk `path` segment by segment through nested objects.
    ///
    /// Returns the value at the end of the path, which may itself be an object.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Set the leaf named by `key` to `value`.
    ///
    /// Annotations are ignored, intermediate objects are created as needed and
    /// whatever sat at the leaf (including a placeholder) is overwritten. A
    /// non-object value in the middle of the path is replaced by an object.
    pub fn write_back(&mut self, key: &TranslationKey, value: impl Into<String>) {
        let segments: Vec<&str> = key.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            let child = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(map) = child else {
                return;
            };
            current = map;
        }

        current.insert(last.to_string(), Value::String(value.into()));
    }

    /// Remove the value at `path`. Returns whether anything was removed.
    pub fn remove(&mut self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut current = &mut self.root;
        for segment in parents {
            match current.get_mut(*segment) {
                Some(Value::Object(map)) => current = map,
                _ => return false,
            }
        }
        // shift_remove keeps the order of the remaining keys
        current.shift_remove(*last).is_some()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
