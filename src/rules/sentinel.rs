//! Detection of subtrees that hold nothing but sentinel placeholders.
//!
//! Repeated fix runs can leave whole mappings duplicated under a second path,
//! every leaf still the placeholder. Those subtrees carry no translation and
//! can be removed.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::core::{CheckContext, StoreError, TranslationStore};

/// A placeholder-only subtree of one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSubtree {
    pub store_path: PathBuf,
    /// Store file, relative to the project root.
    pub display_path: String,
    /// Dotted path of the subtree.
    pub path: String,
    /// Number of placeholder leaves inside.
    pub leaf_count: usize,
}

/// Dotted paths of every removable subtree, outermost first, with their leaf counts.
///
/// A nested mapping is removable when it has at least one string leaf and
/// every string leaf at any depth is `placeholder`. Other mappings are
/// searched recursively. Arrays are not entered, and the root itself is never
/// reported.
pub fn find_sentinel_subtrees(store: &TranslationStore, placeholder: &str) -> Vec<(String, usize)> {
    let mut found = Vec::new();
    collect(store.root(), "", placeholder, &mut found);
    found
}

/// Dotted paths of every string leaf equal to `placeholder`, in store order.
///
/// Like [`find_sentinel_subtrees`], arrays are not entered: store paths cannot
/// address their items.
pub fn find_sentinel_leaves(store: &TranslationStore, placeholder: &str) -> Vec<String> {
    let mut found = Vec::new();
    collect_leaves(store.root(), "", placeholder, &mut found);
    found
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: &str, placeholder: &str, found: &mut Vec<String>) {
    for (key, value) in map {
        match value {
            Value::String(s) if s == placeholder => found.push(join_path(prefix, key)),
            Value::Object(child) => collect_leaves(child, &join_path(prefix, key), placeholder, found),
            _ => {}
        }
    }
}

fn collect(map: &Map<String, Value>, prefix: &str, placeholder: &str, found: &mut Vec<(String, usize)>) {
    for (key, value) in map {
        let Value::Object(child) = value else {
            continue;
        };
        let path = join_path(prefix, key);

        match sentinel_leaves(child, placeholder) {
            Some(count) if count > 0 => found.push((path, count)),
            _ => collect(child, &path, placeholder, found),
        }
    }
}

/// Count of string leaves if all of them equal `placeholder`, else `None`.
fn sentinel_leaves(map: &Map<String, Value>, placeholder: &str) -> Option<usize> {
    let mut count = 0;
    for value in map.values() {
        match value {
            Value::String(s) if s == placeholder => count += 1,
            Value::String(_) => return None,
            Value::Object(child) => count += sentinel_leaves(child, placeholder)?,
            _ => {}
        }
    }
    Some(count)
}

/// Every `.json` store under the locale directory, sorted.
pub fn locale_stores(locale_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(locale_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("cannot access path: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some("json")
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Placeholder-only subtrees across the stores of the target locales.
///
/// Missing locale directories are skipped; unreadable stores are logged and skipped.
pub fn check_sentinel_subtrees(ctx: &CheckContext) -> Vec<SentinelSubtree> {
    let placeholder = ctx.resolver.placeholder();
    let mut subtrees = Vec::new();

    for locale in ctx.target_locales() {
        let locale_dir = ctx.locale_dir(&locale);
        if !locale_dir.is_dir() {
            tracing::debug!("locale directory {} does not exist", locale_dir.display());
            continue;
        }

        for store_path in locale_stores(&locale_dir) {
            let store = match TranslationStore::load(&store_path) {
                Ok(store) => store,
                Err(e @ StoreError::Unreadable { .. }) => {
                    tracing::warn!("{}", e);
                    continue;
                }
                Err(e) => {
                    tracing::debug!("{}", e);
                    continue;
                }
            };

            let display_path = ctx.display_path(&store_path);
            subtrees.extend(find_sentinel_subtrees(&store, placeholder).into_iter().map(
                |(path, leaf_count)| SentinelSubtree {
                    store_path: store_path.clone(),
                    display_path: display_path.clone(),
                    path,
                    leaf_count,
                },
            ));
        }
    }

    subtrees
}
