//! Low-level store edits.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use serde_json::Value;

use crate::{core::TranslationStore, rules::KeyWrite};

/// Longest value shown in a preview line before it is cut.
const MAX_PREVIEW_CHARS: usize = 60;

/// One edit of one store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Set a leaf value, creating intermediate objects.
    WriteKey(KeyWrite),
    /// Remove the value (usually a whole subtree) at `path`.
    RemovePath {
        store_path: PathBuf,
        display_path: String,
        path: String,
    },
}

impl Operation {
    pub fn store_path(&self) -> &Path {
        match self {
            Operation::WriteKey(write) => &write.store_path,
            Operation::RemovePath { store_path, .. } => store_path,
        }
    }

    pub fn display_path(&self) -> &str {
        match self {
            Operation::WriteKey(write) => &write.display_path,
            Operation::RemovePath { display_path, .. } => display_path,
        }
    }

    /// Whether this operation can create a store that does not exist yet.
    pub fn creates_store(&self) -> bool {
        matches!(self, Operation::WriteKey(_))
    }

    /// Apply to a loaded store. Returns whether the store changed.
    pub fn apply(&self, store: &mut TranslationStore) -> bool {
        match self {
            Operation::WriteKey(write) => {
                let unchanged = matches!(
                    store.lookup(write.key.path()),
                    Some(Value::String(current)) if *current == write.value
                );
                if unchanged {
                    return false;
                }
                store.write_back(&write.key, write.value.as_str());
                true
            }
            Operation::RemovePath { path, .. } => store.remove(path),
        }
    }

    /// Print what this operation would do (dry-run).
    pub fn preview(&self) {
        self.preview_to(&mut io::stdout().lock());
    }

    pub fn preview_to<W: Write>(&self, writer: &mut W) {
        match self {
            Operation::WriteKey(write) => {
                let _ = writeln!(
                    writer,
                    "  {} {}: {} = \"{}\"  {}",
                    "+".green(),
                    write.display_path,
                    write.key.path().bold(),
                    truncate(&write.value),
                    write.origin.to_string().dimmed()
                );
            }
            Operation::RemovePath {
                display_path, path, ..
            } => {
                let _ = writeln!(writer, "  {} {}: {}", "-".red(), display_path, path.bold());
            }
        }
    }
}

fn truncate(value: &str) -> String {
    let single_line = value.replace('\n', " ");
    if single_line.chars().count() <= MAX_PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(MAX_PREVIEW_CHARS).collect();
    format!("{}…", cut)
}
