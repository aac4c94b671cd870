use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths relative to the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for markup files.
pub struct ScanResult {
    /// Markup files, sorted.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// Collect every `.html`/`.htm` file under `pages_dir`.
///
/// `ignore_patterns` are globs matched against the path relative to
/// `root_dir`, or literal paths (relative to `root_dir`) matched by prefix.
pub fn scan_markup_files(root_dir: &Path, pages_dir: &Path, ignore_patterns: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(root_dir.join(p));
        }
    }

    for entry in WalkDir::new(pages_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let relative = crate::utils::relative_display(root_dir, path);
        if glob_patterns.iter().any(|p| p.matches(&relative)) {
            tracing::debug!(path = %relative, "ignored");
            continue;
        }

        if entry.file_type().is_file() && is_markup_file(path) {
            files.insert(path.to_path_buf());
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_markup_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html" | "htm")
    )
}
