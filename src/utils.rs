//! Common utility functions shared across the codebase.

use std::path::Path;

/// Path of `path` relative to `base`, with forward slashes.
///
/// Falls back to the full path when `path` is not under `base`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pageglot::utils::relative_display;
///
/// assert_eq!(
///     relative_display(Path::new("/site"), Path::new("/site/paginas/pt/m1/p1.html")),
///     "paginas/pt/m1/p1.html"
/// );
/// assert_eq!(relative_display(Path::new("/site"), Path::new("/other/a.json")), "/other/a.json");
/// ```
pub fn relative_display(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

/// Pluralize `word` for `count` by appending `s`.
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
