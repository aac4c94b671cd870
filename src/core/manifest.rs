//! The pages manifest: which store and mount point belong to which markup file.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    #[serde(default)]
    pub id: String,
    /// Markup file, relative to the project root.
    #[serde(default)]
    pub file: String,
    /// Store file, relative to each locale directory.
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub mount_point: String,
    #[serde(default)]
    pub title: PageTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Page title, either one string or one string per locale.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PageTitle {
    Text(String),
    Localized(BTreeMap<String, String>),
}

impl Default for PageTitle {
    fn default() -> Self {
        PageTitle::Text(String::new())
    }
}

impl PageTitle {
    /// Title in `locale`, falling back to any available title.
    pub fn for_locale(&self, locale: &str) -> &str {
        match self {
            PageTitle::Text(title) => title,
            PageTitle::Localized(titles) => titles
                .get(locale)
                .or_else(|| titles.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

impl Manifest {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Find the entry for a markup file.
    ///
    /// `root_relative` is matched against `file`; failing that, `pages_relative`
    /// is matched against `translation` with its `.json` extension swapped for
    /// `.html`. Both paths use forward slashes.
    pub fn find_page(&self, root_relative: &str, pages_relative: &str) -> Option<&PageEntry> {
        let root_relative = root_relative.trim_start_matches("./");
        self.pages
            .iter()
            .find(|page| !page.file.is_empty() && page.file.trim_start_matches("./") == root_relative)
            .or_else(|| {
                self.pages
                    .iter()
                    .find(|page| page.expected_markup().as_deref() == Some(pages_relative))
            })
    }
}

impl PageEntry {
    /// Markup path implied by the store path, relative to the pages root.
    pub fn expected_markup(&self) -> Option<String> {
        self.translation
            .strip_suffix(".json")
            .map(|stem| format!("{stem}.html"))
    }

    /// Display name used in reports: the title, or the id when untitled.
    pub fn display_title(&self, locale: &str) -> &str {
        match self.title.for_locale(locale) {
            "" => &self.id,
            title => title,
        }
    }
}

/// Load the manifest. Failure here aborts the run.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let manifest = Manifest::from_json(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
    tracing::debug!(pages = manifest.pages.len(), "loaded manifest");
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const MANIFEST: &str = r#"{
        "pages": [
            {
                "id": "m1-p1",
                "file": "paginas/pt/m1/p1.html",
                "translation": "m1/p1.json",
                "mountPoint": "m1.p1",
                "title": "Introdução",
                "module": "m1"
            },
            {
                "id": "m1-p5",
                "translation": "m1/p6.json",
                "mountPoint": "m1.p6",
                "title": { "pt": "Revisão", "en": "Review" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.pages.len(), 2);
        assert_eq!(manifest.pages[0].mount_point, "m1.p1");
        assert_eq!(manifest.pages[0].module.as_deref(), Some("m1"));
        assert_eq!(manifest.pages[1].module, None);
    }

    #[test]
    fn test_title_variants() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.pages[0].title.for_locale("en"), "Introdução");
        assert_eq!(manifest.pages[1].title.for_locale("en"), "Review");
        assert_eq!(manifest.pages[1].title.for_locale("fr"), "Review");
    }

    #[test]
    fn test_find_page_by_file() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let page = manifest.find_page("paginas/pt/m1/p1.html", "m1/p1.html").unwrap();
        assert_eq!(page.id, "m1-p1");
    }

    #[test]
    fn test_find_page_by_translation() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        let page = manifest.find_page("paginas/pt/m1/p6.html", "m1/p6.html").unwrap();
        assert_eq!(page.id, "m1-p5");
    }

    #[test]
    fn test_find_page_unmapped() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert!(manifest.find_page("paginas/pt/m9/x.html", "m9/x.html").is_none());
    }

    #[test]
    fn test_display_title_falls_back_to_id() {
        let page = PageEntry {
            id: "extras-quiz".to_string(),
            ..Default::default()
        };
        assert_eq!(page.display_title("pt"), "extras-quiz");
    }

    #[test]
    fn test_load_manifest_missing_is_error() {
        let dir = tempdir().unwrap();
        let err = load_manifest(&dir.path().join("pages-manifest.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }

    #[test]
    fn test_load_manifest_invalid_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pages-manifest.json");
        fs::write(&path, r#"{"pages": 3}"#).unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse manifest"));
    }
}
