//! Manifest integrity: every page's markup and stores exist on disk.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    core::{CheckContext, PageEntry},
    issues::{DocumentMissingIssue, Issue, StoreMissingIssue},
};

/// Markup file a manifest entry refers to.
///
/// `file` wins when set; otherwise the path is derived from `translation`
/// under the pages root.
pub fn markup_path(ctx: &CheckContext, page: &PageEntry) -> Option<PathBuf> {
    if !page.file.is_empty() {
        return Some(ctx.root_dir.join(page.file.trim_start_matches("./")));
    }
    page.expected_markup()
        .map(|relative| ctx.pages_dir().join(relative))
}

/// Outcome of an integrity check.
#[derive(Debug, Default)]
pub struct IntegrityResult {
    pub pages_checked: usize,
    pub stores_checked: usize,
    pub issues: Vec<Issue>,
}

/// Check every manifest page against the filesystem.
///
/// Reports a missing markup file once per page and a missing store once per
/// page and target locale.
pub fn check_integrity(ctx: &CheckContext) -> Result<IntegrityResult> {
    let manifest = ctx.manifest()?;
    let locales = ctx.target_locales();
    let mut result = IntegrityResult::default();

    for page in &manifest.pages {
        result.pages_checked += 1;

        let document = match markup_path(ctx, page) {
            Some(path) => {
                let display = ctx.display_path(&path);
                if !path.is_file() {
                    result.issues.push(Issue::DocumentMissing(DocumentMissingIssue {
                        page_id: page.id.clone(),
                        file_path: display.clone(),
                    }));
                }
                display
            }
            None => {
                tracing::warn!("page '{}' has no markup file or translation", page.id);
                page.id.clone()
            }
        };

        if page.translation.is_empty() {
            continue;
        }

        for locale in &locales {
            result.stores_checked += 1;
            let store_path = ctx.store_path(locale, page);
            if !store_path.is_file() {
                result.issues.push(Issue::StoreMissing(StoreMissingIssue {
                    store_path: ctx.display_path(&store_path),
                    locale: locale.clone(),
                    document: document.clone(),
                    key_count: 0,
                }));
            }
        }
    }

    Ok(result)
}
