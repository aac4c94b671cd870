//! Audit of markup keys against every locale's stores.
//!
//! Markup lives once, in the source locale. Each markup file is paired with
//! its manifest entry, then its keys are resolved against the matching store
//! of every locale being audited.

use std::{collections::HashSet, path::PathBuf};

use crate::{
    core::{
        CheckContext, KeyOccurrence, LocaleReport, Manifest, MarkupDocument, MissingEntry,
        PageEntry, PageReport, Resolution, SourceContext, SourceLocation, StoreError,
        TranslationStore, markup::source_line,
    },
    issues::{
        EmptyValueIssue, Issue, KeyContext, MissingKeyIssue, StoreMissingIssue,
        StoreUnreadableIssue, UnfilledValueIssue, UnmappedPageIssue,
    },
};

/// A markup document paired with its manifest entry.
#[derive(Debug)]
pub struct MappedPage<'a> {
    pub document: &'a MarkupDocument,
    pub entry: &'a PageEntry,
    /// Distinct keys of the document, first occurrence of each, in document order.
    pub keys: Vec<KeyOccurrence>,
}

impl MappedPage<'_> {
    /// Source context of a key occurrence, for reporting.
    pub fn source_context(&self, occurrence: &KeyOccurrence) -> SourceContext {
        SourceContext::new(
            SourceLocation::new(
                self.document.display_path.clone(),
                occurrence.line,
                occurrence.col,
            ),
            source_line(&self.document.content, occurrence.line),
        )
    }
}

/// Markup documents split by whether the manifest knows them.
#[derive(Debug, Default)]
pub struct PageIndex<'a> {
    pub pages: Vec<MappedPage<'a>>,
    pub unmapped: Vec<UnmappedPageIssue>,
}

/// Pair every document that references keys with its manifest entry.
///
/// Documents without keys are skipped. Documents with keys but no entry are
/// collected as [`UnmappedPageIssue`]s.
pub fn index_pages<'a>(
    ctx: &CheckContext,
    documents: &'a [MarkupDocument],
    manifest: &'a Manifest,
) -> PageIndex<'a> {
    let mut index = PageIndex::default();

    for document in documents {
        let mut seen = HashSet::new();
        let keys: Vec<KeyOccurrence> = ctx
            .resolver
            .key_occurrences(&document.content)
            .filter(|occurrence| seen.insert(occurrence.key.raw().to_string()))
            .collect();
        if keys.is_empty() {
            continue;
        }

        match manifest.find_page(&document.display_path, &document.pages_relative) {
            Some(entry) => index.pages.push(MappedPage {
                document,
                entry,
                keys,
            }),
            None => {
                tracing::warn!("{} has no entry in the pages manifest", document.display_path);
                index.unmapped.push(UnmappedPageIssue {
                    file_path: document.display_path.clone(),
                    key_count: keys.len(),
                });
            }
        }
    }

    index
}

/// How a page's store file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    Loaded,
    Missing,
    Unreadable(String),
}

/// One unresolved key of a page.
#[derive(Debug, Clone)]
pub struct Finding {
    pub occurrence: KeyOccurrence,
    pub lookup_path: String,
    pub resolution: Resolution,
}

#[derive(Debug)]
pub struct PageAudit<'a> {
    pub page: &'a MappedPage<'a>,
    pub store_path: PathBuf,
    pub state: StoreState,
    /// Keys that are not `Present`; every key when the store could not be loaded.
    pub unresolved: Vec<Finding>,
}

impl PageAudit<'_> {
    pub fn is_ok(&self) -> bool {
        self.unresolved.is_empty()
    }
}

#[derive(Debug)]
pub struct LocaleAudit<'a> {
    pub locale: String,
    /// False when the locale directory does not exist.
    pub exists: bool,
    pub pages: Vec<PageAudit<'a>>,
}

/// Resolve every page's keys against its store in `locale`.
///
/// A missing or unreadable store marks every key of the page `Missing`; the
/// audit continues with the next page.
pub fn audit_locale<'a>(ctx: &CheckContext, index: &'a PageIndex<'a>, locale: &str) -> LocaleAudit<'a> {
    let locale_dir = ctx.locale_dir(locale);
    if !locale_dir.is_dir() {
        tracing::debug!("locale directory {} does not exist", locale_dir.display());
        return LocaleAudit {
            locale: locale.to_string(),
            exists: false,
            pages: Vec::new(),
        };
    }

    let pages = index
        .pages
        .iter()
        .map(|page| audit_page(ctx, page, locale))
        .collect();

    LocaleAudit {
        locale: locale.to_string(),
        exists: true,
        pages,
    }
}

fn audit_page<'a>(ctx: &CheckContext, page: &'a MappedPage<'a>, locale: &str) -> PageAudit<'a> {
    let store_path = ctx.store_path(locale, page.entry);
    let mount_point = page.entry.mount_point.as_str();

    let (state, store) = match TranslationStore::load(&store_path) {
        Ok(store) => (StoreState::Loaded, Some(store)),
        Err(StoreError::Missing { .. }) => {
            tracing::debug!("store file {} does not exist", store_path.display());
            (StoreState::Missing, None)
        }
        Err(e) => {
            tracing::warn!("{}", e);
            (StoreState::Unreadable(e.to_string()), None)
        }
    };

    let unresolved = page
        .keys
        .iter()
        .filter_map(|occurrence| {
            let resolution = match &store {
                Some(store) => ctx.resolver.resolve(&occurrence.key, store, mount_point),
                None => Resolution::Missing,
            };
            resolution.is_unresolved().then(|| Finding {
                occurrence: occurrence.clone(),
                lookup_path: occurrence.key.lookup_path(mount_point).to_string(),
                resolution,
            })
        })
        .collect();

    PageAudit {
        page,
        store_path,
        state,
        unresolved,
    }
}

impl LocaleAudit<'_> {
    pub fn total_unresolved(&self) -> usize {
        self.pages.iter().map(|p| p.unresolved.len()).sum()
    }

    /// Issues for the `check` report.
    ///
    /// Unresolved keys of a loaded store are reported one by one; a store that
    /// could not be loaded is reported once for the whole page.
    pub fn issues(&self, ctx: &CheckContext) -> Vec<Issue> {
        let mut issues = Vec::new();

        for audit in &self.pages {
            let store_path = ctx.display_path(&audit.store_path);
            let document = audit.page.document.display_path.clone();

            match &audit.state {
                StoreState::Missing => issues.push(Issue::StoreMissing(StoreMissingIssue {
                    store_path,
                    locale: self.locale.clone(),
                    document,
                    key_count: audit.unresolved.len(),
                })),
                StoreState::Unreadable(reason) => {
                    issues.push(Issue::StoreUnreadable(StoreUnreadableIssue {
                        store_path,
                        locale: self.locale.clone(),
                        document,
                        key_count: audit.unresolved.len(),
                        reason: reason.clone(),
                    }))
                }
                StoreState::Loaded => {
                    for finding in &audit.unresolved {
                        let context = KeyContext {
                            source: audit.page.source_context(&finding.occurrence),
                            key: finding.occurrence.key.clone(),
                            lookup_path: finding.lookup_path.clone(),
                            locale: self.locale.clone(),
                            store_path: store_path.clone(),
                        };
                        issues.push(match finding.resolution {
                            Resolution::Empty => Issue::EmptyValue(EmptyValueIssue { context }),
                            Resolution::Unfilled => {
                                Issue::UnfilledValue(UnfilledValueIssue { context })
                            }
                            Resolution::Missing | Resolution::Present(_) => {
                                Issue::MissingKey(MissingKeyIssue { context })
                            }
                        });
                    }
                }
            }
        }

        issues
    }

    /// Serializable summary of this audit.
    pub fn to_report(&self) -> LocaleReport {
        if !self.exists {
            return LocaleReport::absent(&self.locale);
        }

        let issues: Vec<PageReport> = self
            .pages
            .iter()
            .filter(|audit| !audit.is_ok())
            .map(|audit| PageReport {
                title: audit.page.entry.display_title(&self.locale).to_string(),
                file: audit.page.document.pages_relative.clone(),
                json: audit.page.entry.translation.clone(),
                missing: audit
                    .unresolved
                    .iter()
                    .map(|finding| MissingEntry {
                        html_key: finding.occurrence.key.raw().to_string(),
                        json_key: finding.lookup_path.clone(),
                        status: finding.resolution.status(),
                    })
                    .collect(),
                json_missing: audit.state == StoreState::Missing,
                json_unreadable: matches!(audit.state, StoreState::Unreadable(_)),
            })
            .collect();

        let total_pages = self.pages.len();
        let pages_with_issues = issues.len();

        LocaleReport {
            language: self.locale.clone(),
            exists: true,
            total_pages,
            pages_ok: total_pages - pages_with_issues,
            pages_with_issues,
            total_missing_keys: self.total_unresolved(),
            issues,
        }
    }
}
