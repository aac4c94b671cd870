//! Planning of store repairs.
//!
//! Planning is pure: it turns unresolved keys into [`KeyWrite`]s and never
//! touches the filesystem. Executing the writes is the job of the CLI actions.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        CheckContext, LocaleReport, MarkupDocument, Resolution, ResolutionStatus, SourceContext,
        SourceLocation, StoreError, TranslationKey, TranslationStore, markup::source_line,
    },
    issues::{ExtractionFailedIssue, KeyContext},
    rules::{
        audit::{LocaleAudit, StoreState},
        sentinel::{find_sentinel_leaves, locale_stores},
    },
};

/// Where a planned value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    /// Extracted from the markup element.
    Markup,
    /// Configured in `overrides`.
    Override,
    /// Copied from the reference store.
    Reference,
    /// The sentinel placeholder.
    Placeholder,
}

impl std::fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueOrigin::Markup => write!(f, "markup"),
            ValueOrigin::Override => write!(f, "override"),
            ValueOrigin::Reference => write!(f, "reference"),
            ValueOrigin::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// One value to write into one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyWrite {
    pub store_path: PathBuf,
    /// Store file, relative to the project root.
    pub display_path: String,
    /// Annotation-free lookup path, as a key.
    pub key: TranslationKey,
    pub value: String,
    pub origin: ValueOrigin,
}

/// An unresolved key scheduled for repair.
#[derive(Debug, Clone)]
pub struct RepairKey {
    /// Key as written in the markup.
    pub key: TranslationKey,
    pub lookup_path: String,
    pub status: ResolutionStatus,
}

/// Unresolved keys of one page in one locale.
#[derive(Debug)]
pub struct RepairTarget<'a> {
    pub document: &'a MarkupDocument,
    pub locale: String,
    pub store_path: PathBuf,
    pub keys: Vec<RepairKey>,
}

impl RepairTarget<'_> {
    /// Context of the first occurrence of `key` in the document.
    fn key_context(&self, ctx: &CheckContext, key: &RepairKey) -> KeyContext {
        let (line, col) = ctx
            .resolver
            .key_occurrences(&self.document.content)
            .find(|occurrence| occurrence.key == key.key)
            .map_or((1, 1), |occurrence| (occurrence.line, occurrence.col));

        KeyContext {
            source: SourceContext::new(
                SourceLocation::new(self.document.display_path.clone(), line, col),
                source_line(&self.document.content, line),
            ),
            key: key.key.clone(),
            lookup_path: key.lookup_path.clone(),
            locale: self.locale.clone(),
            store_path: ctx.display_path(&self.store_path),
        }
    }
}

/// Repair targets from a fresh audit.
///
/// Pages whose store exists but cannot be read are skipped, writing would
/// replace content we could not parse.
pub fn targets_from_audit<'a>(audit: &LocaleAudit<'a>) -> Vec<RepairTarget<'a>> {
    audit
        .pages
        .iter()
        .filter(|page| !page.is_ok())
        .filter(|page| {
            if let StoreState::Unreadable(reason) = &page.state {
                tracing::warn!(
                    "skipping {}: {}",
                    page.store_path.display(),
                    reason
                );
                return false;
            }
            true
        })
        .map(|page| RepairTarget {
            document: page.page.document,
            locale: audit.locale.clone(),
            store_path: page.store_path.clone(),
            keys: page
                .unresolved
                .iter()
                .map(|finding| RepairKey {
                    key: finding.occurrence.key.clone(),
                    lookup_path: finding.lookup_path.clone(),
                    status: finding.resolution.status(),
                })
                .collect(),
        })
        .collect()
}

/// Repair targets from a saved audit report.
///
/// Report pages are matched to documents by their path relative to the pages
/// root or to the project root; pages whose document no longer exists are
/// skipped.
pub fn targets_from_report<'a>(
    ctx: &CheckContext,
    report: &LocaleReport,
    documents: &'a [MarkupDocument],
) -> Vec<RepairTarget<'a>> {
    report
        .issues
        .iter()
        .filter(|page| !page.json_unreadable)
        .filter_map(|page| {
            let file = page.file.trim_start_matches("./");
            let Some(document) = documents
                .iter()
                .find(|d| d.pages_relative == file || d.display_path == file)
            else {
                tracing::warn!("{} from the audit report not found, skipping", page.file);
                return None;
            };
            Some(RepairTarget {
                document,
                locale: report.language.clone(),
                store_path: ctx.locale_dir(&report.language).join(&page.json),
                keys: page
                    .missing
                    .iter()
                    .map(|entry| RepairKey {
                        key: TranslationKey::parse(entry.html_key.as_str()),
                        lookup_path: entry.json_key.clone(),
                        status: entry.status,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Planned writes plus the keys no value was found for.
#[derive(Debug, Default)]
pub struct RepairPlan {
    pub writes: Vec<KeyWrite>,
    pub failures: Vec<ExtractionFailedIssue>,
    /// Keys left alone without being a failure (no reference value, not missing).
    pub skipped: usize,
}

impl RepairPlan {
    /// Append another plan, e.g. the plan of the next locale.
    pub fn merge(&mut self, other: RepairPlan) {
        self.writes.extend(other.writes);
        self.failures.extend(other.failures);
        self.skipped += other.skipped;
    }
}

fn key_write(
    ctx: &CheckContext,
    target: &RepairTarget<'_>,
    key: &RepairKey,
    value: impl Into<String>,
    origin: ValueOrigin,
) -> KeyWrite {
    KeyWrite {
        store_path: target.store_path.clone(),
        display_path: ctx.display_path(&target.store_path),
        key: TranslationKey::parse(key.lookup_path.as_str()),
        value: value.into(),
        origin,
    }
}

/// Values for unresolved keys taken from overrides, else from the markup.
///
/// Keys without an override whose content cannot be extracted become
/// [`ExtractionFailedIssue`]s and are left untouched.
pub fn plan_extraction(ctx: &CheckContext, targets: &[RepairTarget<'_>]) -> RepairPlan {
    let mut plan = RepairPlan::default();

    for target in targets {
        for key in &target.keys {
            if let Some(value) = ctx.config.override_for(key.key.path(), &key.lookup_path) {
                plan.writes
                    .push(key_write(ctx, target, key, value, ValueOrigin::Override));
                continue;
            }

            match ctx
                .resolver
                .extract_content(&target.document.content, &key.key)
            {
                Some(value) => plan
                    .writes
                    .push(key_write(ctx, target, key, value, ValueOrigin::Markup)),
                None => {
                    tracing::debug!(
                        "no content for {} in {}",
                        key.key,
                        target.document.display_path
                    );
                    plan.failures.push(ExtractionFailedIssue {
                        context: target.key_context(ctx, key),
                    });
                }
            }
        }
    }

    plan
}

/// Values for unresolved keys copied from a reference store.
///
/// The reference is looked up by the annotation-free full key, then by the
/// lookup path. Only `Present` values are copied.
pub fn plan_fill(
    ctx: &CheckContext,
    targets: &[RepairTarget<'_>],
    reference: &TranslationStore,
) -> RepairPlan {
    let mut plan = RepairPlan::default();

    for target in targets {
        for key in &target.keys {
            let value = [key.key.path(), key.lookup_path.as_str()]
                .into_iter()
                .filter_map(|path| reference.lookup(path))
                .map(|value| ctx.resolver.classify(value))
                .find_map(|resolution| match resolution {
                    Resolution::Present(value) => Some(value),
                    _ => None,
                });

            match value {
                Some(value) => plan
                    .writes
                    .push(key_write(ctx, target, key, value, ValueOrigin::Reference)),
                None => plan.skipped += 1,
            }
        }
    }

    plan
}

/// Values for placeholder leaves anywhere in the stores of `locales`, copied
/// from the reference store at the same path.
///
/// This reaches leaves no markup references. Leaves listed in `handled` as
/// (store path, lookup path) belong to the key-driven plan and are passed
/// over, as is the reference store itself.
pub fn plan_store_fill(
    ctx: &CheckContext,
    locales: &[String],
    reference: &TranslationStore,
    reference_path: &Path,
    handled: &HashSet<(PathBuf, String)>,
) -> RepairPlan {
    let mut plan = RepairPlan::default();
    let placeholder = ctx.resolver.placeholder();

    for locale in locales {
        let locale_dir = ctx.locale_dir(locale);
        if !locale_dir.is_dir() {
            tracing::debug!("locale directory {} does not exist", locale_dir.display());
            continue;
        }

        for store_path in locale_stores(&locale_dir) {
            if same_file(&store_path, reference_path) {
                continue;
            }
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
            for leaf in find_sentinel_leaves(&store, placeholder) {
                if handled.contains(&(store_path.clone(), leaf.clone())) {
                    continue;
                }
                match reference.lookup(&leaf).map(|value| ctx.resolver.classify(value)) {
                    Some(Resolution::Present(value)) => plan.writes.push(KeyWrite {
                        store_path: store_path.clone(),
                        display_path: display_path.clone(),
                        key: TranslationKey::parse(leaf.as_str()),
                        value,
                        origin: ValueOrigin::Reference,
                    }),
                    _ => {
                        tracing::debug!("no reference value for {} in {}", leaf, display_path);
                        plan.skipped += 1;
                    }
                }
            }
        }
    }

    plan
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Sentinel placeholders for every `Missing` key; `Empty` and `Unfilled` keys are left alone.
pub fn plan_placeholders(ctx: &CheckContext, targets: &[RepairTarget<'_>]) -> RepairPlan {
    let mut plan = RepairPlan::default();
    let placeholder = ctx.resolver.placeholder();

    for target in targets {
        for key in &target.keys {
            if key.status == ResolutionStatus::Missing {
                plan.writes.push(key_write(
                    ctx,
                    target,
                    key,
                    placeholder,
                    ValueOrigin::Placeholder,
                ));
            } else {
                plan.skipped += 1;
            }
        }
    }

    plan
}
