//! Saved audit results, written by `check --output` and read by `fix --report`.
//!
//! Besides its own multi-locale layout, [`AuditReport::load`] accepts the
//! single-locale issues report (`{summary, issues}`) older tooling wrote to
//! `tools/i18n-issues-report.json`.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::resolver::ResolutionStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub locales: Vec<LocaleReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleReport {
    pub language: String,
    /// False when the locale directory does not exist.
    pub exists: bool,
    pub total_pages: usize,
    pub pages_ok: usize,
    pub pages_with_issues: usize,
    pub total_missing_keys: usize,
    #[serde(default)]
    pub issues: Vec<PageReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub title: String,
    /// Markup file, relative to the pages root. Single-locale reports hold
    /// it relative to the project root.
    pub file: String,
    /// Store file, relative to the locale directory.
    pub json: String,
    pub missing: Vec<MissingEntry>,
    /// The store file does not exist.
    #[serde(default)]
    pub json_missing: bool,
    /// The store file exists but could not be read.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub json_unreadable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    /// Key as written in the markup, annotations included.
    pub html_key: String,
    /// Path looked up in the store.
    pub json_key: String,
    #[serde(default = "default_status")]
    pub status: ResolutionStatus,
}

fn default_status() -> ResolutionStatus {
    ResolutionStatus::Missing
}

/// Single-locale issues report.
#[derive(Debug, Deserialize)]
struct IssuesReport {
    #[serde(default)]
    summary: IssuesSummary,
    #[serde(default)]
    issues: Vec<IssuePage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssuesSummary {
    total_pages: usize,
    pages_ok: usize,
    pages_with_issues: usize,
    total_missing_keys: usize,
}

#[derive(Debug, Deserialize)]
struct IssuePage {
    #[serde(default)]
    title: String,
    file: String,
    json: String,
    #[serde(default)]
    missing: Vec<IssueKey>,
}

#[derive(Debug, Deserialize)]
struct IssueKey {
    html_key: String,
    json_key: String,
    /// Key present with a blank value.
    #[serde(default)]
    empty: bool,
}

impl IssuesReport {
    fn into_locale_report(self, language: &str) -> LocaleReport {
        let issues: Vec<PageReport> = self
            .issues
            .into_iter()
            .map(|page| PageReport {
                title: page.title,
                file: page.file,
                json: page.json,
                missing: page
                    .missing
                    .into_iter()
                    .map(|key| MissingEntry {
                        html_key: key.html_key,
                        json_key: key.json_key,
                        status: if key.empty {
                            ResolutionStatus::Empty
                        } else {
                            ResolutionStatus::Missing
                        },
                    })
                    .collect(),
                json_missing: false,
                json_unreadable: false,
            })
            .collect();

        let pages_with_issues = self.summary.pages_with_issues.max(issues.len());
        let total_missing_keys = issues.iter().map(|page| page.missing.len()).sum();
        LocaleReport {
            language: language.to_string(),
            exists: true,
            total_pages: self.summary.total_pages.max(pages_with_issues),
            pages_ok: self.summary.pages_ok,
            pages_with_issues,
            total_missing_keys,
            issues,
        }
    }
}

impl AuditReport {
    pub fn locale(&self, language: &str) -> Option<&LocaleReport> {
        self.locales.iter().find(|l| l.language == language)
    }

    /// Read a saved report. A single-locale issues report is taken as the
    /// results of `source_locale`.
    pub fn load(path: &Path, source_locale: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read audit report: {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse audit report: {}", path.display()))?;

        if value.get("locales").is_some() {
            return serde_json::from_value(value)
                .with_context(|| format!("Failed to parse audit report: {}", path.display()));
        }

        let issues: IssuesReport = serde_json::from_value(value)
            .with_context(|| format!("Failed to parse audit report: {}", path.display()))?;
        Ok(Self {
            locales: vec![issues.into_locale_report(source_locale)],
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize audit report")?;
        content.push('\n');
        fs::write(path, content)
            .with_context(|| format!("Failed to write audit report: {}", path.display()))
    }
}

impl LocaleReport {
    /// Report of a locale whose directory does not exist.
    pub fn absent(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            exists: false,
            total_pages: 0,
            pages_ok: 0,
            pages_with_issues: 0,
            total_missing_keys: 0,
            issues: Vec::new(),
        }
    }

    /// Pages sorted by number of unresolved keys, most first.
    pub fn top_pages(&self, limit: usize) -> Vec<&PageReport> {
        let mut pages: Vec<&PageReport> = self.issues.iter().collect();
        pages.sort_by(|a, b| b.missing.len().cmp(&a.missing.len()));
        pages.truncate(limit);
        pages
    }
}
