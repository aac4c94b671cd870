//! Issue types for i18n audit results.
//!
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users
//! - Actions: to repair the store the issue points at

use enum_dispatch::enum_dispatch;

use crate::core::{SourceContext, TranslationKey};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    EmptyValue,
    UnfilledValue,
    StoreMissing,
    StoreUnreadable,
    UnmappedPage,
    DocumentMissing,
    ExtractionFailed,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::EmptyValue => write!(f, "empty-value"),
            Rule::UnfilledValue => write!(f, "unfilled-value"),
            Rule::StoreMissing => write!(f, "store-missing"),
            Rule::StoreUnreadable => write!(f, "store-unreadable"),
            Rule::UnmappedPage => write!(f, "unmapped-page"),
            Rule::DocumentMissing => write!(f, "document-missing"),
            Rule::ExtractionFailed => write!(f, "extraction-failed"),
        }
    }
}

// ============================================================
// Key Context
// ============================================================

/// Where a key is referenced and which store it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyContext {
    pub source: SourceContext,
    pub key: TranslationKey,
    /// Path looked up in the store (mount point stripped).
    pub lookup_path: String,
    pub locale: String,
    /// Store file, relative to the project root.
    pub store_path: String,
}

// ============================================================
// Issue Types - Keys (KeyContext)
// ============================================================

/// Key referenced in markup but absent from the store (or ending on a subtree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: KeyContext,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Key whose store value is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyValueIssue {
    pub context: KeyContext,
}

impl EmptyValueIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptyValue
    }
}

/// Key whose store value is still the sentinel placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfilledValueIssue {
    pub context: KeyContext,
}

impl UnfilledValueIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnfilledValue
    }
}

/// Unresolved key whose content could not be extracted from markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailedIssue {
    pub context: KeyContext,
}

impl ExtractionFailedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ExtractionFailed
    }
}

// ============================================================
// Issue Types - Files
// ============================================================

/// Store file required by a page does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMissingIssue {
    /// Store file, relative to the project root.
    pub store_path: String,
    pub locale: String,
    /// Markup file that needs the store, relative to the project root.
    pub document: String,
    /// Keys of the document left unresolved (0 when only existence was checked).
    pub key_count: usize,
}

impl StoreMissingIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::StoreMissing
    }
}

/// Store file exists but cannot be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUnreadableIssue {
    pub store_path: String,
    pub locale: String,
    pub document: String,
    pub key_count: usize,
    pub reason: String,
}

impl StoreUnreadableIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::StoreUnreadable
    }
}

/// Markup file with keys but no manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedPageIssue {
    pub file_path: String,
    pub key_count: usize,
}

impl UnmappedPageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnmappedPage
    }
}

/// Manifest entry whose markup file does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMissingIssue {
    pub page_id: String,
    pub file_path: String,
}

impl DocumentMissingIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DocumentMissing
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An i18n issue found during an audit.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingKey(MissingKeyIssue),
    EmptyValue(EmptyValueIssue),
    UnfilledValue(UnfilledValueIssue),
    ExtractionFailed(ExtractionFailedIssue),
    StoreMissing(StoreMissingIssue),
    StoreUnreadable(StoreUnreadableIssue),
    UnmappedPage(UnmappedPageIssue),
    DocumentMissing(DocumentMissingIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Markup location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on
/// [`Issue`] without a hand-written match.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key, file, page id).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context.source)
    }

    fn message(&self) -> String {
        self.context.key.raw().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "\"{}\" not found in {} ({})",
            self.context.lookup_path, self.context.store_path, self.context.locale
        ))
    }
}

impl Report for EmptyValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context.source)
    }

    fn message(&self) -> String {
        self.context.key.raw().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "\"{}\" is empty in {} ({})",
            self.context.lookup_path, self.context.store_path, self.context.locale
        ))
    }
}

impl Report for UnfilledValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context.source)
    }

    fn message(&self) -> String {
        self.context.key.raw().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "\"{}\" awaits translation in {} ({})",
            self.context.lookup_path, self.context.store_path, self.context.locale
        ))
    }
}

impl Report for ExtractionFailedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context.source)
    }

    fn message(&self) -> String {
        self.context.key.raw().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no content found for \"{}\", {} left unchanged",
            self.context.lookup_path, self.context.store_path
        ))
    }

    fn hint(&self) -> Option<&str> {
        Some("add the value to 'overrides' in the config file")
    }
}

impl Report for StoreMissingIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.store_path,
        }
    }

    fn message(&self) -> String {
        self.store_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.key_count == 0 {
            Some(format!("required by {} ({})", self.document, self.locale))
        } else {
            Some(format!(
                "{} key(s) of {} unresolved ({})",
                self.key_count, self.document, self.locale
            ))
        }
    }
}

impl Report for StoreUnreadableIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.store_path,
        }
    }

    fn message(&self) -> String {
        self.store_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} ({} key(s) of {} unresolved, {})",
            self.reason, self.key_count, self.document, self.locale
        ))
    }
}

impl Report for UnmappedPageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.file_path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} key(s) but no entry in the pages manifest",
            self.key_count
        ))
    }
}

impl Report for DocumentMissingIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.page_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("listed in the pages manifest but the markup file does not exist".to_string())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
