use std::path::PathBuf;

use crate::{
    core::LocaleReport,
    issues::{ExtractionFailedIssue, Issue},
    rules::{KeyWrite, SentinelSubtree},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Check,
    Fix,
    Fill,
    Placeholders,
    Clean,
    Verify,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Repair(RepairSummary),
    Clean(CleanSummary),
    Verify(VerifySummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// One report per audited locale, in audit order.
    pub locales: Vec<LocaleReport>,
    /// Markup files with keys that were audited.
    pub pages_checked: usize,
    /// Where the audit report was saved, if it was.
    pub report_path: Option<PathBuf>,
}

/// Summary shared by `fix`, `fill` and `placeholders`.
#[derive(Debug)]
pub struct RepairSummary {
    pub writes: Vec<KeyWrite>,
    /// Keys no value could be extracted for (`fix` only).
    pub failures: Vec<ExtractionFailedIssue>,
    /// Keys left alone on purpose.
    pub skipped: usize,
    pub file_count: usize,
    /// Values actually changed (apply only).
    pub applied_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct CleanSummary {
    pub subtrees: Vec<SentinelSubtree>,
    pub file_count: usize,
    pub applied_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct VerifySummary {
    pub pages_checked: usize,
    pub stores_checked: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running a pageglot command.
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Changes a dry-run found but did not make. Non-zero fails the run.
    pub pending_changes: usize,
}
