//! Report formatting and printing.
//!
//! Issues are displayed cargo-style. Command summaries (audit tables, write
//! previews) are printed after the issues.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    actions::{Action, RemoveSubtrees, WriteValues},
    commands::{
        CheckSummary, CleanSummary, CommandKind, CommandResult, CommandSummary, InitSummary,
        RepairSummary, VerifySummary,
    },
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::LocaleReport,
    issues::{Issue, Report, ReportLocation, Severity},
    rules::ValueOrigin,
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Pages listed per locale under the audit table, unless verbose.
const TOP_PAGES: usize = 5;

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when an audit found no issues.
pub fn print_success_to<W: Write>(pages: usize, locales: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} across {} - no issues found",
            plural(pages, "page"),
            plural(locales, "locale")
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match loc {
        ReportLocation::Source(ctx) => {
            let (line, col, source_line) = (ctx.line(), ctx.col(), ctx.source_line.as_str());
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // col is 1-based
            let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command Output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Check(summary) => {
            report_to(&result.issues, stdout);
            print_check_to(summary, result.issues.is_empty(), verbose, stdout);
        }
        CommandSummary::Repair(summary) => {
            report_to(&result.issues, stdout);
            if !summary.is_apply {
                WriteValues::preview(&summary.writes);
            }
            print_repair_to(result.kind, summary, stdout);
        }
        CommandSummary::Clean(summary) => {
            if !summary.is_apply {
                RemoveSubtrees::preview(&summary.subtrees);
            }
            print_clean_to(summary, stdout);
        }
        CommandSummary::Verify(summary) => {
            report_to(&result.issues, stdout);
            print_verify_to(summary, result.issues.is_empty(), stdout);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_check_to<W: Write>(summary: &CheckSummary, clean: bool, verbose: bool, writer: &mut W) {
    if clean {
        let audited = summary.locales.iter().filter(|l| l.exists).count();
        print_success_to(summary.pages_checked, audited, writer);
    } else {
        print_locale_table_to(&summary.locales, writer);
        let limit = if verbose { usize::MAX } else { TOP_PAGES };
        for locale in &summary.locales {
            print_top_pages_to(locale, limit, writer);
        }
    }

    if let Some(path) = &summary.report_path {
        let _ = writeln!(
            writer,
            "{} {}",
            "Saved audit report to".bold(),
            path.display()
        );
    }
}

/// Side-by-side comparison of the audited locales.
pub fn print_locale_table_to<W: Write>(locales: &[LocaleReport], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}",
        format!(
            "{:<8} {:>6} {:>6} {:>12} {:>11}",
            "locale", "pages", "ok", "with issues", "unresolved"
        )
        .bold()
    );
    for locale in locales {
        if !locale.exists {
            let _ = writeln!(
                writer,
                "{:<8} {}",
                locale.language,
                "(no stores)".dimmed()
            );
            continue;
        }
        let unresolved = format!("{:>11}", locale.total_missing_keys);
        let _ = writeln!(
            writer,
            "{:<8} {:>6} {:>6} {:>12} {}",
            locale.language,
            locale.total_pages,
            locale.pages_ok,
            locale.pages_with_issues,
            if locale.total_missing_keys == 0 {
                unresolved.green()
            } else {
                unresolved.red()
            }
        );
    }
    let _ = writeln!(writer);
}

fn print_top_pages_to<W: Write>(locale: &LocaleReport, limit: usize, writer: &mut W) {
    let pages = locale.top_pages(limit);
    if pages.is_empty() {
        return;
    }

    let _ = writeln!(
        writer,
        "{}",
        format!("Pages with most unresolved keys ({}):", locale.language).bold()
    );
    for page in &pages {
        let title = if page.title.is_empty() {
            page.file.as_str()
        } else {
            page.title.as_str()
        };
        let _ = writeln!(
            writer,
            "  {:>4}  {} {}",
            page.missing.len(),
            title,
            format!("({})", page.file).dimmed()
        );
    }
    if locale.issues.len() > pages.len() {
        let _ = writeln!(
            writer,
            "  {}",
            format!("... and {} more (use -v to list all)", locale.issues.len() - pages.len())
                .dimmed()
        );
    }
    let _ = writeln!(writer);
}

fn print_repair_to<W: Write>(kind: CommandKind, summary: &RepairSummary, writer: &mut W) {
    let total = summary.writes.len();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to write".green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} in {} (planned {}).",
            "Wrote".green().bold(),
            plural(summary.applied_count, "value"),
            plural(summary.file_count, "file"),
            total
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} in {}:",
            "Would write".yellow().bold(),
            plural(total, "value"),
            plural(summary.file_count, "file")
        );
        for origin in [
            ValueOrigin::Markup,
            ValueOrigin::Override,
            ValueOrigin::Reference,
            ValueOrigin::Placeholder,
        ] {
            let count = summary.writes.iter().filter(|w| w.origin == origin).count();
            if count > 0 {
                let _ = writeln!(writer, "  - {}: {}", origin, count);
            }
        }
        let _ = writeln!(writer, "Run with {} to write these values.", "--apply".cyan());
    }

    if summary.skipped > 0 {
        let reason = match kind {
            CommandKind::Fill => "no value in the reference store",
            _ => "not missing",
        };
        let _ = writeln!(
            writer,
            "  - skipped: {} ({})",
            plural(summary.skipped, "key"),
            reason
        );
    }
    if !summary.failures.is_empty() {
        let _ = writeln!(
            writer,
            "  - failed: {} (no content found)",
            plural(summary.failures.len(), "key")
        );
    }
}

fn print_clean_to<W: Write>(summary: &CleanSummary, writer: &mut W) {
    let total = summary.subtrees.len();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No placeholder-only subtrees found".green()
        );
        return;
    }

    let leaves: usize = summary.subtrees.iter().map(|s| s.leaf_count).sum();
    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} ({}) in {}.",
            "Removed".green().bold(),
            plural(summary.applied_count, "subtree"),
            plural(leaves, "placeholder"),
            plural(summary.file_count, "file")
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({}) in {}.",
            "Would remove".yellow().bold(),
            plural(total, "subtree"),
            plural(leaves, "placeholder"),
            plural(summary.file_count, "file")
        );
        let _ = writeln!(writer, "Run with {} to remove these subtrees.", "--apply".cyan());
    }
}

fn print_verify_to<W: Write>(summary: &VerifySummary, clean: bool, writer: &mut W) {
    if clean {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Verified {} and {} - no issues found",
                plural(summary.pages_checked, "page"),
                plural(summary.stores_checked, "store")
            )
            .green()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "Error:".red().bold(), error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
