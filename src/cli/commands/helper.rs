use std::collections::BTreeSet;

use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, RepairSummary};
use crate::{
    cli::actions::{Action, WriteValues},
    issues::{Issue, Severity},
    rules::RepairPlan,
};

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    let pending_changes = match &summary {
        CommandSummary::Repair(summary) if !summary.is_apply => summary.writes.len(),
        CommandSummary::Clean(summary) if !summary.is_apply => summary.subtrees.len(),
        _ => 0,
    };

    CommandResult {
        kind,
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        pending_changes,
    }
}

/// Apply or preview a repair plan and build the command result.
///
/// Failures become warnings; they never fail the run on their own.
pub fn finish_repair(kind: CommandKind, plan: RepairPlan, apply: bool) -> Result<CommandResult> {
    let (file_count, applied_count) = if apply {
        let stats = WriteValues::run(&plan.writes)?;
        (stats.files_modified, stats.changes_applied)
    } else {
        (
            distinct_files(plan.writes.iter().map(|w| w.display_path.as_str())),
            0,
        )
    };

    let issues = plan
        .failures
        .iter()
        .cloned()
        .map(Issue::ExtractionFailed)
        .collect();

    Ok(finish(
        kind,
        CommandSummary::Repair(RepairSummary {
            writes: plan.writes,
            failures: plan.failures,
            skipped: plan.skipped,
            file_count,
            applied_count,
            is_apply: apply,
        }),
        issues,
        false,
    ))
}

/// Number of distinct files among `paths`.
pub fn distinct_files<'a>(paths: impl IntoIterator<Item = &'a str>) -> usize {
    paths.into_iter().collect::<BTreeSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{InitSummary, VerifySummary};
    use crate::issues::{DocumentMissingIssue, UnmappedPageIssue};

    #[test]
    fn test_finish_counts_and_sorts() {
        let issues = vec![
            Issue::UnmappedPage(UnmappedPageIssue {
                file_path: "paginas/pt/z.html".to_string(),
                key_count: 2,
            }),
            Issue::DocumentMissing(DocumentMissingIssue {
                page_id: "m1-p1".to_string(),
                file_path: "paginas/pt/a.html".to_string(),
            }),
        ];

        let result = finish(
            CommandKind::Verify,
            CommandSummary::Verify(VerifySummary {
                pages_checked: 1,
                stores_checked: 0,
            }),
            issues,
            true,
        );

        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 1);
        assert!(matches!(result.issues[0], Issue::DocumentMissing(_)));
        assert_eq!(result.pending_changes, 0);
    }

    #[test]
    fn test_finish_counts_init_error() {
        let result = finish(
            CommandKind::Init,
            CommandSummary::Init(InitSummary {
                created: false,
                error: Some("exists".to_string()),
            }),
            Vec::new(),
            true,
        );
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_distinct_files() {
        assert_eq!(distinct_files(["a.json", "b.json", "a.json"]), 2);
    }
}
