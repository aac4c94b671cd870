use anyhow::Result;

use super::super::args::FixArgs;
use super::{CommandKind, CommandResult, helper::finish_repair};
use crate::{
    core::{AuditReport, CheckContext},
    rules::{
        RepairPlan, audit_locale, index_pages, plan_extraction, targets_from_audit,
        targets_from_report,
    },
};

/// Repair unresolved keys with content extracted from the markup.
///
/// Works on the source locale unless `--locale` says otherwise. With
/// `--report`, the pages listed in a saved audit report are repaired instead
/// of auditing again.
pub fn fix(args: FixArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;
    let documents = ctx.documents();
    let mut plan = RepairPlan::default();

    match args.report {
        Some(report) => {
            let path = report.unwrap_or_else(|| ctx.report_path());
            let report = AuditReport::load(&path, ctx.source_locale())?;
            for locale in ctx.target_locales_or_source() {
                let Some(locale_report) = report.locale(&locale) else {
                    tracing::warn!("{} has no results for locale '{}'", path.display(), locale);
                    continue;
                };
                let targets = targets_from_report(&ctx, locale_report, documents);
                plan.merge(plan_extraction(&ctx, &targets));
            }
        }
        None => {
            let index = index_pages(&ctx, documents, ctx.manifest()?);
            for locale in ctx.target_locales_or_source() {
                let audit = audit_locale(&ctx, &index, &locale);
                plan.merge(plan_extraction(&ctx, &targets_from_audit(&audit)));
            }
        }
    }

    finish_repair(CommandKind::Fix, plan, args.apply)
}
