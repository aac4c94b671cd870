use anyhow::Result;

use super::super::args::CheckArgs;
use super::{
    helper::finish,
    {CheckSummary, CommandKind, CommandResult, CommandSummary},
};
use crate::{
    core::{AuditReport, CheckContext},
    issues::Issue,
    rules::{audit_locale, index_pages},
};

pub fn check(args: CheckArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;
    let manifest = ctx.manifest()?;
    let index = index_pages(&ctx, ctx.documents(), manifest);

    let mut issues: Vec<Issue> = index
        .unmapped
        .iter()
        .cloned()
        .map(Issue::UnmappedPage)
        .collect();
    let mut locales = Vec::new();

    for locale in ctx.target_locales() {
        let audit = audit_locale(&ctx, &index, &locale);
        if !audit.exists {
            tracing::warn!("no stores for locale '{}'", locale);
        }
        tracing::debug!(
            locale = %locale,
            unresolved = audit.total_unresolved(),
            "audited locale"
        );
        issues.extend(audit.issues(&ctx));
        locales.push(audit.to_report());
    }

    let report_path = match args.output {
        Some(output) => {
            let path = output.unwrap_or_else(|| ctx.report_path());
            AuditReport {
                locales: locales.clone(),
            }
            .save(&path)?;
            Some(path)
        }
        None => None,
    };

    Ok(finish(
        CommandKind::Check,
        CommandSummary::Check(CheckSummary {
            locales,
            pages_checked: index.pages.len(),
            report_path,
        }),
        issues,
        true,
    ))
}
