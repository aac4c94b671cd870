use anyhow::Result;

use super::super::args::ApplyArgs;
use super::{CommandKind, CommandResult, helper::finish_repair};
use crate::{
    core::CheckContext,
    rules::{RepairPlan, audit_locale, index_pages, plan_placeholders, targets_from_audit},
};

/// Write the placeholder into every missing key of every target locale.
pub fn placeholders(args: ApplyArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;
    let index = index_pages(&ctx, ctx.documents(), ctx.manifest()?);

    let mut plan = RepairPlan::default();
    for locale in ctx.target_locales() {
        let audit = audit_locale(&ctx, &index, &locale);
        if !audit.exists {
            tracing::warn!("no stores for locale '{}', skipping", locale);
            continue;
        }
        plan.merge(plan_placeholders(&ctx, &targets_from_audit(&audit)));
    }

    finish_repair(CommandKind::Placeholders, plan, args.apply)
}
