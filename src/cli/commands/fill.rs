use std::collections::HashSet;

use anyhow::{Context, Result, bail};

use super::super::args::FillArgs;
use super::{CommandKind, CommandResult, helper::finish_repair};
use crate::{
    core::{CheckContext, TranslationStore},
    rules::{
        RepairPlan, audit_locale, index_pages, plan_fill, plan_store_fill, targets_from_audit,
    },
};

/// Repair unresolved keys with values copied from a reference store.
///
/// With `--all`, placeholder leaves no markup references are filled as well.
pub fn fill(args: FillArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;

    let Some(reference_path) = args.from.clone().or_else(|| ctx.reference_store_path()) else {
        bail!("No reference store: pass --from or set 'referenceStore' in the config file");
    };
    let reference = TranslationStore::load(&reference_path).with_context(|| {
        format!(
            "Failed to load reference store: {}",
            reference_path.display()
        )
    })?;
    tracing::debug!("using reference store {}", reference_path.display());

    let index = index_pages(&ctx, ctx.documents(), ctx.manifest()?);
    let locales = ctx.target_locales_or_source();
    let mut plan = RepairPlan::default();
    let mut handled = HashSet::new();
    for locale in &locales {
        let audit = audit_locale(&ctx, &index, locale);
        let targets = targets_from_audit(&audit);
        handled.extend(targets.iter().flat_map(|target| {
            target
                .keys
                .iter()
                .map(|key| (target.store_path.clone(), key.lookup_path.clone()))
        }));
        plan.merge(plan_fill(&ctx, &targets, &reference));
    }

    if args.all {
        plan.merge(plan_store_fill(
            &ctx,
            &locales,
            &reference,
            &reference_path,
            &handled,
        ));
    }

    finish_repair(CommandKind::Fill, plan, args.apply)
}
