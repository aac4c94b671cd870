use anyhow::Result;

use super::super::{
    actions::{Action, RemoveSubtrees},
    args::ApplyArgs,
};
use super::helper::{distinct_files, finish};
use super::{CleanSummary, CommandKind, CommandResult, CommandSummary};
use crate::{core::CheckContext, rules::check_sentinel_subtrees};

/// Remove placeholder-only subtrees from the stores of every target locale.
pub fn clean(args: ApplyArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;
    let subtrees = check_sentinel_subtrees(&ctx);

    let (file_count, applied_count) = if args.apply {
        let stats = RemoveSubtrees::run(&subtrees)?;
        (stats.files_modified, stats.changes_applied)
    } else {
        (
            distinct_files(subtrees.iter().map(|s| s.display_path.as_str())),
            0,
        )
    };

    Ok(finish(
        CommandKind::Clean,
        CommandSummary::Clean(CleanSummary {
            subtrees,
            file_count,
            applied_count,
            is_apply: args.apply,
        }),
        Vec::new(),
        false,
    ))
}
