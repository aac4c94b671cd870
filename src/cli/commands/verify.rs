use anyhow::Result;

use super::super::args::VerifyArgs;
use super::helper::finish;
use super::{CommandKind, CommandResult, CommandSummary, VerifySummary};
use crate::{core::CheckContext, rules::check_integrity};

pub fn verify(args: VerifyArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args.common)?;
    let result = check_integrity(&ctx)?;

    Ok(finish(
        CommandKind::Verify,
        CommandSummary::Verify(VerifySummary {
            pages_checked: result.pages_checked,
            stores_checked: result.stores_checked,
        }),
        result.issues,
        true,
    ))
}
