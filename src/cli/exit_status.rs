use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing to report, nothing left to do
/// - `Failure` (1): errors found, or a dry-run found changes to make
/// - `Error` (2): the command could not run (config, manifest, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        let failed_check = result.exit_on_errors && result.error_count > 0;
        if failed_check || result.pending_changes > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
