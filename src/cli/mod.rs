//! Command-line interface layer.
//!
//! Parses arguments, runs one command, prints its report and maps the result
//! to an exit status.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

mod actions;
pub mod args;
pub mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(ExitStatus::from(&result))
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise `-v` enables debug logs for this crate and the
/// default shows warnings only.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pageglot=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
