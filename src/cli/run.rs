//! Dispatch of parsed arguments to command handlers.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, clean::clean, fill::fill, fix::fix, init::init,
        placeholders::placeholders, verify::verify,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(args)) => check(args),
        Some(Command::Fix(args)) => fix(args),
        Some(Command::Fill(args)) => fill(args),
        Some(Command::Placeholders(args)) => placeholders(args),
        Some(Command::Clean(args)) => clean(args),
        Some(Command::Verify(args)) => verify(args),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
