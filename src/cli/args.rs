//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Audit markup keys against every locale's stores
//! - `fix`: Extract missing source-locale values from the markup
//! - `fill`: Copy values from a reference store
//! - `placeholders`: Write the sentinel for every missing key
//! - `clean`: Remove placeholder-only subtrees from stores
//! - `verify`: Check that every manifest page has its markup and stores
//! - `init`: Create a `.pageglotrc.json` configuration file
//!
//! Every command that writes is a dry-run unless `--apply` is given.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Locale to process, can be repeated (default depends on the command)
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Save the audit report as JSON (default file: `reportPath` from config)
    #[arg(long, short, value_name = "FILE", num_args = 0..=1)]
    pub output: Option<Option<PathBuf>>,
}

#[derive(Debug, Args)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write values (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Repair the pages listed in a saved audit report instead of auditing again
    /// (default file: `reportPath` from config)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub report: Option<Option<PathBuf>>,
}

#[derive(Debug, Args)]
pub struct FillArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write values (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Reference store to copy values from (overrides `referenceStore` from config)
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Also fill placeholders anywhere in the stores, not only under keys the
    /// markup references
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually modify stores (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit markup keys against the stores of every locale
    Check(CheckArgs),
    /// Fill missing source-locale values with content extracted from the markup
    Fix(FixArgs),
    /// Fill missing values from a reference store
    Fill(FillArgs),
    /// Write the placeholder for every missing key
    Placeholders(ApplyArgs),
    /// Remove subtrees whose values are all placeholders
    Clean(ApplyArgs),
    /// Check that every manifest page has its markup file and stores
    Verify(VerifyArgs),
    /// Initialize a new .pageglotrc.json configuration file
    Init,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Check(args) => Some(&args.common),
            Command::Fix(args) => Some(&args.common),
            Command::Fill(args) => Some(&args.common),
            Command::Placeholders(args) | Command::Clean(args) => Some(&args.common),
            Command::Verify(args) => Some(&args.common),
            Command::Init => None,
        }
    }
}
