//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Move one string into the resource file and print its replacement
//! - `scan`: Find marker-tagged literals in source files and extract them
//! - `check`: Check placeholder metadata consistency of the resource file
//! - `init`: Initialize arbx configuration and an empty resource file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
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
}

/// Arguments shared by commands that touch the resource file.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Resource (ARB) file path (overrides config file)
    #[arg(long, env = "ARBX_RESOURCE")]
    pub resource: Option<PathBuf>,

    /// Accessor used in replacement text (overrides config file)
    #[arg(long)]
    pub lookup_prefix: Option<String>,

    /// Do not run the code generation command after writing
    #[arg(long)]
    pub no_codegen: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// The selected text, quotes included or not
    pub text: String,

    /// Variable name for the key; namespaced with --context
    #[arg(short, long)]
    pub key: Option<String>,

    /// Context label for the key, e.g. the source file name
    #[arg(short, long)]
    pub context: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Actually extract strings and rewrite sources (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Marker token that tags literals (overrides config file)
    #[arg(long)]
    pub marker: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract one string into the resource file and print its replacement
    Extract(ExtractCommand),
    /// Find marker-tagged string literals and extract them
    Scan(ScanCommand),
    /// Check that placeholder metadata matches the translation entries
    Check(CheckCommand),
    /// Initialize a new .arbxrc.json configuration file and resource file
    Init,
}
