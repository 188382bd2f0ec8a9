use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, extract::extract, init::init, scan::scan},
    exit_status::ExitStatus,
};

/// Dispatches to the command handler for the parsed arguments.
pub fn run(Arguments { command, verbose }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Scan(cmd)) => scan(cmd, verbose),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
