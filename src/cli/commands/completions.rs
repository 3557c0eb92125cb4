//! `phasegraph completions <SHELL>`: print a completion script for the CLI.

use std::io::Write;

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::{PhaseError, Result};
use crate::graph::Sink;

use super::dispatcher::{Command, CommandResult};

/// Writes the completion script for one shell.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, out: &mut dyn Sink) -> Result<CommandResult> {
        let mut cli = Cli::command();
        // Scripts are keyed on the name clap derives for the binary.
        let bin_name = cli.get_name().to_string();
        tracing::debug!("Generating {} completions for {}", self.args.shell, bin_name);

        clap_complete::generate(self.args.shell, &mut cli, bin_name, &mut *out);
        out.flush().map_err(PhaseError::Write)?;
        Ok(CommandResult::success())
    }
}
