//! Run command implementation.
//!
//! The `phasegraph run` command executes a pipeline definition and prints
//! every value its `run` nodes captured.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::cli::args::RunArgs;
use crate::config::{build_pipeline, load_config};
use crate::error::Result;
use crate::graph::Sink;
use crate::stage::TracingExecutor;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, out: &mut dyn Sink) -> Result<CommandResult> {
        let config = load_config(&self.args.file)?;
        let pipeline =
            build_pipeline(&config, definition_dir(&self.args.file)).with_executor(TracingExecutor);

        let name = config.name.as_deref().unwrap_or("pipeline");
        tracing::info!("Running {}", name);
        let started = Instant::now();
        let ctx = pipeline.run_fresh()?;
        tracing::info!("Finished {} in {:?}", name, started.elapsed());

        for tag in ctx.tags() {
            let (value, _) = ctx.get_string(&tag);
            writeln!(out, "{}={}", tag, value)?;
        }
        out.flush()?;
        Ok(CommandResult::success())
    }
}

/// Directory holding the definition, where its commands run.
pub(crate) fn definition_dir(file: &Path) -> Option<&Path> {
    file.parent().filter(|dir| !dir.as_os_str().is_empty())
}
