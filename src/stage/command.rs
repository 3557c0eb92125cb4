//! Leaf stage running a shell command.

use std::path::PathBuf;

use tracing::{debug, warn};

use super::executor::Executor;
use super::unit::Stage;
use crate::config::resolve_string;
use crate::context::{ExecutionContext, Tag};
use crate::error::{PhaseError, Result};
use crate::graph::Graph;
use crate::shell::{execute, CommandOptions};

/// Runs a command through the shell after interpolating `${tag}`
/// references from the context.
///
/// A non-zero exit is [`PhaseError::CommandFailed`]. When a capture tag is
/// set, the trimmed stdout is stored under it as a `String`.
#[derive(Debug, Clone)]
pub struct CommandStage {
    name: String,
    command: String,
    capture: Option<Tag>,
    cwd: Option<PathBuf>,
}

impl CommandStage {
    /// Create a named command stage.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            capture: None,
            cwd: None,
        }
    }

    /// Store the command's trimmed stdout under `tag`.
    pub fn capture(mut self, tag: impl Into<Tag>) -> Self {
        self.capture = Some(tag.into());
        self
    }

    /// Run the command in `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The command line before interpolation.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Stage for CommandStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        let command = resolve_string(&self.command, ctx)?;
        debug!("Running '{}': {}", self.name, command);

        let options = CommandOptions {
            cwd: self.cwd.clone(),
            ..CommandOptions::captured()
        };
        let result = execute(&command, &options)?;

        if !result.success {
            if !result.stderr.trim().is_empty() {
                warn!("'{}' stderr: {}", self.name, result.stderr.trim_end());
            }
            return Err(PhaseError::CommandFailed {
                command,
                code: result.exit_code,
                source: None,
            });
        }

        if let Some(tag) = &self.capture {
            ctx.set(tag.clone(), result.stdout.trim().to_string());
        }
        Ok(())
    }

    fn draw(&self, graph: &mut dyn Graph) {
        graph.add_activity(&self.name);
    }
}
