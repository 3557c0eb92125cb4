//! Command-line interface for phasegraph.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, DrawArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
