//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::graph::Format;

/// phasegraph - Run and draw step/stage pipelines.
#[derive(Debug, Parser)]
#[command(name = "phasegraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the pipeline described by a definition file
    Run(RunArgs),

    /// Render the pipeline as an activity diagram
    Draw(DrawArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Pipeline definition file
    pub file: PathBuf,
}

/// Arguments for the `draw` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DrawArgs {
    /// Pipeline definition file
    pub file: PathBuf,

    /// Output format (overrides the file's render section)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// PlantUML server base URL
    #[arg(long, env = "PHASEGRAPH_BASE_URL")]
    pub base_url: Option<String>,

    /// Write the diagram to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
