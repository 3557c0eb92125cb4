//! phasegraph - Composable step/stage pipelines.
//!
//! Workflows are described as trees of units of work, run through a
//! pluggable [`Executor`], and drawn as PlantUML activity diagrams from the
//! same tree.
//!
//! # Modules
//!
//! - [`step`] - Typed `I -> O` steps and their combinators
//! - [`stage`] - Untyped stages over a shared [`ExecutionContext`], and [`Pipeline`]
//! - [`concurrency`] - Fan-out with error aggregation
//! - [`context`] - Thread-safe heterogeneous key-value store
//! - [`statement`] - Named predicates for branching
//! - [`graph`] - Diagram visitor, PlantUML encoding and rendering
//! - [`config`] - YAML pipeline definitions
//! - [`shell`] - Shell command execution
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use phasegraph::{activity, sequential, Conditional, ExecutionContext, Pipeline, StageExt, Statement};
//!
//! let pipeline = Pipeline::new(sequential(vec![
//!     activity("measure", |ctx| {
//!         ctx.set("cups", 3_u32);
//!         Ok(())
//!     })
//!     .shared(),
//!     Conditional::new(Statement::new("enough?", |ctx: &ExecutionContext| {
//!         ctx.get_u32("cups").0 >= 2
//!     }))
//!     .then(activity("brew", |ctx| {
//!         ctx.set("brewed", true);
//!         Ok(())
//!     })
//!     .shared())
//!     .shared(),
//! ]));
//!
//! let ctx = pipeline.run_fresh().unwrap();
//! assert_eq!(ctx.get_bool("brewed"), (true, true));
//! ```

pub mod cli;
pub mod concurrency;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod shell;
pub mod stage;
pub mod statement;
pub mod step;

pub use concurrency::spawn_async;
pub use context::{ExecutionContext, Tag};
pub use error::{PhaseError, Result};
pub use graph::{Graph, Uml};
pub use stage::{
    activity, concurrent, sequential, Activity, CommandStage, Concurrent, Conditional,
    DefaultExecutor, Executor, Pipeline, Sequential, SharedStage, Stage, StageExt,
    TracingExecutor,
};
pub use statement::Statement;
