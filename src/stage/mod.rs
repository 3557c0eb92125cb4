//! Untyped stages composed into pipelines.
//!
//! - [`Stage`] - A runnable, drawable unit over an [`ExecutionContext`](crate::ExecutionContext)
//! - [`CommandStage`] - A leaf running a shell command
//! - [`Executor`] - The seam every stage runs through
//! - [`Sequential`], [`Concurrent`], [`Conditional`] - Combinators
//! - [`Before`], [`After`] - Lifecycle decorators
//! - [`Pipeline`] - Root stage plus executor

pub mod command;
pub mod concurrent;
pub mod conditional;
pub mod executor;
pub mod lifecycle;
pub mod pipeline;
pub mod sequential;
pub mod unit;

pub use command::CommandStage;
pub use concurrent::{concurrent, Concurrent};
pub use conditional::Conditional;
pub use executor::{DefaultExecutor, Executor, TracingExecutor};
pub use lifecycle::{After, Before};
pub use pipeline::Pipeline;
pub use sequential::{sequential, Sequential};
pub use unit::{activity, Activity, SharedStage, Stage, StageExt};
