//! The seam through which every stage runs.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, debug_span, warn};

use super::unit::Stage;
use crate::context::ExecutionContext;
use crate::error::Result;

/// Runs stages on behalf of a pipeline.
///
/// Every combinator routes its children through the executor it was given,
/// which makes the executor the single place for cross-cutting behaviour
/// such as tracing, metrics or circuit breaking. An implementation must
/// eventually call `stage.run(self, ctx)` (passing itself on) for the stage
/// to make progress.
pub trait Executor: Send + Sync {
    /// Run `stage` against `ctx`.
    fn run(&self, stage: &dyn Stage, ctx: &ExecutionContext) -> Result<()>;
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn run(&self, stage: &dyn Stage, ctx: &ExecutionContext) -> Result<()> {
        (**self).run(stage, ctx)
    }
}

/// Runs each stage directly, with no decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExecutor;

impl Executor for DefaultExecutor {
    fn run(&self, stage: &dyn Stage, ctx: &ExecutionContext) -> Result<()> {
        stage.run(self, ctx)
    }
}

/// Runs each stage inside a tracing span and logs its outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExecutor;

impl Executor for TracingExecutor {
    fn run(&self, stage: &dyn Stage, ctx: &ExecutionContext) -> Result<()> {
        let span = debug_span!("stage", name = stage.name());
        let _entered = span.enter();

        let started = Instant::now();
        let result = stage.run(self, ctx);
        let elapsed = started.elapsed();

        match &result {
            Ok(()) => debug!("Stage '{}' finished in {:?}", stage.name(), elapsed),
            Err(e) => warn!("Stage '{}' failed after {:?}: {}", stage.name(), elapsed, e),
        }
        result
    }
}
