//! Before/after hooks around a stage.
//!
//! Hooks nest: wrapping a stage in several decorators runs the outermost
//! `before` first and the outermost `after` last.

use std::sync::Arc;

use super::executor::Executor;
use super::unit::{SharedStage, Stage};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::Graph;

type BeforeHook = Arc<dyn Fn(&dyn Stage, &ExecutionContext) -> Result<()> + Send + Sync>;
type AfterHook =
    Arc<dyn Fn(&dyn Stage, &ExecutionContext, Result<()>) -> Result<()> + Send + Sync>;

/// Runs a hook before the wrapped stage. When the hook fails the stage is
/// skipped and the hook's error is returned.
#[derive(Clone)]
pub struct Before {
    inner: SharedStage,
    hook: BeforeHook,
}

impl Before {
    /// Wrap `inner` with `hook`.
    pub fn new<S, F>(inner: S, hook: F) -> Self
    where
        S: Stage + 'static,
        F: Fn(&dyn Stage, &ExecutionContext) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(inner),
            hook: Arc::new(hook),
        }
    }
}

impl Stage for Before {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        (self.hook)(self.inner.as_ref(), ctx)?;
        self.inner.run(executor, ctx)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.inner.draw(graph);
    }
}

/// Runs a hook after the wrapped stage, handing it the stage's result.
///
/// Whatever the hook returns becomes the result, so it can pass an error
/// through, replace it, or recover from it.
#[derive(Clone)]
pub struct After {
    inner: SharedStage,
    hook: AfterHook,
}

impl After {
    /// Wrap `inner` with `hook`.
    pub fn new<S, F>(inner: S, hook: F) -> Self
    where
        S: Stage + 'static,
        F: Fn(&dyn Stage, &ExecutionContext, Result<()>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(inner),
            hook: Arc::new(hook),
        }
    }
}

impl Stage for After {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        let result = self.inner.run(executor, ctx);
        (self.hook)(self.inner.as_ref(), ctx, result)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.inner.draw(graph);
    }
}
