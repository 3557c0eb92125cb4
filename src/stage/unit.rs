//! The untyped unit of work and its leaf implementation.

use std::fmt;
use std::sync::Arc;

use super::executor::Executor;
use super::lifecycle::{After, Before};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::Graph;

/// A stage shared between combinators.
pub type SharedStage = Arc<dyn Stage>;

/// A runnable, drawable unit operating on an [`ExecutionContext`].
///
/// Combinators implement `Stage` by running their children through the
/// [`Executor`] they are handed, so an executor sees every unit of the tree.
/// A stage never mutates its own structure while running.
pub trait Stage: Send + Sync {
    /// The stage's label; empty for anonymous stages.
    fn name(&self) -> &str {
        ""
    }

    /// Run the stage.
    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()>;

    /// Describe the stage to a diagram visitor.
    fn draw(&self, graph: &mut dyn Graph);
}

impl<S: Stage + ?Sized> Stage for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        (**self).run(executor, ctx)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        (**self).draw(graph)
    }
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        (**self).run(executor, ctx)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        (**self).draw(graph)
    }
}

type Action = Arc<dyn Fn(&ExecutionContext) -> Result<()> + Send + Sync>;

/// A leaf stage running a closure against the context.
#[derive(Clone)]
pub struct Activity {
    name: String,
    action: Action,
}

impl Activity {
    /// Create a named activity.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }
}

impl Stage for Activity {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        (self.action)(ctx)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        graph.add_activity(&self.name);
    }
}

impl fmt::Debug for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activity").field("name", &self.name).finish()
    }
}

/// Shorthand for [`Activity::new`].
pub fn activity<F>(name: impl Into<String>, action: F) -> Activity
where
    F: Fn(&ExecutionContext) -> Result<()> + Send + Sync + 'static,
{
    Activity::new(name, action)
}

/// Combinator methods available on every stage.
pub trait StageExt: Stage + Sized + 'static {
    /// Wrap the stage in an `Arc` so it can be shared.
    fn shared(self) -> SharedStage {
        Arc::new(self)
    }

    /// Run `hook` before the stage; an error skips the stage.
    fn before<F>(self, hook: F) -> Before
    where
        F: Fn(&dyn Stage, &ExecutionContext) -> Result<()> + Send + Sync + 'static,
    {
        Before::new(self, hook)
    }

    /// Run `hook` after the stage with its result; the hook's return value
    /// replaces that result.
    fn after<F>(self, hook: F) -> After
    where
        F: Fn(&dyn Stage, &ExecutionContext, Result<()>) -> Result<()> + Send + Sync + 'static,
    {
        After::new(self, hook)
    }
}

impl<S: Stage + 'static> StageExt for S {}
