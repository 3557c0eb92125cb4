//! Top-level driver for a stage tree.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::executor::{DefaultExecutor, Executor};
use super::lifecycle::{After, Before};
use super::unit::{SharedStage, Stage};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::{Graph, RenderOptions, Sink, Uml};

/// A root stage paired with the executor that runs it.
///
/// A pipeline is built once and can be run any number of times. Each run
/// uses the context it is given; pipelines never reset a context.
///
/// ```
/// use phasegraph::{activity, Concurrent, ExecutionContext, Pipeline, Sequential, StageExt};
///
/// let pipeline = Pipeline::new(Sequential::new(vec![
///     activity("prepare", |ctx| {
///         ctx.set("prepared", true);
///         Ok(())
///     })
///     .shared(),
///     Concurrent::new(vec![
///         activity("left", |_| Ok(())).shared(),
///         activity("right", |_| Ok(())).shared(),
///     ])
///     .shared(),
/// ]));
///
/// let ctx = ExecutionContext::new();
/// pipeline.run(&ctx).unwrap();
/// assert_eq!(ctx.get_bool("prepared"), (true, true));
/// ```
#[derive(Clone)]
pub struct Pipeline {
    root: SharedStage,
    executor: Arc<dyn Executor>,
}

impl Pipeline {
    /// Create a pipeline running `root` with the [`DefaultExecutor`].
    pub fn new<S: Stage + 'static>(root: S) -> Self {
        Self::from_shared(Arc::new(root))
    }

    /// Create a pipeline from an already shared root stage.
    pub fn from_shared(root: SharedStage) -> Self {
        Self {
            root,
            executor: Arc::new(DefaultExecutor),
        }
    }

    /// Replace the executor.
    pub fn with_executor<E: Executor + 'static>(mut self, executor: E) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Run `hook` before the whole pipeline; an error skips the run.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Stage, &ExecutionContext) -> Result<()> + Send + Sync + 'static,
    {
        self.root = Arc::new(Before::new(self.root, hook));
        self
    }

    /// Run `hook` after the whole pipeline with its result.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Stage, &ExecutionContext, Result<()>) -> Result<()> + Send + Sync + 'static,
    {
        self.root = Arc::new(After::new(self.root, hook));
        self
    }

    /// The root stage.
    pub fn root(&self) -> &dyn Stage {
        self.root.as_ref()
    }

    /// Run the pipeline against `ctx` with the configured executor.
    pub fn run(&self, ctx: &ExecutionContext) -> Result<()> {
        self.run_with(self.executor.as_ref(), ctx)
    }

    /// Run the pipeline with a one-off executor.
    pub fn run_with(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        debug!("Running pipeline '{}'", self.root.name());
        executor.run(self.root.as_ref(), ctx)
    }

    /// Run the pipeline against a fresh context and return it.
    pub fn run_fresh(&self) -> Result<ExecutionContext> {
        let ctx = ExecutionContext::new();
        self.run(&ctx)?;
        Ok(ctx)
    }

    /// Describe the pipeline to a diagram visitor.
    pub fn draw(&self, graph: &mut dyn Graph) {
        self.root.draw(graph);
    }

    /// Draw the pipeline as a PlantUML diagram and render it into `sink`.
    pub fn render<S: Sink + ?Sized>(&self, options: RenderOptions, sink: &mut S) -> Result<()> {
        let mut uml = Uml::with_options(options);
        self.draw(&mut uml);
        uml.render(sink)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("root", &self.root.name())
            .finish()
    }
}
