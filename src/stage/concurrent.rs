//! Run stages at the same time.

use super::executor::Executor;
use super::unit::{SharedStage, Stage};
use crate::concurrency::spawn_async;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::{add_concurrency_with, Graph};

/// Runs every stage on its own thread and waits for all of them.
///
/// A failing stage does not stop the others. The error returned follows
/// [`spawn_async`]: the last branch to fail wins.
#[derive(Clone, Default)]
pub struct Concurrent {
    name: String,
    stages: Vec<SharedStage>,
}

impl Concurrent {
    /// Create a concurrent block of `stages`.
    pub fn new(stages: Vec<SharedStage>) -> Self {
        Self {
            name: String::new(),
            stages,
        }
    }

    /// Give the block a label for executors and logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the block has no branches.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Stage for Concurrent {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        spawn_async(self.stages.len(), |index| {
            executor.run(self.stages[index].as_ref(), ctx)
        })
    }

    fn draw(&self, graph: &mut dyn Graph) {
        add_concurrency_with(
            graph,
            self.stages
                .iter()
                .map(|stage| move |g: &mut dyn Graph| stage.draw(g)),
        );
    }
}

/// Shorthand for [`Concurrent::new`].
pub fn concurrent(stages: Vec<SharedStage>) -> Concurrent {
    Concurrent::new(stages)
}
