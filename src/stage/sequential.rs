//! Run stages one after another.

use super::executor::Executor;
use super::unit::{SharedStage, Stage};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::Graph;

/// Runs its stages in order, stopping at the first error.
///
/// The failing stage's error is returned unchanged and later stages never
/// run. Drawing always shows every stage.
#[derive(Clone, Default)]
pub struct Sequential {
    name: String,
    stages: Vec<SharedStage>,
}

impl Sequential {
    /// Create a sequence of `stages`.
    pub fn new(stages: Vec<SharedStage>) -> Self {
        Self {
            name: String::new(),
            stages,
        }
    }

    /// Give the sequence a label for executors and logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of stages in the sequence.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the sequence has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Stage for Sequential {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        for stage in &self.stages {
            executor.run(stage.as_ref(), ctx)?;
        }
        Ok(())
    }

    fn draw(&self, graph: &mut dyn Graph) {
        for stage in &self.stages {
            stage.draw(graph);
        }
    }
}

/// Shorthand for [`Sequential::new`].
pub fn sequential(stages: Vec<SharedStage>) -> Sequential {
    Sequential::new(stages)
}
