//! Running typed steps inside a stage tree.

use std::any::{type_name, Any};
use std::sync::Arc;

use super::unit::{SharedStep, Step};
use crate::context::{ExecutionContext, Tag};
use crate::error::{PhaseError, Result};
use crate::graph::Graph;
use crate::stage::{Executor, Stage};

/// A stage that reads its step's input from one context tag and stores the
/// output under another.
///
/// ```
/// use phasegraph::step::{step, StepStage};
/// use phasegraph::{DefaultExecutor, ExecutionContext, Executor};
///
/// let stage = StepStage::new(step("double", |n: u32| Ok(n * 2)), "n", "doubled");
/// let ctx = ExecutionContext::new();
/// ctx.set("n", 21u32);
/// DefaultExecutor.run(&stage, &ctx).unwrap();
/// assert_eq!(ctx.get_u32("doubled"), (42, true));
/// ```
pub struct StepStage<I, O> {
    step: SharedStep<I, O>,
    input: Tag,
    output: Tag,
}

impl<I, O> StepStage<I, O> {
    /// Wrap `step`, wiring it to the `input` and `output` tags.
    pub fn new<S>(step: S, input: impl Into<Tag>, output: impl Into<Tag>) -> Self
    where
        S: Step<I, O> + 'static,
    {
        Self {
            step: Arc::new(step),
            input: input.into(),
            output: output.into(),
        }
    }
}

impl<I, O> Stage for StepStage<I, O>
where
    I: Any + Clone + Send + Sync,
    O: Any + Send + Sync,
{
    fn name(&self) -> &str {
        self.step.name()
    }

    fn run(&self, _executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        let value = ctx.get(&self.input).ok_or_else(|| PhaseError::MissingValue {
            tag: self.input.to_string(),
        })?;
        let input = value
            .downcast_ref::<I>()
            .cloned()
            .ok_or_else(|| PhaseError::TypeMismatch {
                tag: self.input.to_string(),
                expected: type_name::<I>(),
            })?;

        let output = self.step.run(input)?;
        ctx.set(self.output.clone(), output);
        Ok(())
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.step.draw(graph);
    }
}
