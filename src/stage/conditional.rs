//! Choose between two stages.

use super::executor::Executor;
use super::unit::{SharedStage, Stage};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::graph::Graph;
use crate::statement::{self, Statement};

/// Runs one of two stages depending on a [`Statement`] about the context.
///
/// The statement is evaluated once per run; a missing statement counts as
/// `false`. A missing branch means nothing runs and the run succeeds.
/// Drawing shows both branches regardless of which would run.
#[derive(Clone)]
pub struct Conditional {
    statement: Option<Statement<ExecutionContext>>,
    then: Option<SharedStage>,
    otherwise: Option<SharedStage>,
}

impl Conditional {
    /// Create a conditional on `statement` with no branches yet.
    pub fn new(statement: Statement<ExecutionContext>) -> Self {
        Self::from_parts(Some(statement), None, None)
    }

    /// Create a conditional from optional parts.
    pub fn from_parts(
        statement: Option<Statement<ExecutionContext>>,
        then: Option<SharedStage>,
        otherwise: Option<SharedStage>,
    ) -> Self {
        Self {
            statement,
            then,
            otherwise,
        }
    }

    /// Run `stage` only when `statement` holds.
    pub fn optional(statement: Statement<ExecutionContext>, stage: SharedStage) -> Self {
        Self::from_parts(Some(statement), Some(stage), None)
    }

    /// Set the stage run when the statement holds.
    pub fn then(mut self, stage: SharedStage) -> Self {
        self.then = Some(stage);
        self
    }

    /// Set the stage run when the statement does not hold.
    pub fn otherwise(mut self, stage: SharedStage) -> Self {
        self.otherwise = Some(stage);
        self
    }
}

impl Stage for Conditional {
    fn name(&self) -> &str {
        statement::label(self.statement.as_ref())
    }

    fn run(&self, executor: &dyn Executor, ctx: &ExecutionContext) -> Result<()> {
        let branch = if statement::evaluate(self.statement.as_ref(), ctx) {
            &self.then
        } else {
            &self.otherwise
        };
        match branch {
            Some(stage) => executor.run(stage.as_ref(), ctx),
            None => Ok(()),
        }
    }

    fn draw(&self, graph: &mut dyn Graph) {
        graph.add_decision(
            statement::label(self.statement.as_ref()),
            &|g: &mut dyn Graph| {
                if let Some(stage) = &self.then {
                    stage.draw(g);
                }
            },
            &|g: &mut dyn Graph| {
                if let Some(stage) = &self.otherwise {
                    stage.draw(g);
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Uml;
    use crate::stage::{activity, DefaultExecutor, StageExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter(name: &'static str, calls: &Arc<AtomicUsize>) -> SharedStage {
        let calls = Arc::clone(calls);
        activity(name, move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .shared()
    }

    fn flag_is_set() -> Statement<ExecutionContext> {
        Statement::new("flag set?", |ctx: &ExecutionContext| ctx.get_bool("flag").0)
    }

    #[test]
    fn exactly_one_branch_runs() {
        for flag in [true, false] {
            let yes = Arc::new(AtomicUsize::new(0));
            let no = Arc::new(AtomicUsize::new(0));
            let stage = Conditional::new(flag_is_set())
                .then(counter("yes", &yes))
                .otherwise(counter("no", &no));

            let ctx = ExecutionContext::new();
            ctx.set("flag", flag);
            stage.run(&DefaultExecutor, &ctx).unwrap();

            assert_eq!(yes.load(Ordering::SeqCst), usize::from(flag));
            assert_eq!(no.load(Ordering::SeqCst), usize::from(!flag));
        }
    }

    #[test]
    fn statement_is_evaluated_once() {
        let evaluations = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&evaluations);
        let statement = Statement::new("counted?", move |_: &ExecutionContext| {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Conditional::optional(statement, counter("run", &calls));

        stage.run(&DefaultExecutor, &ExecutionContext::new()).unwrap();
        assert_eq!(evaluations.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_statement_takes_else_branch() {
        let yes = Arc::new(AtomicUsize::new(0));
        let no = Arc::new(AtomicUsize::new(0));
        let stage = Conditional::from_parts(
            None,
            Some(counter("yes", &yes)),
            Some(counter("no", &no)),
        );
        stage.run(&DefaultExecutor, &ExecutionContext::new()).unwrap();
        assert_eq!(yes.load(Ordering::SeqCst), 0);
        assert_eq!(no.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_branch_succeeds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Conditional::optional(flag_is_set(), counter("yes", &calls));
        stage.run(&DefaultExecutor, &ExecutionContext::new()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn draws_both_branches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Conditional::new(flag_is_set())
            .then(counter("on", &calls))
            .otherwise(counter("off", &calls));
        let mut uml = Uml::new();
        stage.draw(&mut uml);
        assert_eq!(
            uml.body(),
            "if (flag set?) then (yes)\n:on;\nelse (no)\n:off;\nendif\n"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_branch_draws_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Conditional::optional(flag_is_set(), counter("on", &calls));
        let mut uml = Uml::new();
        stage.draw(&mut uml);
        assert_eq!(uml.body(), "if (flag set?) then (yes)\n:on;\nelse (no)\nendif\n");
    }
}
