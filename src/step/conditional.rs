//! Typed branching on a [`Statement`] about the input.

use std::sync::Arc;

use super::unit::{SharedStep, Step};
use crate::error::Result;
use crate::graph::Graph;
use crate::statement::{self, Statement};

/// Runs `then` when the statement holds for the input, `otherwise` when it
/// does not.
///
/// A missing statement counts as `false`. When the chosen branch is missing
/// nothing runs and the output is `O::default()`.
pub struct If<I, O> {
    statement: Option<Statement<I>>,
    then: Option<SharedStep<I, O>>,
    otherwise: Option<SharedStep<I, O>>,
}

impl<I, O> If<I, O> {
    /// Branch on `statement`. Both branches start out empty.
    pub fn new(statement: Statement<I>) -> Self {
        Self::from_parts(Some(statement), None, None)
    }

    /// Build from optional parts.
    pub fn from_parts(
        statement: Option<Statement<I>>,
        then: Option<SharedStep<I, O>>,
        otherwise: Option<SharedStep<I, O>>,
    ) -> Self {
        Self {
            statement,
            then,
            otherwise,
        }
    }

    /// Set the step run when the statement holds.
    pub fn then<S: Step<I, O> + 'static>(mut self, step: S) -> Self {
        self.then = Some(Arc::new(step));
        self
    }

    /// Set the step run when the statement does not hold.
    pub fn otherwise<S: Step<I, O> + 'static>(mut self, step: S) -> Self {
        self.otherwise = Some(Arc::new(step));
        self
    }
}

impl<I, O> Clone for If<I, O> {
    fn clone(&self) -> Self {
        Self {
            statement: self.statement.clone(),
            then: self.then.clone(),
            otherwise: self.otherwise.clone(),
        }
    }
}

impl<I, O: Default> Step<I, O> for If<I, O> {
    fn name(&self) -> &str {
        statement::label(self.statement.as_ref())
    }

    fn run(&self, input: I) -> Result<O> {
        let branch = if statement::evaluate(self.statement.as_ref(), &input) {
            &self.then
        } else {
            &self.otherwise
        };
        match branch {
            Some(step) => step.run(input),
            None => Ok(O::default()),
        }
    }

    fn draw(&self, graph: &mut dyn Graph) {
        draw_decision(
            graph,
            self.statement.as_ref(),
            self.then.as_ref(),
            self.otherwise.as_ref(),
        );
    }
}

/// Runs `step` only when the statement holds; otherwise the input passes
/// through unchanged, unless an `otherwise` step replaces that default.
///
/// ```
/// use phasegraph::step::{step, Optional, Step};
/// use phasegraph::Statement;
///
/// let halve = Optional::new(
///     Statement::new("even?", |n: &u32| n % 2 == 0),
///     step("halve", |n: u32| Ok(n / 2)),
/// );
/// assert_eq!(halve.run(10).unwrap(), 5);
/// assert_eq!(halve.run(7).unwrap(), 7);
/// ```
pub struct Optional<I> {
    statement: Option<Statement<I>>,
    step: Option<SharedStep<I, I>>,
    otherwise: Option<SharedStep<I, I>>,
}

impl<I> Optional<I> {
    /// Run `step` when `statement` holds.
    pub fn new<S: Step<I, I> + 'static>(statement: Statement<I>, step: S) -> Self {
        Self::from_parts(Some(statement), Some(Arc::new(step)), None)
    }

    /// Build from optional parts.
    pub fn from_parts(
        statement: Option<Statement<I>>,
        step: Option<SharedStep<I, I>>,
        otherwise: Option<SharedStep<I, I>>,
    ) -> Self {
        Self {
            statement,
            step,
            otherwise,
        }
    }

    /// Replace the pass-through used when the statement does not hold.
    pub fn otherwise<S: Step<I, I> + 'static>(mut self, step: S) -> Self {
        self.otherwise = Some(Arc::new(step));
        self
    }
}

impl<I> Clone for Optional<I> {
    fn clone(&self) -> Self {
        Self {
            statement: self.statement.clone(),
            step: self.step.clone(),
            otherwise: self.otherwise.clone(),
        }
    }
}

impl<I> Step<I, I> for Optional<I> {
    fn name(&self) -> &str {
        statement::label(self.statement.as_ref())
    }

    fn run(&self, input: I) -> Result<I> {
        let branch = if statement::evaluate(self.statement.as_ref(), &input) {
            &self.step
        } else {
            &self.otherwise
        };
        match branch {
            Some(step) => step.run(input),
            None => Ok(input),
        }
    }

    fn draw(&self, graph: &mut dyn Graph) {
        draw_decision(
            graph,
            self.statement.as_ref(),
            self.step.as_ref(),
            self.otherwise.as_ref(),
        );
    }
}

fn draw_decision<I, O>(
    graph: &mut dyn Graph,
    statement: Option<&Statement<I>>,
    yes: Option<&SharedStep<I, O>>,
    no: Option<&SharedStep<I, O>>,
) {
    graph.add_decision(
        statement::label(statement),
        &|g: &mut dyn Graph| {
            if let Some(step) = yes {
                step.draw(g);
            }
        },
        &|g: &mut dyn Graph| {
            if let Some(step) = no {
                step.draw(g);
            }
        },
    );
}
