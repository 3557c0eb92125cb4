//! Sequential composition of typed steps.

use std::sync::Arc;

use super::unit::{SharedStep, Step};
use crate::error::Result;
use crate::graph::Graph;

/// Runs `first`, then feeds its output into `second`.
///
/// An error from `first` is returned unchanged and `second` never runs.
pub struct Chain<I, M, O> {
    first: SharedStep<I, M>,
    second: SharedStep<M, O>,
}

impl<I, M, O> Chain<I, M, O> {
    /// Chain two steps.
    pub fn new<A, B>(first: A, second: B) -> Self
    where
        A: Step<I, M> + 'static,
        B: Step<M, O> + 'static,
    {
        Self {
            first: Arc::new(first),
            second: Arc::new(second),
        }
    }
}

impl<I, M, O> Clone for Chain<I, M, O> {
    fn clone(&self) -> Self {
        Self {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
        }
    }
}

impl<I, M, O> Step<I, O> for Chain<I, M, O> {
    fn name(&self) -> &str {
        self.first.name()
    }

    fn run(&self, input: I) -> Result<O> {
        let middle = self.first.run(input)?;
        self.second.run(middle)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.first.draw(graph);
        self.second.draw(graph);
    }
}
