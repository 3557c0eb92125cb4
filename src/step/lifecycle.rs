//! Before/after hooks around a typed step.

use std::sync::Arc;

use super::unit::{SharedStep, Step};
use crate::error::Result;
use crate::graph::Graph;

type BeforeHook<I, O> = Arc<dyn Fn(&dyn Step<I, O>, &I) -> Result<()> + Send + Sync>;
type AfterHook<I, O> = Arc<dyn Fn(&dyn Step<I, O>, Result<O>) -> Result<O> + Send + Sync>;

/// Runs a hook on the input before the wrapped step. A failing hook skips
/// the step and its error is returned.
pub struct Before<I, O> {
    inner: SharedStep<I, O>,
    hook: BeforeHook<I, O>,
}

impl<I, O> Before<I, O> {
    /// Wrap `inner` with `hook`.
    pub fn new<S, F>(inner: S, hook: F) -> Self
    where
        S: Step<I, O> + 'static,
        F: Fn(&dyn Step<I, O>, &I) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(inner),
            hook: Arc::new(hook),
        }
    }
}

impl<I, O> Clone for Before<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<I, O> Step<I, O> for Before<I, O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, input: I) -> Result<O> {
        (self.hook)(self.inner.as_ref(), &input)?;
        self.inner.run(input)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.inner.draw(graph);
    }
}

/// Hands the wrapped step's result to a hook, whose return value becomes
/// the result.
pub struct After<I, O> {
    inner: SharedStep<I, O>,
    hook: AfterHook<I, O>,
}

impl<I, O> After<I, O> {
    /// Wrap `inner` with `hook`.
    pub fn new<S, F>(inner: S, hook: F) -> Self
    where
        S: Step<I, O> + 'static,
        F: Fn(&dyn Step<I, O>, Result<O>) -> Result<O> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(inner),
            hook: Arc::new(hook),
        }
    }
}

impl<I, O> Clone for After<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<I, O> Step<I, O> for After<I, O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, input: I) -> Result<O> {
        let result = self.inner.run(input);
        (self.hook)(self.inner.as_ref(), result)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        self.inner.draw(graph);
    }
}
