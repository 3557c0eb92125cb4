//! The typed step contract and its closure-backed implementation.

use std::fmt;
use std::sync::Arc;

use super::chain::Chain;
use super::lifecycle::{After, Before};
use crate::error::Result;
use crate::graph::Graph;

/// A step shared between combinators.
pub type SharedStep<I, O> = Arc<dyn Step<I, O>>;

/// A runnable, drawable unit turning an `I` into an `O`.
///
/// Leaves draw as a single activity labelled with their name; combinators
/// override [`Step::draw`] to describe their children.
pub trait Step<I, O>: Send + Sync {
    /// The step's label; empty for anonymous steps.
    fn name(&self) -> &str {
        ""
    }

    /// Run the step.
    fn run(&self, input: I) -> Result<O>;

    /// Describe the step to a diagram visitor.
    fn draw(&self, graph: &mut dyn Graph) {
        graph.add_activity(self.name());
    }
}

impl<I, O, S: Step<I, O> + ?Sized> Step<I, O> for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: I) -> Result<O> {
        (**self).run(input)
    }

    fn draw(&self, graph: &mut dyn Graph) {
        (**self).draw(graph)
    }
}

type StepFn<I, O> = Arc<dyn Fn(I) -> Result<O> + Send + Sync>;

/// A step running a closure.
pub struct FnStep<I, O> {
    name: String,
    f: StepFn<I, O>,
}

impl<I, O> FnStep<I, O> {
    /// Create a named step.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(I) -> Result<O> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }
}

impl<I, O> Clone for FnStep<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<I, O> Step<I, O> for FnStep<I, O> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: I) -> Result<O> {
        (self.f)(input)
    }
}

impl<I, O> fmt::Debug for FnStep<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

/// Shorthand for [`FnStep::new`].
pub fn step<I, O, F>(name: impl Into<String>, f: F) -> FnStep<I, O>
where
    F: Fn(I) -> Result<O> + Send + Sync + 'static,
{
    FnStep::new(name, f)
}

/// Combinator methods available on every step.
pub trait StepExt<I, O>: Step<I, O> + Sized + 'static {
    /// Wrap the step in an `Arc` so it can be shared.
    fn shared(self) -> SharedStep<I, O> {
        Arc::new(self)
    }

    /// Feed this step's output into `next`.
    fn then<P, N>(self, next: N) -> Chain<I, O, P>
    where
        N: Step<O, P> + 'static,
    {
        Chain::new(self, next)
    }

    /// Run `hook` with the input before the step; an error skips the step.
    fn before<F>(self, hook: F) -> Before<I, O>
    where
        F: Fn(&dyn Step<I, O>, &I) -> Result<()> + Send + Sync + 'static,
    {
        Before::new(self, hook)
    }

    /// Run `hook` with the step's result; its return value replaces it.
    fn after<F>(self, hook: F) -> After<I, O>
    where
        F: Fn(&dyn Step<I, O>, Result<O>) -> Result<O> + Send + Sync + 'static,
    {
        After::new(self, hook)
    }
}

impl<I, O, S: Step<I, O> + 'static> StepExt<I, O> for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhaseError;
    use crate::graph::Uml;

    #[test]
    fn fn_step_runs_closure() {
        let parse = step("parse", |s: &'static str| {
            s.parse::<u32>()
                .map_err(|e| PhaseError::step("parse", e.to_string()))
        });
        assert_eq!(parse.run("42").unwrap(), 42);
        assert!(parse.run("x").is_err());
    }

    #[test]
    fn leaf_draws_activity() {
        let mut uml = Uml::new();
        step("grind beans", |x: u8| Ok(x)).draw(&mut uml);
        assert_eq!(uml.body(), ":grind beans;\n");
    }

    #[test]
    fn shared_step_delegates() {
        let shared = step("id", |x: i64| Ok(x)).shared();
        let copy = Arc::clone(&shared);
        assert_eq!(copy.name(), "id");
        assert_eq!(copy.run(-3).unwrap(), -3);
    }
}
