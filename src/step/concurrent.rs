//! Fan a typed input out to several steps and fold the results.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::unit::{SharedStep, Step};
use crate::concurrency::spawn_async;
use crate::error::Result;
use crate::graph::{add_concurrency_with, Graph};

type Reducer<O> = Arc<dyn Fn(O, O) -> Result<O> + Send + Sync>;

/// Runs every step on a clone of the input, then reduces the outputs.
///
/// Outputs are folded pairwise from left to right in step order once every
/// branch has finished. Branch errors follow
/// [`spawn_async`](crate::concurrency::spawn_async) (last failure wins);
/// a reducer error is returned as is. With no steps the output is
/// `O::default()`.
pub struct Concurrent<I, O> {
    name: String,
    steps: Vec<SharedStep<I, O>>,
    reducer: Reducer<O>,
}

impl<I, O> Concurrent<I, O> {
    /// Create a concurrent block of `steps` folded with `reducer`.
    pub fn new<F>(steps: Vec<SharedStep<I, O>>, reducer: F) -> Self
    where
        F: Fn(O, O) -> Result<O> + Send + Sync + 'static,
    {
        Self {
            name: String::new(),
            steps,
            reducer: Arc::new(reducer),
        }
    }

    /// Give the block a label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<I, O> Clone for Concurrent<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            steps: self.steps.clone(),
            reducer: Arc::clone(&self.reducer),
        }
    }
}

impl<I, O> Step<I, O> for Concurrent<I, O>
where
    I: Clone + Send + Sync,
    O: Default + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: I) -> Result<O> {
        let slots: Vec<Mutex<Option<O>>> = self.steps.iter().map(|_| Mutex::new(None)).collect();

        spawn_async(self.steps.len(), |index| {
            let output = self.steps[index].run(input.clone())?;
            *slots[index].lock() = Some(output);
            Ok(())
        })?;

        let mut outputs = slots.into_iter().filter_map(|slot| slot.into_inner());
        match outputs.next() {
            None => Ok(O::default()),
            Some(first) => outputs.try_fold(first, |acc, next| (self.reducer)(acc, next)),
        }
    }

    fn draw(&self, graph: &mut dyn Graph) {
        add_concurrency_with(
            graph,
            self.steps
                .iter()
                .map(|step| move |g: &mut dyn Graph| step.draw(g)),
        );
    }
}

impl<I, O> fmt::Debug for Concurrent<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Concurrent")
            .field("name", &self.name)
            .field("steps", &self.steps.len())
            .finish()
    }
}
