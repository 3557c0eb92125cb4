//! Typed steps transforming an input into an output.
//!
//! - [`Step`] - A named `I -> O` unit that can draw itself
//! - [`FnStep`] - A step backed by a closure
//! - [`Chain`] - Feed one step's output into the next
//! - [`Concurrent`] - Run steps on clones of one input and reduce the results
//! - [`If`], [`Optional`] - Branch on a [`Statement`](crate::Statement)
//! - [`Before`], [`After`] - Lifecycle decorators
//! - [`StepStage`] - Run a step as a stage, through context tags
//!
//! # Example
//!
//! ```
//! use phasegraph::step::{step, Concurrent, Step, StepExt};
//!
//! let double = step("double", |n: u32| Ok(n * 2));
//! let square = step("square", |n: u32| Ok(n * n));
//! let sum = Concurrent::new(vec![double.shared(), square.shared()], |a, b| Ok(a + b));
//!
//! let total = step("inc", |n: u32| Ok(n + 1)).then(sum);
//! assert_eq!(total.run(3).unwrap(), 8 + 16);
//! ```

pub mod bridge;
pub mod chain;
pub mod concurrent;
pub mod conditional;
pub mod lifecycle;
pub mod unit;

pub use bridge::StepStage;
pub use chain::Chain;
pub use concurrent::Concurrent;
pub use conditional::{If, Optional};
pub use lifecycle::{After, Before};
pub use unit::{step, FnStep, SharedStep, Step, StepExt};
