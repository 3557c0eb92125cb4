//! The execution context carried through one pipeline evaluation.
//!
//! - [`ExecutionContext`] - Thread-safe, type-erased key/value store
//! - [`Tag`] - Key type for context entries

pub mod store;
pub mod tag;

pub use store::{ExecutionContext, Value};
pub use tag::Tag;
