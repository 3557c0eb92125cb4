//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod completions;
pub mod dispatcher;
pub mod draw;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
