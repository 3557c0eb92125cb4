//! Diagram visitor and its PlantUML implementation.
//!
//! Every stage and step knows how to describe itself to a [`Graph`]:
//!
//! - [`Graph`] - Sink receiving activities, decisions and concurrency blocks
//! - [`Uml`] - Builds PlantUML activity-diagram text and renders it
//! - [`encoding`] - Deflate + PlantUML base64 text encoding
//! - [`DiagramClient`] - HTTP transport to a PlantUML server
//! - [`Sink`] - Writable, closable output for rendered diagrams
//!
//! # Example
//!
//! ```
//! use phasegraph::graph::{Graph, Uml};
//!
//! let mut uml = Uml::new();
//! uml.add_activity("prepare");
//! uml.add_decision(
//!     "ready?",
//!     &|g: &mut dyn Graph| g.add_activity("ship"),
//!     &|_: &mut dyn Graph| {},
//! );
//! assert_eq!(
//!     uml.body(),
//!     ":prepare;\nif (ready?) then (yes)\n:ship;\nelse (no)\nendif\n"
//! );
//! ```

pub mod client;
pub mod encoding;
pub mod options;
pub mod sink;
pub mod uml;

pub use client::DiagramClient;
pub use options::{Format, RenderOptions, DEFAULT_BASE_URL};
pub use sink::Sink;
pub use uml::Uml;

/// A branch of a decision or concurrency block: draws itself into the
/// graph it is handed.
pub type Branch<'a> = &'a dyn Fn(&mut dyn Graph);

/// Visitor fed by stages and steps when they are drawn.
pub trait Graph {
    /// Add a single activity.
    fn add_activity(&mut self, label: &str);

    /// Add a decision on `statement` with a branch for each outcome.
    fn add_decision(&mut self, statement: &str, yes: Branch<'_>, no: Branch<'_>);

    /// Add a block whose branches run concurrently.
    fn add_concurrency(&mut self, branches: &[Branch<'_>]);
}

/// Emit one concurrency block with a branch per closure in `draws`.
pub fn add_concurrency_with<F>(graph: &mut dyn Graph, draws: impl IntoIterator<Item = F>)
where
    F: Fn(&mut dyn Graph),
{
    let draws: Vec<F> = draws.into_iter().collect();
    let branches: Vec<Branch<'_>> = draws
        .iter()
        .map(|draw| draw as &dyn Fn(&mut dyn Graph))
        .collect();
    graph.add_concurrency(&branches);
}
