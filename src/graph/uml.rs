//! PlantUML activity-diagram builder.

use std::io::Write;

use super::client::DiagramClient;
use super::encoding;
use super::options::{Format, RenderOptions};
use super::sink::Sink;
use super::{Branch, Graph};
use crate::error::{PhaseError, Result};

const HEADER: &str = "@startuml\nstart\n";
const FOOTER: &str = "stop\n@enduml\n";

/// A [`Graph`] that accumulates PlantUML activity-diagram text.
#[derive(Debug, Clone, Default)]
pub struct Uml {
    body: String,
    options: RenderOptions,
}

impl Uml {
    /// Create an empty diagram with default rendering options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty diagram rendered with `options`.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            body: String::new(),
            options,
        }
    }

    /// The rendering options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Text between the `start` and `stop` markers.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The complete PlantUML document.
    pub fn text(&self) -> String {
        format!("{HEADER}{}{FOOTER}", self.body)
    }

    /// Render the diagram into `sink`, then close it.
    ///
    /// [`Format::Raw`] writes the PlantUML text as is. Any other format
    /// encodes the text and fetches the image from the configured server.
    /// The sink is closed on every path; an earlier error takes precedence
    /// over a close failure.
    pub fn render<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let written = self.write_to(sink);
        let closed = sink.close().map_err(PhaseError::Close);
        written.and(closed)
    }

    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let text = self.text();
        if self.options.format == Format::Raw {
            return sink.write_all(text.as_bytes()).map_err(PhaseError::Write);
        }

        let encoded = encoding::encode(&text)?;
        let client = DiagramClient::from_options(&self.options)?;
        let url = client.url(self.options.format, &encoded);
        client.fetch_into(&url, sink)?;
        Ok(())
    }
}

impl Graph for Uml {
    fn add_activity(&mut self, label: &str) {
        self.body.push(':');
        self.body.push_str(label);
        self.body.push_str(";\n");
    }

    fn add_decision(&mut self, statement: &str, yes: Branch<'_>, no: Branch<'_>) {
        self.body.push_str("if (");
        self.body.push_str(statement);
        self.body.push_str(") then (yes)\n");
        yes(self);
        self.body.push_str("else (no)\n");
        no(self);
        self.body.push_str("endif\n");
    }

    fn add_concurrency(&mut self, branches: &[Branch<'_>]) {
        for (index, branch) in branches.iter().enumerate() {
            if index == 0 {
                self.body.push_str("fork\n");
            } else {
                self.body.push_str("fork again\n");
            }
            branch(self);
        }
        if !branches.is_empty() {
            self.body.push_str("end fork\n");
        }
    }
}
