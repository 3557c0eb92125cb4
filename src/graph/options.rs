//! Rendering options for PlantUML diagrams.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Public PlantUML server used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.plantuml.com/plantuml";

/// Output format requested from the rendering service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// PNG image
    Png,
    /// SVG image
    #[default]
    Svg,
    /// ASCII art
    Txt,
    /// PlantUML source text, written locally without contacting a server
    Raw,
}

impl Format {
    /// Path segment used in the rendering URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Svg => "svg",
            Format::Txt => "txt",
            Format::Raw => "raw",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a diagram is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// PlantUML server base URL; [`DEFAULT_BASE_URL`] when unset.
    pub base_url: Option<String>,

    /// Requested output format.
    pub format: Format,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl RenderOptions {
    /// The base URL to use, falling back to [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL,
        }
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            format: Format::default(),
            timeout: 30,
        }
    }
}
