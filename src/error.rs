//! Error types for phasegraph operations.
//!
//! This module defines [`PhaseError`], the error type surfaced by every
//! stage, step, combinator and renderer, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Combinators return the error of the unit that failed unchanged
//! - Variants that carry a `url` or `tag` name the thing that failed
//! - Use `anyhow::Error` (via `PhaseError::Other`) for caller-specific errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for phasegraph operations.
#[derive(Debug, Error)]
pub enum PhaseError {
    /// A step reported a failure.
    #[error("Step '{step}' failed: {message}")]
    Step { step: String, message: String },

    /// A concurrent branch panicked instead of returning.
    #[error("Concurrent branch {index} panicked")]
    BranchPanicked { index: usize },

    /// The fold applied after a concurrent fan-out failed.
    #[error("Reduce failed: {message}")]
    Reduce { message: String },

    /// A value expected in the execution context is absent.
    #[error("No value stored under tag '{tag}'")]
    MissingValue { tag: String },

    /// A value in the execution context has an unexpected type.
    #[error("Value under tag '{tag}' is not a {expected}")]
    TypeMismatch { tag: String, expected: &'static str },

    /// The rendering request could not be sent or completed.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The rendering service answered with a non-200 status.
    #[error("Unexpected status code {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Reading the rendered diagram from the response body failed.
    #[error("Failed to read response from {url}: {source}")]
    ResponseBody {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Compressing the diagram text failed.
    #[error("Failed to encode diagram: {0}")]
    Encode(#[source] std::io::Error),

    /// Writing to the output sink failed.
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// Closing the output sink failed.
    #[error("Failed to close output: {0}")]
    Close(#[source] std::io::Error),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pipeline definition file not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a pipeline definition.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid pipeline definition structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        /// Why the shell could not be started, when it never ran.
        #[source]
        source: Option<std::io::Error>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhaseError {
    /// Shorthand for a [`PhaseError::Step`] failure.
    pub fn step(step: impl Into<String>, message: impl Into<String>) -> Self {
        PhaseError::Step {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`PhaseError::Reduce`] failure.
    pub fn reduce(message: impl Into<String>) -> Self {
        PhaseError::Reduce {
            message: message.into(),
        }
    }

    /// Whether this error came from talking to the rendering service or
    /// writing its answer out.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PhaseError::Request { .. }
                | PhaseError::UnexpectedStatus { .. }
                | PhaseError::ResponseBody { .. }
                | PhaseError::Write(_)
                | PhaseError::Close(_)
                | PhaseError::Http(_)
        )
    }
}

/// Result type alias for phasegraph operations.
pub type Result<T> = std::result::Result<T, PhaseError>;
