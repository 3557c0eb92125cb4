//! Pipeline definitions in YAML.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - `${tag}` interpolation in [`interpolation`]
//! - Stage tree construction in [`builder`]
//!
//! # Example
//!
//! ```
//! use phasegraph::config::{build_pipeline, load_config};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("pipeline.yml");
//! fs::write(
//!     &path,
//!     "pipeline: { type: run, name: hello, command: echo hi, capture: greeting }",
//! )
//! .unwrap();
//!
//! let config = load_config(&path).unwrap();
//! let ctx = build_pipeline(&config, None).run_fresh().unwrap();
//! assert_eq!(ctx.get_string("greeting").0, "hi");
//! ```

pub mod builder;
pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use builder::{build_pipeline, build_stage, build_statement};
pub use interpolation::{extract_variables, parse_interpolation, resolve_string, Segment};
pub use loader::{load_config, parse_config};
pub use schema::{NodeConfig, PipelineConfig, StatementConfig};
pub use validator::{validate, validate_config, ValidationError};
