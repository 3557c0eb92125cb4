//! Pipeline definition loading.

use crate::config::schema::PipelineConfig;
use crate::config::validator::validate;
use crate::error::{PhaseError, Result};
use std::fs;
use std::path::Path;

/// Load, parse and validate a pipeline definition file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if the tree breaks a validation rule.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PhaseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PhaseError::Io(e)
        }
    })?;

    let config = parse_config(&content, path)?;
    validate(&config)?;
    tracing::debug!("Loaded pipeline definition from {}", path.display());
    Ok(config)
}

/// Parse YAML content into a [`PipelineConfig`] without validating it.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PipelineConfig> {
    serde_yaml::from_str(content).map_err(|e| PhaseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
