//! Pipeline definition validation rules.
//!
//! - `run` nodes need a name and a non-empty command
//! - `sequential` and `concurrent` nodes need at least one child
//! - Statements need exactly one of `command` or `context`
//! - `equals` only makes sense with `context`

use crate::config::schema::{NodeConfig, PipelineConfig, StatementConfig};
use crate::error::{PhaseError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Location of the node, e.g. `pipeline.stages[1].then`
    pub path: String,
}

impl ValidationError {
    fn new(rule: &str, path: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: format!("{}: {}", path, message.into()),
            path: path.to_string(),
        }
    }
}

/// Validate a definition and return all errors.
///
/// Every node is visited so that several problems can be fixed at once.
pub fn validate_config(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_node(&config.pipeline, "pipeline", &mut errors);
    errors
}

fn validate_node(node: &NodeConfig, path: &str, errors: &mut Vec<ValidationError>) {
    match node {
        NodeConfig::Run { name, command, .. } => {
            if name.trim().is_empty() {
                errors.push(ValidationError::new(
                    "missing-name",
                    path,
                    "run node has no name",
                ));
            }
            if command.trim().is_empty() {
                errors.push(ValidationError::new(
                    "missing-command",
                    path,
                    format!("run node '{}' has an empty command", name),
                ));
            }
        }
        NodeConfig::Sequential { stages } | NodeConfig::Concurrent { stages } => {
            if stages.is_empty() {
                errors.push(ValidationError::new(
                    "empty-stages",
                    path,
                    format!("{} node has no stages", node.kind()),
                ));
            }
            for (i, child) in stages.iter().enumerate() {
                validate_node(child, &format!("{}.stages[{}]", path, i), errors);
            }
        }
        NodeConfig::If {
            statement,
            then,
            otherwise,
        } => {
            validate_statement(statement, &format!("{}.statement", path), errors);
            if let Some(child) = then {
                validate_node(child, &format!("{}.then", path), errors);
            }
            if let Some(child) = otherwise {
                validate_node(child, &format!("{}.else", path), errors);
            }
        }
    }
}

fn validate_statement(statement: &StatementConfig, path: &str, errors: &mut Vec<ValidationError>) {
    match (&statement.command, &statement.context) {
        (Some(_), Some(_)) => errors.push(ValidationError::new(
            "ambiguous-statement",
            path,
            format!(
                "statement '{}' sets both 'command' and 'context'",
                statement.name
            ),
        )),
        (None, None) => errors.push(ValidationError::new(
            "missing-predicate",
            path,
            format!(
                "statement '{}' needs either 'command' or 'context'",
                statement.name
            ),
        )),
        (Some(_), None) if statement.equals.is_some() => errors.push(ValidationError::new(
            "equals-without-context",
            path,
            format!(
                "statement '{}' uses 'equals' without 'context'",
                statement.name
            ),
        )),
        _ => {}
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PipelineConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PhaseError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> PipelineConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn rules(yaml: &str) -> Vec<String> {
        validate_config(&parse(yaml))
            .into_iter()
            .map(|e| e.rule)
            .collect()
    }

    #[test]
    fn valid_tree_passes() {
        let config = parse(
            r#"
pipeline:
  type: sequential
  stages:
    - { type: run, name: a, command: echo a }
    - type: if
      statement: { name: "set?", context: flag }
      then: { type: run, name: b, command: echo b }
"#,
        );
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_empty_command() {
        assert_eq!(
            rules("pipeline: { type: run, name: a, command: '  ' }"),
            vec!["missing-command"]
        );
    }

    #[test]
    fn rejects_empty_stage_lists() {
        assert_eq!(
            rules("pipeline: { type: concurrent, stages: [] }"),
            vec!["empty-stages"]
        );
    }

    #[test]
    fn rejects_bad_statements() {
        assert_eq!(
            rules(
                r#"
pipeline:
  type: if
  statement: { name: both, command: "true", context: x }
"#
            ),
            vec!["ambiguous-statement"]
        );
        assert_eq!(
            rules("pipeline: { type: if, statement: { name: none } }"),
            vec!["missing-predicate"]
        );
        assert_eq!(
            rules(r#"pipeline: { type: if, statement: { name: e, command: "true", equals: y } }"#),
            vec!["equals-without-context"]
        );
    }

    #[test]
    fn collects_errors_with_paths() {
        let errors = validate_config(&parse(
            r#"
pipeline:
  type: sequential
  stages:
    - { type: run, name: ok, command: echo }
    - { type: run, name: bad, command: "" }
    - type: if
      statement: { name: s }
      else: { type: sequential, stages: [] }
"#,
        ));
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "pipeline.stages[1]",
                "pipeline.stages[2].statement",
                "pipeline.stages[2].else"
            ]
        );

        let err = validate(&parse("pipeline: { type: sequential, stages: [] }")).unwrap_err();
        assert!(matches!(err, PhaseError::ConfigValidationError { .. }));
    }
}
