//! Pipeline definition schema.
//!
//! A definition names the pipeline, says how its diagram is rendered and
//! describes the stage tree as nested nodes:
//!
//! ```yaml
//! name: release
//! render:
//!   format: png
//! pipeline:
//!   type: sequential
//!   stages:
//!     - type: run
//!       name: checkout
//!       command: git rev-parse HEAD
//!       capture: sha
//!     - type: if
//!       statement: { name: "is CI?", command: "test -n \"$CI\"" }
//!       then: { type: run, name: publish, command: "echo ${sha}" }
//! ```

use serde::{Deserialize, Serialize};

use crate::graph::RenderOptions;

/// Root of a pipeline definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Display name of the pipeline.
    #[serde(default)]
    pub name: Option<String>,

    /// How `draw` renders the diagram.
    #[serde(default)]
    pub render: RenderOptions,

    /// The root node.
    pub pipeline: NodeConfig,
}

/// One node of the stage tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeConfig {
    /// Run a shell command.
    Run {
        /// Activity label.
        name: String,

        /// Command line; `${tag}` is replaced from the context.
        command: String,

        /// Store the trimmed stdout under this tag.
        #[serde(default)]
        capture: Option<String>,
    },

    /// Run children in order, stopping at the first failure.
    Sequential {
        /// Children, in order.
        stages: Vec<NodeConfig>,
    },

    /// Run children at the same time.
    Concurrent {
        /// Children.
        stages: Vec<NodeConfig>,
    },

    /// Run one of two children depending on a statement.
    If {
        /// The condition.
        statement: StatementConfig,

        /// Node run when the statement holds.
        #[serde(default)]
        then: Option<Box<NodeConfig>>,

        /// Node run when it does not.
        #[serde(default, rename = "else")]
        otherwise: Option<Box<NodeConfig>>,
    },
}

impl NodeConfig {
    /// Short name of the node type, as written in YAML.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeConfig::Run { .. } => "run",
            NodeConfig::Sequential { .. } => "sequential",
            NodeConfig::Concurrent { .. } => "concurrent",
            NodeConfig::If { .. } => "if",
        }
    }
}

/// A named condition. Exactly one of `command` or `context` must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    /// Label shown on the decision.
    pub name: String,

    /// True when this command exits with code 0.
    pub command: Option<String>,

    /// True when this tag holds `true` or a non-empty string.
    pub context: Option<String>,

    /// With `context`: true when the tag holds exactly this string.
    pub equals: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Format;

    #[test]
    fn parses_nested_nodes() {
        let yaml = r#"
name: demo
pipeline:
  type: sequential
  stages:
    - type: run
      name: a
      command: echo a
      capture: out
    - type: concurrent
      stages:
        - { type: run, name: b, command: echo b }
    - type: if
      statement: { name: "ok?", context: out, equals: a }
      else: { type: run, name: c, command: echo c }
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("demo"));
        assert_eq!(config.render.format, Format::Svg);

        let NodeConfig::Sequential { stages } = &config.pipeline else {
            panic!("expected sequential root, got {}", config.pipeline.kind());
        };
        assert_eq!(stages.len(), 3);
        assert!(matches!(
            &stages[0],
            NodeConfig::Run { capture: Some(tag), .. } if tag == "out"
        ));
        let NodeConfig::If {
            statement,
            then,
            otherwise,
        } = &stages[2]
        else {
            panic!("expected if node");
        };
        assert_eq!(statement.context.as_deref(), Some("out"));
        assert_eq!(statement.equals.as_deref(), Some("a"));
        assert!(then.is_none());
        assert_eq!(otherwise.as_ref().map(|n| n.kind()), Some("run"));
    }

    #[test]
    fn parses_render_section() {
        let yaml = r#"
render:
  format: png
  base_url: http://localhost:8080
  timeout: 5
pipeline: { type: run, name: x, command: "true" }
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.render.format, Format::Png);
        assert_eq!(config.render.base_url(), "http://localhost:8080");
        assert_eq!(config.render.timeout, 5);
    }

    #[test]
    fn rejects_unknown_node_type() {
        let yaml = "pipeline: { type: parallel, stages: [] }";
        assert!(serde_yaml::from_str::<PipelineConfig>(yaml).is_err());
    }
}
