//! Turning a parsed definition into a runnable stage tree.

use std::path::{Path, PathBuf};

use crate::config::schema::{NodeConfig, PipelineConfig, StatementConfig};
use crate::context::ExecutionContext;
use crate::shell::execute_check;
use crate::stage::{
    CommandStage, Concurrent, Conditional, Pipeline, Sequential, SharedStage, StageExt,
};
use crate::statement::Statement;

/// Build the pipeline described by `config`.
///
/// Commands run in `base_dir` when given, otherwise in the current
/// directory. Call [`validate`](crate::config::validate) first; building
/// does not check the tree.
pub fn build_pipeline(config: &PipelineConfig, base_dir: Option<&Path>) -> Pipeline {
    Pipeline::from_shared(build_stage(&config.pipeline, base_dir))
}

/// Build the stage for one node and its children.
pub fn build_stage(node: &NodeConfig, base_dir: Option<&Path>) -> SharedStage {
    match node {
        NodeConfig::Run {
            name,
            command,
            capture,
        } => {
            let mut stage = CommandStage::new(name, command);
            if let Some(tag) = capture {
                stage = stage.capture(tag);
            }
            if let Some(dir) = base_dir {
                stage = stage.current_dir(dir);
            }
            stage.shared()
        }
        NodeConfig::Sequential { stages } => {
            Sequential::new(build_children(stages, base_dir)).shared()
        }
        NodeConfig::Concurrent { stages } => {
            Concurrent::new(build_children(stages, base_dir)).shared()
        }
        NodeConfig::If {
            statement,
            then,
            otherwise,
        } => Conditional::from_parts(
            Some(build_statement(statement, base_dir)),
            then.as_deref().map(|node| build_stage(node, base_dir)),
            otherwise.as_deref().map(|node| build_stage(node, base_dir)),
        )
        .shared(),
    }
}

fn build_children(nodes: &[NodeConfig], base_dir: Option<&Path>) -> Vec<SharedStage> {
    nodes.iter().map(|node| build_stage(node, base_dir)).collect()
}

/// Build the predicate a statement describes.
///
/// - `command`: true when the command exits with code 0
/// - `context` + `equals`: true when the tag holds exactly that string
/// - `context` alone: true when the tag holds `true` or a non-empty string
///
/// A statement with neither predicate never holds.
pub fn build_statement(
    config: &StatementConfig,
    base_dir: Option<&Path>,
) -> Statement<ExecutionContext> {
    let name = config.name.clone();

    if let Some(command) = &config.command {
        let command = command.clone();
        let cwd: Option<PathBuf> = base_dir.map(Path::to_path_buf);
        return Statement::new(name, move |_: &ExecutionContext| {
            execute_check(&command, cwd.as_deref())
        });
    }

    let Some(tag) = config.context.clone() else {
        return Statement::named(name);
    };

    match config.equals.clone() {
        Some(expected) => Statement::new(name, move |ctx: &ExecutionContext| {
            let (value, exists) = ctx.get_string(&tag);
            exists && value == expected
        }),
        None => Statement::new(name, move |ctx: &ExecutionContext| {
            ctx.get_bool(&tag).0 || !ctx.get_string(&tag).0.is_empty()
        }),
    }
}
