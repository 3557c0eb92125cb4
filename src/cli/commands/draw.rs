//! Draw command implementation.
//!
//! The `phasegraph draw` command renders a pipeline definition as a
//! PlantUML activity diagram.

use std::fs;

use crate::cli::args::DrawArgs;
use crate::config::{build_pipeline, load_config};
use crate::error::Result;
use crate::graph::{RenderOptions, Sink};

use super::dispatcher::{Command, CommandResult};
use super::run::definition_dir;

/// The draw command implementation.
pub struct DrawCommand {
    args: DrawArgs,
}

impl DrawCommand {
    /// Create a new draw command.
    pub fn new(args: DrawArgs) -> Self {
        Self { args }
    }

    /// Apply command-line overrides to the definition's render section.
    fn options(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(format) = self.args.format {
            options.format = format;
        }
        if let Some(url) = &self.args.base_url {
            options.base_url = Some(url.clone());
        }
        options
    }
}

impl Command for DrawCommand {
    fn execute(&self, out: &mut dyn Sink) -> Result<CommandResult> {
        let config = load_config(&self.args.file)?;
        let pipeline = build_pipeline(&config, definition_dir(&self.args.file));
        let options = self.options(config.render);
        tracing::debug!(
            "Rendering {} as {} via {}",
            self.args.file.display(),
            options.format,
            options.base_url()
        );

        match &self.args.output {
            Some(path) => {
                // An existing file is only replaced once rendering succeeded.
                let mut rendered = Vec::new();
                pipeline.render(options, &mut rendered)?;
                fs::write(path, rendered)?;
                tracing::info!("Wrote diagram to {}", path.display());
            }
            None => pipeline.render(options, out)?,
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Format;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const DEFINITION: &str = r#"
render:
  format: png
  base_url: http://unused.invalid
pipeline:
  type: sequential
  stages:
    - { type: run, name: build, command: "true" }
    - { type: run, name: test, command: "true" }
"#;

    fn args(file: PathBuf) -> DrawArgs {
        DrawArgs {
            file,
            format: Some(Format::Raw),
            base_url: None,
            output: None,
        }
    }

    #[test]
    fn flags_override_render_section() {
        let command = DrawCommand::new(DrawArgs {
            base_url: Some("http://localhost:1".into()),
            ..args(PathBuf::from("p.yml"))
        });
        let options = command.options(RenderOptions {
            base_url: Some("http://from-file".into()),
            format: Format::Png,
            timeout: 7,
        });
        assert_eq!(options.format, Format::Raw);
        assert_eq!(options.base_url(), "http://localhost:1");
        assert_eq!(options.timeout, 7);
    }

    #[test]
    fn raw_diagram_goes_to_sink() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("pipeline.yml");
        fs::write(&file, DEFINITION).unwrap();

        let mut out = Vec::new();
        DrawCommand::new(args(file)).execute(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "@startuml\nstart\n:build;\n:test;\nstop\n@enduml\n"
        );
    }

    #[test]
    fn raw_diagram_goes_to_output_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("pipeline.yml");
        fs::write(&file, DEFINITION).unwrap();
        let output = temp.path().join("diagram.puml");

        let mut out = Vec::new();
        DrawCommand::new(DrawArgs {
            output: Some(output.clone()),
            ..args(file)
        })
        .execute(&mut out)
        .unwrap();

        assert!(out.is_empty());
        assert!(fs::read_to_string(output).unwrap().contains(":test;"));
    }

    #[test]
    fn failed_render_keeps_existing_output() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("pipeline.yml");
        fs::write(&file, DEFINITION).unwrap();
        let output = temp.path().join("diagram.png");
        fs::write(&output, "previous diagram").unwrap();

        let err = DrawCommand::new(DrawArgs {
            format: Some(Format::Png),
            base_url: Some("http://127.0.0.1:9".into()),
            output: Some(output.clone()),
            ..args(file)
        })
        .execute(&mut Vec::new())
        .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(fs::read_to_string(output).unwrap(), "previous diagram");
    }
}
