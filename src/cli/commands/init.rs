//! Init command implementation.
//!
//! The `drover init` command writes starter configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};

use crate::cli::args::InitArgs;
use crate::error::{DroverError, Result};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// Embedded starter files.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Embedded template name and the file it becomes in the project root.
const STARTERS: &[(&str, &str)] = &[
    ("drover.yml", "drover.yml"),
    ("profile.yml", "profile.yml"),
    ("env.example", ".env.example"),
];

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for InitCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        for (source, target_name) in STARTERS {
            let target = self.project_root.join(target_name);
            if target.exists() && !self.args.force {
                output.skipped(&format!(
                    "{target_name} already exists (use --force to overwrite)"
                ));
                continue;
            }

            let file = TEMPLATES_DIR
                .get_file(source)
                .ok_or_else(|| DroverError::ConfigNotFound {
                    path: format!("templates/{source}").into(),
                })?;
            fs::write(&target, file.contents())?;
            output.success(&format!("Wrote {target_name}"));
        }

        output.status("\nNext steps:");
        output.status("  1. Review drover.yml and profile.yml");
        output.status("  2. Copy .env.example to .env and fill in warehouse credentials");
        output.status("  3. Run `drover` to launch the pipeline");

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use tempfile::TempDir;

    fn quiet_output() -> Output {
        Output::new(OutputMode::Quiet, false)
    }

    #[test]
    fn init_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());

        assert_eq!(cmd.project_root(), temp.path());
    }

    #[test]
    fn init_writes_starter_files() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());

        let result = cmd.execute(&quiet_output()).unwrap();

        assert!(result.success);
        assert!(temp.path().join("drover.yml").exists());
        assert!(temp.path().join("profile.yml").exists());
        assert!(temp.path().join(".env.example").exists());
    }

    #[test]
    fn init_keeps_existing_files_without_force() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("drover.yml"), "stages: []\n").unwrap();

        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let result = cmd.execute(&quiet_output()).unwrap();

        assert!(result.success);
        let kept = fs::read_to_string(temp.path().join("drover.yml")).unwrap();
        assert_eq!(kept, "stages: []\n");
        // The other starters are still written.
        assert!(temp.path().join("profile.yml").exists());
    }

    #[test]
    fn init_with_force_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("drover.yml"), "stages: []\n").unwrap();

        let cmd = InitCommand::new(temp.path(), InitArgs { force: true });
        let result = cmd.execute(&quiet_output()).unwrap();

        assert!(result.success);
        let written = fs::read_to_string(temp.path().join("drover.yml")).unwrap();
        assert_ne!(written, "stages: []\n");
        assert!(written.contains("stages:"));
    }

    #[test]
    fn starter_pipeline_parses() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        cmd.execute(&quiet_output()).unwrap();

        let config = crate::pipeline::PipelineConfig::load(temp.path()).unwrap();
        assert!(!config.stages.is_empty());
    }

    #[test]
    fn starter_profile_references_warehouse_vars() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        cmd.execute(&quiet_output()).unwrap();

        let profile = fs::read_to_string(temp.path().join("profile.yml")).unwrap();
        assert!(profile.contains("${WAREHOUSE_USER}"));
        assert!(profile.contains("${WAREHOUSE_PASSWORD}"));
    }
}
