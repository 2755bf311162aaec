//! Command dispatching.
//!
//! Provides the [`Command`] trait each subcommand implements, the uniform
//! [`CommandResult`], and the [`CommandDispatcher`] that routes parsed CLI
//! arguments to the right implementation.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, PipelineArgs};
use crate::error::Result;
use crate::ui::Output;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `output`.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    api_url: String,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf, api_url: String) -> Self {
        Self {
            project_root,
            api_url,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Route the parsed CLI to a command and execute it.
    ///
    /// No subcommand means `pipeline` with default arguments.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Pipeline(args)) => {
                let cmd = super::pipeline::PipelineCommand::new(
                    &self.project_root,
                    &self.api_url,
                    args.clone(),
                );
                cmd.execute(output)
            }
            Some(Commands::Launch(args)) => {
                let cmd = super::launch::LaunchCommand::new(&self.api_url, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Watch(args)) => {
                let cmd = super::watch::WatchCommand::new(&self.api_url, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.api_url, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Render(args)) => {
                let cmd = super::render::RenderCommand::new(&self.project_root, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Init(args)) => {
                let cmd = super::init::InitCommand::new(&self.project_root, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(output)
            }
            None => {
                let cmd = super::pipeline::PipelineCommand::new(
                    &self.project_root,
                    &self.api_url,
                    PipelineArgs::default(),
                );
                cmd.execute(output)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(
            PathBuf::from("/test"),
            "https://api.drover.dev".to_string(),
        );
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }
}
