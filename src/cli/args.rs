//! CLI argument definitions.
//!
//! All arguments are declared with clap's derive macros; [`Cli`] is the
//! entry point.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Default platform API base URL.
pub const DEFAULT_API_URL: &str = "https://api.drover.dev";

/// Drover - sequential ELT run orchestration.
#[derive(Debug, Parser)]
#[command(name = "drover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Platform API base URL
    #[arg(
        long,
        global = true,
        env = "DROVER_API_URL",
        default_value = DEFAULT_API_URL,
        value_name = "URL"
    )]
    pub api_url: String,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the pipeline: replicate, then transform (default if no command specified)
    Pipeline(PipelineArgs),

    /// Launch a single platform job
    Launch(LaunchArgs),

    /// Wait for an existing run to finish
    Watch(WatchArgs),

    /// Show the status of a run
    Status(StatusArgs),

    /// Render the resolved profile template
    Render(RenderArgs),

    /// Write starter configuration files
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `pipeline` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PipelineArgs {
    /// Seconds between status polls
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    pub poll_interval: u64,

    /// Give up waiting on a stage after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Default for PipelineArgs {
    fn default() -> Self {
        Self {
            poll_interval: 2,
            timeout: None,
        }
    }
}

/// Arguments for the `launch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LaunchArgs {
    /// Job to launch
    pub job: String,

    /// Run parameter as KEY=VALUE (repeatable)
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Wait for the run to reach a terminal status
    #[arg(long)]
    pub wait: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    pub poll_interval: u64,

    /// Give up waiting after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct WatchArgs {
    /// Run to wait for
    pub run_id: String,

    /// Seconds between status polls
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    pub poll_interval: u64,

    /// Give up waiting after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StatusArgs {
    /// Run to inspect
    pub run_id: String,

    /// Print the raw status payload as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RenderArgs {
    /// Profile template path (overrides the pipeline definition)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub no_mask: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
