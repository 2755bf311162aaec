//! The `watch` command: wait on an existing run.

use crate::cli::args::WatchArgs;
use crate::cli::commands::{wait_options, Command, CommandResult};
use crate::error::Result;
use crate::platform::waiter::{require_success, wait_for_run_observed};
use crate::platform::{AuthConfig, PlatformClient, StatusSource, WaitOptions};
use crate::ui::Output;

pub struct WatchCommand {
    api_url: String,
    args: WatchArgs,
}

impl WatchCommand {
    pub fn new(api_url: &str, args: WatchArgs) -> Self {
        Self {
            api_url: api_url.to_string(),
            args,
        }
    }
}

impl Command for WatchCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let credentials = AuthConfig::from_env().resolve()?;
        let client = PlatformClient::new(&self.api_url, credentials)?;
        let options = wait_options(self.args.poll_interval, self.args.timeout);

        watch_run(&client, &self.args.run_id, options, output)
    }
}

/// Wait on a run with a spinner, mapping the terminal status to an exit
/// code. Shared with `launch --wait`.
pub(crate) fn watch_run(
    source: &dyn StatusSource,
    run_id: &str,
    options: WaitOptions,
    output: &Output,
) -> Result<CommandResult> {
    let spinner = output.spinner(&format!("Waiting for run {run_id}..."));
    let waited = wait_for_run_observed(source, run_id, options, |details| {
        spinner.set_message(&format!("Run {run_id}: {}...", details.status));
    });

    let details = match waited {
        Ok(details) => details,
        Err(e) => {
            spinner.finish_clear();
            return Err(e);
        }
    };

    match require_success(run_id, &details) {
        Ok(()) => {
            spinner.finish_success(&format!("Run {run_id} succeeded"));
            output.result(&format!("run {run_id}: {}", details.status));
            Ok(CommandResult::success())
        }
        Err(e) => {
            spinner.finish_clear();
            output.error(&e.to_string());
            Ok(CommandResult::failure(1))
        }
    }
}
