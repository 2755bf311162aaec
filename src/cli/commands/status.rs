//! The `status` command: one-shot run status lookup.

use crate::cli::args::StatusArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::error::{DroverError, Result};
use crate::platform::{AuthConfig, PlatformClient, StatusSource};
use crate::ui::Output;

pub struct StatusCommand {
    api_url: String,
    args: StatusArgs,
}

impl StatusCommand {
    pub fn new(api_url: &str, args: StatusArgs) -> Self {
        Self {
            api_url: api_url.to_string(),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let credentials = AuthConfig::from_env().resolve()?;
        let client = PlatformClient::new(&self.api_url, credentials)?;

        if self.args.json {
            let value = client.run_details_value(&self.args.run_id)?;
            let pretty =
                serde_json::to_string_pretty(&value).map_err(|e| DroverError::Other(e.into()))?;
            output.result(&pretty);
            return Ok(CommandResult::success());
        }

        let details = client.run_details(&self.args.run_id)?;
        output.result(&format!("run {}: {}", self.args.run_id, details.status));
        if let Some(error) = &details.error {
            output.result(&format!("error: {error}"));
        }
        if let Some(created) = details.created_at {
            output.status(&format!("started:  {}", created.to_rfc3339()));
        }
        if let Some(finished) = details.finished_at {
            output.status(&format!("finished: {}", finished.to_rfc3339()));
        }

        // Reporting a failed run is still a successful lookup.
        Ok(CommandResult::success())
    }
}
