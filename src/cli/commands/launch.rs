//! The `launch` command: start a single platform job.

use std::collections::BTreeMap;

use anyhow::anyhow;

use crate::cli::args::LaunchArgs;
use crate::cli::commands::watch::watch_run;
use crate::cli::commands::{wait_options, Command, CommandResult};
use crate::error::{DroverError, Result};
use crate::platform::{AuthConfig, Platform, PlatformClient};
use crate::ui::Output;

pub struct LaunchCommand {
    api_url: String,
    args: LaunchArgs,
}

impl LaunchCommand {
    pub fn new(api_url: &str, args: LaunchArgs) -> Self {
        Self {
            api_url: api_url.to_string(),
            args,
        }
    }
}

impl Command for LaunchCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let parameters = parse_params(&self.args.params)?;

        let credentials = AuthConfig::from_env().resolve()?;
        let client = PlatformClient::new(&self.api_url, credentials)?;

        let launched = client.start_run(&self.args.job, &parameters)?;
        output.success(&format!(
            "Job '{}' accepted as run {}",
            launched.job, launched.run_id
        ));
        output.result(&launched.run_id);

        if !self.args.wait {
            return Ok(CommandResult::success());
        }

        let options = wait_options(self.args.poll_interval, self.args.timeout);
        watch_run(&client, &launched.run_id, options, output)
    }
}

/// Parse repeated `KEY=VALUE` arguments into a parameter map.
fn parse_params(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            return Err(DroverError::Other(anyhow!(
                "invalid --param '{item}', expected KEY=VALUE"
            )));
        };
        if key.is_empty() {
            return Err(DroverError::Other(anyhow!(
                "invalid --param '{item}', expected KEY=VALUE"
            )));
        }
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_params() {
        let params = parse_params(&["A=1".to_string(), "B=x=y".to_string()]).unwrap();
        assert_eq!(params.get("A"), Some(&"1".to_string()));
        assert_eq!(params.get("B"), Some(&"x=y".to_string()));
    }

    #[test]
    fn rejects_params_without_equals() {
        assert!(parse_params(&["NOPE".to_string()]).is_err());
    }

    #[test]
    fn rejects_empty_key() {
        assert!(parse_params(&["=value".to_string()]).is_err());
    }

    #[test]
    fn allows_empty_value() {
        let params = parse_params(&["KEY=".to_string()]).unwrap();
        assert_eq!(params.get("KEY"), Some(&String::new()));
    }

    #[test]
    fn later_duplicate_wins() {
        let params = parse_params(&["K=a".to_string(), "K=b".to_string()]).unwrap();
        assert_eq!(params.get("K"), Some(&"b".to_string()));
    }
}
