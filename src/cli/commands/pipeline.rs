//! The `pipeline` command: resolve configuration, then run the stages.
//!
//! This is the default command and the reason the tool exists: load the
//! pipeline definition, resolve the profile template against the
//! environment, attach the derived parameters to each stage, and hand the
//! stages to the orchestrator. Every stage gets a summary line with its
//! run id so follow-up commands can pick the runs up.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::PipelineArgs;
use crate::cli::commands::{wait_options, Command, CommandResult};
use crate::config::{
    load_profile, missing_required_vars, use_env_file, ResolvedProfile, TransformSettings,
    VarLookup, PARAM_PROFILE_YAML, PARAM_USE_ENV,
};
use crate::error::{DroverError, Result};
use crate::pipeline::{run_pipeline, PipelineConfig, StageConfig, StageEvent, StageKind, StageStatus};
use crate::platform::{AuthConfig, PlatformClient};
use crate::ui::{Output, PollSpinner};

pub struct PipelineCommand {
    project_root: PathBuf,
    api_url: String,
    args: PipelineArgs,
}

impl PipelineCommand {
    pub fn new(project_root: &Path, api_url: &str, args: PipelineArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            api_url: api_url.to_string(),
            args,
        }
    }

    /// Load the definition and attach derived parameters to each stage.
    ///
    /// Parameters declared in `drover.yml` always win over derived ones.
    fn prepare_stages(&self, output: &Output) -> Result<Vec<StageConfig>> {
        let use_env = use_env_file(|name| std::env::var(name).ok());
        debug!("Local .env participation: {use_env}");

        let pipeline = PipelineConfig::load(&self.project_root)?;
        let lookup = VarLookup::from_project(&self.project_root, use_env)?;

        for name in missing_required_vars(&pipeline.required_vars, &lookup) {
            output.warning(&format!("{name} is not set"));
        }

        let settings = TransformSettings::from_lookup(|name| lookup.get(name));

        let profile_path = self.project_root.join(&pipeline.profile);
        let profile_param = match load_profile(&profile_path) {
            Ok(template) => {
                let resolved = ResolvedProfile::resolve(&template, &lookup);
                let unresolved = resolved.unresolved();
                if !unresolved.is_empty() {
                    output.warning(&format!(
                        "Unresolved placeholder(s) in {}: {}",
                        pipeline.profile,
                        unresolved.join(", ")
                    ));
                }
                resolved.validate(&profile_path)?;
                Some(resolved.into_text())
            }
            Err(DroverError::ConfigNotFound { .. }) => {
                output.warning(&format!(
                    "{} not found; transform runs without a rendered profile",
                    pipeline.profile
                ));
                None
            }
            Err(e) => return Err(e),
        };

        let mut stages = pipeline.stages;
        let use_env_value = if use_env { "true" } else { "false" };
        for stage in &mut stages {
            stage
                .parameters
                .entry(PARAM_USE_ENV.to_string())
                .or_insert_with(|| use_env_value.to_string());

            if stage.kind == StageKind::Transform {
                for (key, value) in settings.to_parameters() {
                    stage.parameters.entry(key).or_insert(value);
                }
                if let Some(profile) = &profile_param {
                    stage
                        .parameters
                        .entry(PARAM_PROFILE_YAML.to_string())
                        .or_insert_with(|| profile.clone());
                }
            }
        }

        Ok(stages)
    }
}

impl Command for PipelineCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let stages = self.prepare_stages(output)?;

        let credentials = AuthConfig::from_env().resolve()?;
        let client = PlatformClient::new(&self.api_url, credentials)?;
        let options = wait_options(self.args.poll_interval, self.args.timeout);

        let mut spinner: Option<PollSpinner> = None;
        let report = run_pipeline(&client, &stages, options, |event| match event {
            StageEvent::Launching { stage, job } => {
                spinner = Some(output.spinner(&format!(
                    "Launching job '{job}' for stage '{stage}'..."
                )));
            }
            StageEvent::Launched { stage, run_id } => {
                if let Some(s) = &spinner {
                    s.set_message(&format!("Waiting for stage '{stage}' (run {run_id})..."));
                }
            }
            StageEvent::Polled { stage, details } => {
                if let Some(s) = &spinner {
                    s.set_message(&format!("Stage '{stage}': {}...", details.status));
                }
            }
            StageEvent::Finished { outcome } => {
                let detail = outcome.detail.as_deref().unwrap_or("unknown reason");
                match (spinner.take(), outcome.status) {
                    (Some(s), StageStatus::Succeeded) => s.finish_success(&format!(
                        "Stage '{}' succeeded (run {})",
                        outcome.stage,
                        outcome.run_id.as_deref().unwrap_or("unknown")
                    )),
                    (Some(s), _) => {
                        s.finish_error(&format!("Stage '{}' failed: {detail}", outcome.stage))
                    }
                    (None, StageStatus::Skipped) => {
                        output.skipped(&format!("Stage '{}' skipped: {detail}", outcome.stage))
                    }
                    (None, _) => {}
                }
            }
        })?;

        for outcome in &report.outcomes {
            match &outcome.run_id {
                Some(run_id) => output.result(&format!(
                    "{}: {} (run {})",
                    outcome.stage, outcome.status, run_id
                )),
                None => output.result(&format!("{}: {}", outcome.stage, outcome.status)),
            }
            if outcome.status == StageStatus::Failed {
                if let Some(detail) = &outcome.detail {
                    output.result(&format!("  {detail}"));
                }
            }
        }

        if report.success() {
            output.success("Pipeline complete");
            Ok(CommandResult::success())
        } else {
            output.error("Pipeline failed");
            Ok(CommandResult::failure(1))
        }
    }
}
