//! Stage and pipeline definitions.
//!
//! A pipeline is an ordered set of stages, each launching one platform job
//! and gated on the success of the stages it depends on. The definition
//! comes from `drover.yml` when present; otherwise the built-in two-stage
//! replicate-then-transform pipeline is used.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DroverError, Result};

/// Pipeline definition file name, looked up in the project root.
pub const PIPELINE_FILE: &str = "drover.yml";

/// What a stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// Extract/load job; launched with its declared parameters only.
    #[default]
    Replicate,
    /// SQL transform job; additionally receives the resolved profile and
    /// the transform settings as parameters.
    Transform,
}

/// One pipeline stage.
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    pub name: String,
    /// Platform job to launch.
    pub job: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub kind: StageKind,
}

impl StageConfig {
    fn new(name: &str, job: &str, kind: StageKind, depends_on: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            job: job.to_string(),
            parameters: BTreeMap::new(),
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
            kind,
        }
    }
}

/// The pipeline definition from `drover.yml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub stages: Vec<StageConfig>,
    /// Variables whose absence is surfaced as a warning before launch.
    #[serde(default = "default_required_vars")]
    pub required_vars: Vec<String>,
    /// Profile template path, relative to the project root.
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_required_vars() -> Vec<String> {
    vec!["WAREHOUSE_USER".to_string(), "WAREHOUSE_PASSWORD".to_string()]
}

fn default_profile() -> String {
    "profile.yml".to_string()
}

impl Default for PipelineConfig {
    /// The built-in pipeline: replicate, then transform gated on it.
    fn default() -> Self {
        Self {
            stages: vec![
                StageConfig::new("replicate", "replicate", StageKind::Replicate, &[]),
                StageConfig::new(
                    "transform",
                    "transform",
                    StageKind::Transform,
                    &["replicate"],
                ),
            ],
            required_vars: default_required_vars(),
            profile: default_profile(),
        }
    }
}

impl PipelineConfig {
    /// Load `drover.yml` from a project root, falling back to the built-in
    /// pipeline when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PIPELINE_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let config: Self = serde_yaml::from_str(&content).map_err(|e| {
                    DroverError::ConfigParseError {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DroverError::Io(e)),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(DroverError::PipelineConfig {
                message: "pipeline declares no stages".to_string(),
            });
        }
        Ok(())
    }
}

/// Terminal disposition of a stage within one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Succeeded,
    Failed,
    /// Never launched: a dependency did not succeed.
    Skipped,
}

impl StageStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// What happened to one stage.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub stage: String,
    pub job: String,
    /// Set once the platform acknowledged a launch.
    pub run_id: Option<String>,
    pub status: StageStatus,
    /// Failure reason or skip explanation.
    pub detail: Option<String>,
}

impl StageOutcome {
    pub fn succeeded(stage: &StageConfig, run_id: String) -> Self {
        Self {
            stage: stage.name.clone(),
            job: stage.job.clone(),
            run_id: Some(run_id),
            status: StageStatus::Succeeded,
            detail: None,
        }
    }

    pub fn failed(stage: &StageConfig, run_id: Option<String>, detail: String) -> Self {
        Self {
            stage: stage.name.clone(),
            job: stage.job.clone(),
            run_id,
            status: StageStatus::Failed,
            detail: Some(detail),
        }
    }

    pub fn skipped(stage: &StageConfig, unmet: &[String]) -> Self {
        let list = unmet
            .iter()
            .map(|d| format!("'{}'", d))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            stage: stage.name.clone(),
            job: stage.job.clone(),
            run_id: None,
            status: StageStatus::Skipped,
            detail: Some(format!("dependency {} did not succeed", list)),
        }
    }
}
