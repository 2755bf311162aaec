//! Environment-driven settings for the transform stage.
//!
//! The transform job is configured entirely through `TRANSFORM_*` variables
//! so the same pipeline definition works locally and on the platform.
//! Values are read leniently: whitespace is trimmed, empty means unset, and
//! an unparseable value is a warning plus the default, never an error.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::profile::VarLookup;
use crate::secrets::SecretMatcher;

/// Controls whether a local `.env` file participates in resolution.
pub const PARAM_USE_ENV: &str = "DROVER_PARAMETER_USE_ENV";

const ENV_COMMANDS: &str = "TRANSFORM_COMMANDS";
const ENV_SELECT: &str = "TRANSFORM_SELECT";
const ENV_TARGET: &str = "TRANSFORM_TARGET";
const ENV_THREADS: &str = "TRANSFORM_THREADS";
const ENV_VARS_JSON: &str = "TRANSFORM_VARS_JSON";
const ENV_FULL_REFRESH: &str = "TRANSFORM_FULL_REFRESH";

const DEFAULT_COMMAND: &str = "run";
const DEFAULT_TARGET: &str = "dev";

/// Variable payload forwarded to the transform job.
#[derive(Debug, Clone, PartialEq)]
pub enum VarsPayload {
    /// Parsed JSON, re-serialized compactly when forwarded.
    Json(serde_json::Value),
    /// Unparseable input forwarded verbatim.
    Raw(String),
}

impl VarsPayload {
    fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                warn!("{ENV_VARS_JSON} is not valid JSON ({e}); forwarding the raw value");
                Self::Raw(raw.to_string())
            }
        }
    }

    fn as_parameter(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// Settings for the transform stage, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSettings {
    /// Command plan, in execution order. Defaults to `["run"]`.
    pub commands: Vec<String>,
    /// Optional node selector.
    pub select: Option<String>,
    /// Target profile name. Defaults to `"dev"`.
    pub target: String,
    /// Optional worker thread count.
    pub threads: Option<u32>,
    /// Optional variable payload.
    pub vars: Option<VarsPayload>,
    /// Whether to rebuild incremental models from scratch.
    pub full_refresh: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            commands: vec![DEFAULT_COMMAND.to_string()],
            select: None,
            target: DEFAULT_TARGET.to_string(),
            threads: None,
            vars: None,
            full_refresh: false,
        }
    }
}

impl TransformSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let commands = match env_value(&lookup, ENV_COMMANDS) {
            Some(raw) => {
                let parsed: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                if parsed.is_empty() {
                    vec![DEFAULT_COMMAND.to_string()]
                } else {
                    parsed
                }
            }
            None => vec![DEFAULT_COMMAND.to_string()],
        };

        let select = env_value(&lookup, ENV_SELECT);

        let target =
            env_value(&lookup, ENV_TARGET).unwrap_or_else(|| DEFAULT_TARGET.to_string());

        let threads = env_value(&lookup, ENV_THREADS).and_then(|raw| match raw.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!("{ENV_THREADS} value '{raw}' is not a number; ignoring it");
                None
            }
        });

        let vars = env_value(&lookup, ENV_VARS_JSON).map(|raw| VarsPayload::parse(&raw));

        let full_refresh = env_value(&lookup, ENV_FULL_REFRESH)
            .map(|raw| parse_bool_flag(&raw))
            .unwrap_or(false);

        Self {
            commands,
            select,
            target,
            threads,
            vars,
            full_refresh,
        }
    }

    /// Render the settings as run parameters for the transform job.
    ///
    /// Optional fields are omitted entirely rather than sent empty;
    /// `TRANSFORM_FULL_REFRESH` appears only when true.
    pub fn to_parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(ENV_COMMANDS.to_string(), self.commands.join(","));
        params.insert(ENV_TARGET.to_string(), self.target.clone());

        if let Some(select) = &self.select {
            params.insert(ENV_SELECT.to_string(), select.clone());
        }
        if let Some(threads) = self.threads {
            params.insert(ENV_THREADS.to_string(), threads.to_string());
        }
        if let Some(vars) = &self.vars {
            params.insert(ENV_VARS_JSON.to_string(), vars.as_parameter());
        }
        if self.full_refresh {
            params.insert(ENV_FULL_REFRESH.to_string(), "true".to_string());
        }

        params
    }
}

/// Whether a local `.env` file should participate in resolution.
///
/// Unset defaults to true so local development picks up overrides; the
/// hosted launcher sets it to false and supplies parameters directly.
pub fn use_env_file<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match env_value(&lookup, PARAM_USE_ENV) {
        Some(raw) => raw.eq_ignore_ascii_case("true"),
        None => true,
    }
}

/// Check the presence of required variables without echoing secrets.
///
/// Returns the names that are missing; absence is a warning for the
/// caller to surface, never an error.
pub fn missing_required_vars(required: &[String], lookup: &VarLookup) -> Vec<String> {
    let matcher = SecretMatcher::new();
    let mut missing = Vec::new();

    for name in required {
        match lookup.get(name) {
            Some(value) => {
                if matcher.is_secret_name(name) {
                    debug!("{name} is set (value hidden)");
                } else {
                    debug!("{name} is set to '{value}'");
                }
            }
            None => missing.push(name.clone()),
        }
    }

    missing
}

/// Read one variable: trims whitespace, treats empty as unset.
fn env_value<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a permissive boolean flag: "1", "true" and "yes" are true.
fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
