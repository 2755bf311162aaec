//! Profile template loading and resolution.
//!
//! A profile is a YAML file with `${NAME}` placeholders. It is loaded as
//! text, resolved against a variable lookup, validated as YAML, and handed
//! to the transform run as an explicit parameter. The resolved text is a
//! value that flows through the call graph; it is never written back to
//! disk or published through the process environment.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::env_file::load_optional_env_file;
use crate::config::interpolation::{placeholder_names, resolve_template};
use crate::error::{DroverError, Result};

/// Run parameter carrying the resolved profile text to the transform job.
pub const PARAM_PROFILE_YAML: &str = "PROFILE_YAML";

/// Variable lookup used during template resolution.
///
/// Values from a project `.env` file override the process environment,
/// mirroring how the hosted launcher injects parameters over the ambient
/// environment.
#[derive(Debug, Clone, Default)]
pub struct VarLookup {
    overrides: HashMap<String, String>,
}

impl VarLookup {
    /// Lookup backed by the process environment only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup with explicit override values layered over the environment.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Build the lookup for a project directory.
    ///
    /// When `use_env_file` is set, a `.env` file in the project root is
    /// loaded and its values take precedence over the process environment.
    pub fn from_project(root: &Path, use_env_file: bool) -> Result<Self> {
        let overrides = if use_env_file {
            let path = root.join(".env");
            let vars = load_optional_env_file(&path)?;
            if !vars.is_empty() {
                debug!("Loaded {} override(s) from {}", vars.len(), path.display());
            }
            vars
        } else {
            HashMap::new()
        };

        Ok(Self { overrides })
    }

    /// Resolve one variable. Overrides win; an env var set to the empty
    /// string still counts as set.
    pub fn get(&self, name: &str) -> Option<String> {
        self.overrides
            .get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok())
    }
}

/// Read a profile template from disk.
pub fn load_profile(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            DroverError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DroverError::Io(e)
        }
    })
}

/// A profile template after placeholder resolution.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    text: String,
}

impl ResolvedProfile {
    /// Resolve a template against a variable lookup.
    pub fn resolve(template: &str, lookup: &VarLookup) -> Self {
        let referenced = placeholder_names(template);
        let text = resolve_template(template, |name| lookup.get(name));
        debug!(
            "Resolved profile template ({} placeholder name(s) referenced)",
            referenced.len()
        );
        Self { text }
    }

    /// The resolved template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the profile, yielding the resolved text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Placeholder names still present after resolution, sorted.
    pub fn unresolved(&self) -> Vec<String> {
        let mut names: Vec<String> = placeholder_names(&self.text).into_iter().collect();
        names.sort();
        names
    }

    /// Check that the resolved text is well-formed YAML.
    ///
    /// `origin` names the template file in the error.
    pub fn validate(&self, origin: &Path) -> Result<()> {
        serde_yaml::from_str::<serde_yaml::Value>(&self.text).map_err(|e| {
            DroverError::ConfigParseError {
                path: origin.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }
}
