//! The `render` command: resolve the profile template and print it.

use std::path::{Path, PathBuf};

use crate::cli::args::RenderArgs;
use crate::cli::commands::{Command, CommandResult};
use crate::config::interpolation::placeholder_names;
use crate::config::{load_profile, use_env_file, ResolvedProfile, VarLookup};
use crate::error::Result;
use crate::pipeline::PipelineConfig;
use crate::secrets::SecretMatcher;
use crate::ui::Output;

pub struct RenderCommand {
    project_root: PathBuf,
    args: RenderArgs,
}

impl RenderCommand {
    pub fn new(project_root: &Path, args: RenderArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for RenderCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let use_env = use_env_file(|name| std::env::var(name).ok());
        let pipeline = PipelineConfig::load(&self.project_root)?;

        let path = self
            .args
            .profile
            .clone()
            .unwrap_or_else(|| self.project_root.join(&pipeline.profile));
        let template = load_profile(&path)?;
        let lookup = VarLookup::from_project(&self.project_root, use_env)?;

        let resolved = ResolvedProfile::resolve(&template, &lookup);
        let unresolved = resolved.unresolved();
        if !unresolved.is_empty() {
            output.warning(&format!(
                "Unresolved placeholder(s): {}",
                unresolved.join(", ")
            ));
        }
        resolved.validate(&path)?;

        let text = if self.args.no_mask {
            resolved.into_text()
        } else {
            let substituted: Vec<(String, String)> = placeholder_names(&template)
                .into_iter()
                .filter_map(|name| lookup.get(&name).map(|value| (name, value)))
                .collect();
            SecretMatcher::new().mask_resolved(resolved.text(), &substituted)
        };
        output.result(text.trim_end());

        Ok(CommandResult::success())
    }
}
