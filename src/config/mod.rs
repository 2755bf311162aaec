//! Configuration: environment files, placeholder interpolation, profile
//! resolution and transform settings.

pub mod env_file;
pub mod interpolation;
pub mod profile;
pub mod settings;

pub use profile::{load_profile, ResolvedProfile, VarLookup, PARAM_PROFILE_YAML};
pub use settings::{
    missing_required_vars, use_env_file, TransformSettings, PARAM_USE_ENV,
};
