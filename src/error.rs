//! Error types for drover operations.
//!
//! This module defines [`DroverError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DroverError` for conditions that need distinct handling (credential
//!   lookup, launch responses, run verdicts, wait budgets)
//! - Use `anyhow::Error` (via `DroverError::Other`) for unexpected errors
//! - Missing optional environment variables are warnings, not errors; they are
//!   logged and execution continues

use std::path::PathBuf;
use thiserror::Error;

use crate::platform::RunStatus;

/// Core error type for drover operations.
#[derive(Debug, Error)]
pub enum DroverError {
    /// A required file (profile template, pipeline file) does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A configuration file or resolved template failed to parse.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The pipeline definition is structurally invalid.
    #[error("Invalid pipeline: {message}")]
    PipelineConfig { message: String },

    /// No usable platform credential was found. Raised before any network
    /// call is attempted.
    #[error("No platform credential available: {message}")]
    Authentication { message: String },

    /// The start-run response could not be understood.
    #[error("Launch of job '{job}' failed: {message}")]
    LaunchResponse { job: String, message: String },

    /// A watched run reached a terminal status other than succeeded. This is
    /// the remote system's verdict and halts the pipeline.
    #[error("Run {run_id} finished with status '{status}': {detail}")]
    RunFailed {
        run_id: String,
        status: RunStatus,
        detail: String,
    },

    /// The local polling budget ran out before the run reached a terminal
    /// status. The remote run keeps executing; this says nothing about its
    /// eventual outcome.
    #[error("Run {run_id} still not terminal after {waited_secs}s; giving up locally, the remote run continues")]
    WaitTimeout { run_id: String, waited_secs: u64 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for drover operations.
pub type Result<T> = std::result::Result<T, DroverError>;
