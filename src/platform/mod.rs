//! Platform run API: authentication, HTTP client, run model and waiter.

pub mod auth;
pub mod client;
pub mod run;
pub mod waiter;

pub use auth::{AuthConfig, CredentialSource, Credentials};
pub use client::{Platform, PlatformClient};
pub use run::{LaunchedRun, RunDetails, RunStatus};
pub use waiter::{require_success, wait_for_run, wait_for_run_observed, StatusSource, WaitOptions};
