//! Drover - ELT pipeline orchestration for the Drover data platform.
//!
//! Drover is a CLI tool that replaces ad-hoc pipeline shell scripts with a
//! declarative stage file, rendered warehouse profiles, and a single command
//! that launches platform jobs and waits for them to finish.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Profile templates, `${VAR}` interpolation, and settings
//! - [`error`] - Error types and result aliases
//! - [`pipeline`] - Stage configuration, dependency ordering, and orchestration
//! - [`platform`] - Platform API client, credentials, and run polling
//! - [`secrets`] - Secret detection and output masking
//! - [`ui`] - Terminal output, themes, and spinners
//!
//! # Example
//!
//! ```
//! use drover::config::interpolation::resolve_template;
//!
//! // Resolve placeholders against any lookup; numeric values are quoted so
//! // YAML keeps them as strings.
//! let resolved = resolve_template("port: ${WAREHOUSE_PORT}", |name| {
//!     (name == "WAREHOUSE_PORT").then(|| "5439".to_string())
//! });
//! assert_eq!(resolved, "port: \"5439\"");
//! ```
//!
//! For end-to-end pipeline behavior, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod secrets;
pub mod ui;

pub use error::{DroverError, Result};
