//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`drover pipeline`, `drover status`)
//! - Shared initialization logic
//! - Consistent global flag handling

use std::time::Duration;

use crate::platform::WaitOptions;

pub mod completions;
pub mod dispatcher;
pub mod init;
pub mod launch;
pub mod pipeline;
pub mod render;
pub mod status;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

/// Build waiter options from CLI flags expressed in whole seconds.
pub(crate) fn wait_options(poll_interval: u64, timeout: Option<u64>) -> WaitOptions {
    WaitOptions {
        poll_interval: Duration::from_secs(poll_interval),
        timeout: timeout.map(Duration::from_secs),
    }
}
