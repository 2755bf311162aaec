//! Fixed-interval polling until a run reaches a terminal status.
//!
//! The loop is poll-first: fetch the status, return it if terminal, check
//! the local timeout budget, then sleep for the poll interval. There is no
//! backoff and no jitter. A timeout is strictly a local decision to stop
//! waiting; the remote run is never cancelled and may still finish.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::{DroverError, Result};
use crate::platform::run::{RunDetails, RunStatus};

/// Answers "where is run X now". Implemented by `PlatformClient`.
pub trait StatusSource {
    fn run_details(&self, run_id: &str) -> Result<RunDetails>;
}

/// Polling knobs for a wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Pause between polls.
    pub poll_interval: Duration,
    /// Local waiting budget. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

/// Poll until the run is terminal, returning its final payload.
///
/// A non-success terminal status is still an `Ok` here: the payload is the
/// remote verdict, and judging it belongs to the caller.
pub fn wait_for_run(
    source: &dyn StatusSource,
    run_id: &str,
    options: WaitOptions,
) -> Result<RunDetails> {
    wait_with(source, run_id, options, thread::sleep, |_| {})
}

/// Like [`wait_for_run`], invoking `observe` after every poll so callers
/// can surface progress.
pub fn wait_for_run_observed<O>(
    source: &dyn StatusSource,
    run_id: &str,
    options: WaitOptions,
    observe: O,
) -> Result<RunDetails>
where
    O: FnMut(&RunDetails),
{
    wait_with(source, run_id, options, thread::sleep, observe)
}

fn wait_with<S, O>(
    source: &dyn StatusSource,
    run_id: &str,
    options: WaitOptions,
    mut sleep: S,
    mut observe: O,
) -> Result<RunDetails>
where
    S: FnMut(Duration),
    O: FnMut(&RunDetails),
{
    let mut waited = Duration::ZERO;

    loop {
        let details = source.run_details(run_id)?;
        observe(&details);

        if details.status.is_terminal() {
            debug!("Run {run_id} reached terminal status '{}'", details.status);
            return Ok(details);
        }

        if let Some(timeout) = options.timeout {
            if waited >= timeout {
                return Err(DroverError::WaitTimeout {
                    run_id: run_id.to_string(),
                    waited_secs: waited.as_secs(),
                });
            }
        }

        sleep(options.poll_interval);
        waited += options.poll_interval;
    }
}

/// Convert a terminal payload into success or the fatal run error.
pub fn require_success(run_id: &str, details: &RunDetails) -> Result<()> {
    if details.status.is_success() {
        return Ok(());
    }

    Err(DroverError::RunFailed {
        run_id: run_id.to_string(),
        status: details.status,
        detail: details
            .error
            .clone()
            .unwrap_or_else(|| "no error detail provided".to_string()),
    })
}
