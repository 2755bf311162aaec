//! Run model: statuses, launch acknowledgements, status payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a platform run.
///
/// The wire form is lowercase; strings this build does not know map to
/// `Unknown`, which is never terminal, so a newer platform status keeps
/// the waiter polling instead of crashing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether no further status transition will occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Cancelled | Self::Error
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Acknowledgement of a successfully launched run.
#[derive(Debug, Clone)]
pub struct LaunchedRun {
    /// Job the run belongs to.
    pub job: String,
    /// Platform-assigned run identifier. Opaque; never reinterpreted.
    pub run_id: String,
}

/// Status payload for a run, as returned by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct RunDetails {
    #[serde(default)]
    pub status: RunStatus,
    /// Failure detail, when the platform provides one.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}
