//! Platform credential resolution.
//!
//! Priority order, first hit wins: `DROVER_API_KEY`, `DROVER_SESSION_TOKEN`,
//! then the cached session file `~/.drover/session.json`. Resolution runs
//! before any network call so a missing credential fails fast with guidance
//! instead of a 401 mid-pipeline.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DroverError, Result};

pub const ENV_API_KEY: &str = "DROVER_API_KEY";
pub const ENV_SESSION_TOKEN: &str = "DROVER_SESSION_TOKEN";

const SESSION_DIR: &str = ".drover";
const SESSION_FILE: &str = "session.json";

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    ApiKey,
    SessionToken,
    SessionFile,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ApiKey => "api key",
            Self::SessionToken => "session token",
            Self::SessionFile => "session file",
        };
        write!(f, "{}", s)
    }
}

/// A resolved platform credential. The token itself is never logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
    pub source: CredentialSource,
}

impl Credentials {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Deserialize)]
struct CachedSession {
    token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

/// Credential inputs, gathered before resolution.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    api_key: Option<String>,
    session_token: Option<String>,
    session_path: Option<PathBuf>,
}

impl AuthConfig {
    pub fn new(
        api_key: Option<String>,
        session_token: Option<String>,
        session_path: Option<PathBuf>,
    ) -> Self {
        Self {
            api_key,
            session_token,
            session_path,
        }
    }

    /// Gather credential inputs from the environment and home directory.
    pub fn from_env() -> Self {
        Self::new(
            non_empty_env(ENV_API_KEY),
            non_empty_env(ENV_SESSION_TOKEN),
            dirs::home_dir().map(|home| home.join(SESSION_DIR).join(SESSION_FILE)),
        )
    }

    /// Resolve the credential to use, in priority order.
    pub fn resolve(&self) -> Result<Credentials> {
        if let Some(key) = &self.api_key {
            debug!("Authenticating with {ENV_API_KEY}");
            return Ok(Credentials {
                token: key.clone(),
                source: CredentialSource::ApiKey,
            });
        }

        if let Some(token) = &self.session_token {
            debug!("Authenticating with {ENV_SESSION_TOKEN}");
            return Ok(Credentials {
                token: token.clone(),
                source: CredentialSource::SessionToken,
            });
        }

        if let Some(path) = &self.session_path {
            if let Some(token) = read_session_token(path) {
                debug!("Authenticating with session file {}", path.display());
                return Ok(Credentials {
                    token,
                    source: CredentialSource::SessionFile,
                });
            }
        }

        Err(DroverError::Authentication {
            message: format!(
                "set {ENV_API_KEY} or {ENV_SESSION_TOKEN}, or sign in so \
                 ~/{SESSION_DIR}/{SESSION_FILE} exists"
            ),
        })
    }
}

/// Read a usable token from a cached session file.
///
/// Missing, malformed or expired sessions yield `None` so resolution can
/// fall through to the error with guidance.
fn read_session_token(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;

    let session: CachedSession = match serde_json::from_str(&content) {
        Ok(session) => session,
        Err(e) => {
            warn!("Ignoring malformed session file {}: {}", path.display(), e);
            return None;
        }
    };

    if let Some(expires_at) = session.expires_at {
        if expires_at <= Utc::now() {
            warn!(
                "Session in {} expired at {}; ignoring it",
                path.display(),
                expires_at
            );
            return None;
        }
    }

    if session.token.trim().is_empty() {
        return None;
    }
    Some(session.token)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
