//! Blocking HTTP client for the platform run API.
//!
//! Two endpoints are consumed: `POST /apps/{job}/runs` to start a run and
//! `GET /runs/{run_id}` to fetch its status. Launch failures are never
//! retried here; errors propagate to the orchestrator, which treats them
//! as fatal for the stage.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DroverError, Result};
use crate::platform::auth::Credentials;
use crate::platform::run::{LaunchedRun, RunDetails};
use crate::platform::waiter::StatusSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The platform surface the orchestrator needs: launch plus status.
pub trait Platform: StatusSource {
    fn start_run(
        &self,
        job: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<LaunchedRun>;
}

#[derive(Debug, Serialize)]
struct StartRunBody<'a> {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    parameters: &'a BTreeMap<String, String>,
}

/// Launch acknowledgement. Older deployments answer with `id`, newer ones
/// with `run_id`; either satisfies the contract.
#[derive(Debug, Deserialize)]
struct RunAck {
    run_id: Option<String>,
    id: Option<String>,
}

pub struct PlatformClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::blocking::Client,
}

impl PlatformClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    /// Fetch the raw status payload for a run.
    pub fn run_details_value(&self, run_id: &str) -> Result<serde_json::Value> {
        let url = format!("{}/runs/{}", self.base_url, run_id);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.credentials.bearer())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DroverError::Other(anyhow!(
                "status fetch for run {run_id} returned {status}"
            )));
        }

        Ok(response.json()?)
    }
}

impl Platform for PlatformClient {
    fn start_run(
        &self,
        job: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<LaunchedRun> {
        let url = format!("{}/apps/{}/runs", self.base_url, job);
        debug!("POST {url} ({} parameter(s))", parameters.len());

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.credentials.bearer())
            .json(&StartRunBody { parameters })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DroverError::LaunchResponse {
                job: job.to_string(),
                message: format!("platform returned {status}: {}", truncate_body(&body)),
            });
        }

        let ack: RunAck = response.json().map_err(|e| DroverError::LaunchResponse {
            job: job.to_string(),
            message: format!("undecodable acknowledgement: {e}"),
        })?;

        let run_id = ack
            .run_id
            .or(ack.id)
            .ok_or_else(|| DroverError::LaunchResponse {
                job: job.to_string(),
                message: "acknowledgement carries neither 'run_id' nor 'id'".to_string(),
            })?;

        debug!("Job '{job}' accepted as run {run_id}");
        Ok(LaunchedRun {
            job: job.to_string(),
            run_id,
        })
    }
}

impl StatusSource for PlatformClient {
    fn run_details(&self, run_id: &str) -> Result<RunDetails> {
        let value = self.run_details_value(run_id)?;
        serde_json::from_value(value).map_err(|e| {
            DroverError::Other(anyhow!("undecodable status payload for run {run_id}: {e}"))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.chars().count() > LIMIT {
        let head: String = body.chars().take(LIMIT).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
