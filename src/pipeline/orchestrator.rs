//! Dependency-gated sequential stage execution.
//!
//! Stages run one at a time in execution order: launch the job, wait for a
//! terminal status, record the outcome. A stage launches only when every
//! stage it depends on has succeeded; otherwise it is skipped. Nothing is
//! rolled back on failure, and a run that already started keeps executing
//! remotely.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{DroverError, Result};
use crate::pipeline::graph::StageGraph;
use crate::pipeline::stage::{StageConfig, StageOutcome};
use crate::platform::waiter::{require_success, wait_for_run_observed, WaitOptions};
use crate::platform::{Platform, RunDetails};

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug)]
pub enum StageEvent<'a> {
    /// About to launch the stage's job.
    Launching { stage: &'a str, job: &'a str },
    /// The platform acknowledged the launch.
    Launched { stage: &'a str, run_id: &'a str },
    /// One status poll completed.
    Polled {
        stage: &'a str,
        details: &'a RunDetails,
    },
    /// The stage reached its disposition.
    Finished { outcome: &'a StageOutcome },
}

/// What happened across one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub outcomes: Vec<StageOutcome>,
}

impl PipelineReport {
    /// True when every stage ran and succeeded.
    pub fn success(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.status.is_success())
    }
}

/// Run the pipeline to completion, one stage at a time.
///
/// Configuration problems (cycles, unknown dependencies) fail fast with an
/// error before anything launches. Runtime stage failures are captured in
/// the report instead, so every stage gets a disposition and the caller
/// decides the exit code from [`PipelineReport::success`].
pub fn run_pipeline<P, F>(
    platform: &P,
    stages: &[StageConfig],
    options: WaitOptions,
    mut observe: F,
) -> Result<PipelineReport>
where
    P: Platform,
    F: FnMut(StageEvent<'_>),
{
    let graph = StageGraph::build(stages)?;
    let order = graph.execution_order()?;

    let mut succeeded: HashSet<String> = HashSet::new();
    let mut outcomes = Vec::with_capacity(order.len());

    for name in &order {
        let stage = stages.iter().find(|s| &s.name == name).ok_or_else(|| {
            DroverError::PipelineConfig {
                message: format!("execution order names unknown stage '{name}'"),
            }
        })?;

        let unmet: Vec<String> = graph
            .dependencies_of(name)
            .iter()
            .filter(|d| !succeeded.contains(d.as_str()))
            .cloned()
            .collect();

        if !unmet.is_empty() {
            info!(
                "Skipping stage '{}': {} did not succeed",
                stage.name,
                unmet.join(", ")
            );
            let outcome = StageOutcome::skipped(stage, &unmet);
            observe(StageEvent::Finished { outcome: &outcome });
            outcomes.push(outcome);
            continue;
        }

        debug!("Launching job '{}' for stage '{}'", stage.job, stage.name);
        observe(StageEvent::Launching {
            stage: &stage.name,
            job: &stage.job,
        });

        let launched = match platform.start_run(&stage.job, &stage.parameters) {
            Ok(launched) => launched,
            Err(e) => {
                let outcome = StageOutcome::failed(stage, None, e.to_string());
                observe(StageEvent::Finished { outcome: &outcome });
                outcomes.push(outcome);
                continue;
            }
        };

        observe(StageEvent::Launched {
            stage: &stage.name,
            run_id: &launched.run_id,
        });

        let waited = wait_for_run_observed(platform, &launched.run_id, options, |details| {
            observe(StageEvent::Polled {
                stage: &stage.name,
                details,
            });
        });

        let outcome = match waited {
            Ok(details) => match require_success(&launched.run_id, &details) {
                Ok(()) => {
                    succeeded.insert(stage.name.clone());
                    info!(
                        "Stage '{}' succeeded as run {}",
                        stage.name, launched.run_id
                    );
                    StageOutcome::succeeded(stage, launched.run_id.clone())
                }
                Err(e) => StageOutcome::failed(stage, Some(launched.run_id.clone()), e.to_string()),
            },
            Err(e) => StageOutcome::failed(stage, Some(launched.run_id.clone()), e.to_string()),
        };

        observe(StageEvent::Finished { outcome: &outcome });
        outcomes.push(outcome);
    }

    Ok(PipelineReport { outcomes })
}
