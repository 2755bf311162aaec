//! Stage dependency ordering.

use std::collections::{HashMap, HashSet};

use crate::error::{DroverError, Result};
use crate::pipeline::stage::StageConfig;

/// Dependency relationships between the stages of one pipeline.
#[derive(Debug, Clone)]
pub struct StageGraph {
    /// Stage names in declaration order.
    names: Vec<String>,
    /// Direct dependencies per stage.
    dependencies: HashMap<String, Vec<String>>,
}

impl StageGraph {
    /// Build the graph, rejecting duplicate names and unknown dependencies.
    pub fn build(stages: &[StageConfig]) -> Result<Self> {
        let mut names = Vec::with_capacity(stages.len());
        let mut dependencies: HashMap<String, Vec<String>> = HashMap::new();

        for stage in stages {
            if dependencies.contains_key(&stage.name) {
                return Err(DroverError::PipelineConfig {
                    message: format!("duplicate stage name '{}'", stage.name),
                });
            }
            names.push(stage.name.clone());
            dependencies.insert(stage.name.clone(), stage.depends_on.clone());
        }

        for stage in stages {
            for dep in &stage.depends_on {
                if !dependencies.contains_key(dep) {
                    return Err(DroverError::PipelineConfig {
                        message: format!(
                            "stage '{}' depends on unknown stage '{}'",
                            stage.name, dep
                        ),
                    });
                }
            }
        }

        Ok(Self {
            names,
            dependencies,
        })
    }

    /// Direct dependencies of a stage.
    pub fn dependencies_of(&self, stage: &str) -> &[String] {
        self.dependencies
            .get(stage)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether every dependency of `stage` is in the succeeded set.
    pub fn is_satisfied(&self, stage: &str, succeeded: &HashSet<String>) -> bool {
        self.dependencies_of(stage)
            .iter()
            .all(|d| succeeded.contains(d))
    }

    /// Stage names in execution order: dependencies before dependents, with
    /// declaration order as the tie-break so runs are reproducible. A cycle
    /// is a configuration error.
    pub fn execution_order(&self) -> Result<Vec<String>> {
        let mut placed: HashSet<&str> = HashSet::with_capacity(self.names.len());
        let mut order = Vec::with_capacity(self.names.len());

        while order.len() < self.names.len() {
            let mut advanced = false;

            for name in &self.names {
                if placed.contains(name.as_str()) {
                    continue;
                }
                let ready = self
                    .dependencies_of(name)
                    .iter()
                    .all(|d| placed.contains(d.as_str()));
                if ready {
                    placed.insert(name.as_str());
                    order.push(name.clone());
                    advanced = true;
                }
            }

            if !advanced {
                let stuck: Vec<&str> = self
                    .names
                    .iter()
                    .filter(|n| !placed.contains(n.as_str()))
                    .map(String::as_str)
                    .collect();
                return Err(DroverError::PipelineConfig {
                    message: format!(
                        "stage dependencies form a cycle involving {}",
                        stuck.join(", ")
                    ),
                });
            }
        }

        Ok(order)
    }
}
