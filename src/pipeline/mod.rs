//! Pipeline definition, ordering and orchestration.

pub mod graph;
pub mod orchestrator;
pub mod stage;

pub use graph::StageGraph;
pub use orchestrator::{run_pipeline, PipelineReport, StageEvent};
pub use stage::{
    PipelineConfig, StageConfig, StageKind, StageOutcome, StageStatus, PIPELINE_FILE,
};
