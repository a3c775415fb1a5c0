//! Feature-derivation core for the flight approach analysis platform.
//!
//! The modules mirror the legacy preprocessing pipeline while providing
//! typed records, explicit discard tags, and well-defined stage sequencing.

pub mod geo;
pub mod pipeline;
pub mod prelude;
pub mod records;
pub mod telemetry;

pub use pipeline::run::{run_pipeline, Pipeline};
pub use prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, Runway, StageInput, StageOutput,
};
