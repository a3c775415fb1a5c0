use crate::records::{FlightFeatureRow, TrackRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runway discriminant selecting one of the two fixed threshold points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Runway {
    #[serde(rename = "18")]
    R18,
    #[serde(rename = "36")]
    R36,
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::R18 => write!(f, "18"),
            Runway::R36 => write!(f, "36"),
        }
    }
}

/// Fixed runway-threshold reference point, in radians.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdPoint {
    pub lat_rad: f64,
    pub lon_rad: f64,
}

/// Shared configuration threaded through every pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub earth_radius_m: f64,
    pub runway_18: ThresholdPoint,
    pub runway_36: ThresholdPoint,
    /// Inclusive band of `avg_elevation` values labeled `normal`, in degrees.
    pub elevation_normal: (f64, f64),
    /// Inclusive band of `avg_diff_vs` values labeled `normal`.
    pub diff_vs_normal: (f64, f64),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            earth_radius_m: 6_371_000.0,
            runway_18: ThresholdPoint {
                lat_rad: 0.008154,
                lon_rad: 1.770544,
            },
            runway_36: ThresholdPoint {
                lat_rad: 0.007877,
                lon_rad: 1.770536,
            },
            elevation_normal: (2.5, 3.5),
            diff_vs_normal: (60.0, 180.0),
        }
    }
}

impl PipelineConfig {
    pub fn threshold_point(&self, runway: Runway) -> ThresholdPoint {
        match runway {
            Runway::R18 => self.runway_18,
            Runway::R36 => self.runway_36,
        }
    }
}

/// Input table for a pipeline stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub rows: Vec<TrackRow>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub rows: Vec<TrackRow>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub rows_dropped: usize,
    pub flight_count: Option<usize>,
    pub degenerate_geometry: usize,
    pub feature_rows: Vec<FlightFeatureRow>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("row pool exhaustion: {0}")]
    PoolExhaustion(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Trait describing the table-to-table preprocessing stages.
pub trait PipelineStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()>;
    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput>;
    fn cleanup(&mut self);
}
