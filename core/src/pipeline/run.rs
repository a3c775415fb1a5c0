use crate::pipeline::classifier;
use crate::pipeline::{AggregateStage, CleanStage, GeometryStage, SegmentStage, TrimStage};
use crate::prelude::{PipelineConfig, PipelineResult, PipelineStage, StageInput, StageOutput};
use crate::records::{FlightFeatureRow, TrackRow, TrackSample};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, MetricsSnapshot};

const STAGE_POOL_SIZE: usize = 4;

/// Orchestrates the fixed stage order:
/// clean (filter + convert) -> geometry (runway, distance, elevation) ->
/// vertical-speed diff + segment -> trim -> aggregate -> label.
///
/// Each stage requires the previous stage's output; reordering breaks
/// the pipeline invariants. Empty input, or input emptied by the
/// altitude filter, is success with an empty table.
pub struct Pipeline {
    config: PipelineConfig,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn step<S: PipelineStage>(&self, stage: &mut S, rows: Vec<TrackRow>) -> PipelineResult<StageOutput> {
        stage.initialize(&self.config)?;
        let result = stage.execute(StageInput { rows });
        stage.cleanup();
        match &result {
            Ok(output) => {
                self.metrics.add_rows_dropped(output.metadata.rows_dropped);
                self.metrics
                    .add_degenerate_geometry(output.metadata.degenerate_geometry);
            }
            Err(_) => self.metrics.record_error(),
        }
        result
    }

    /// Single entry point: raw table in, labeled per-flight table out.
    pub fn run(&self, samples: Vec<TrackSample>) -> PipelineResult<Vec<FlightFeatureRow>> {
        self.metrics.add_rows_in(samples.len());
        let rows: Vec<TrackRow> = samples.into_iter().map(TrackRow::from_sample).collect();

        let clean = self.step(&mut CleanStage::new(STAGE_POOL_SIZE), rows)?;
        let geometry = self.step(&mut GeometryStage::new(STAGE_POOL_SIZE), clean.rows)?;
        let segmented = self.step(&mut SegmentStage::new(), geometry.rows)?;
        let trimmed = self.step(&mut TrimStage::new(), segmented.rows)?;
        let aggregated = self.step(&mut AggregateStage::new(), trimmed.rows)?;

        let mut feature_rows = aggregated.metadata.feature_rows;
        classifier::apply_labels(&mut feature_rows, &self.config);

        self.metrics.add_flights_emitted(feature_rows.len());
        self.logger
            .record(&format!("pipeline emitted {} flights", feature_rows.len()));

        Ok(feature_rows)
    }
}

/// Convenience wrapper for one-shot runs.
pub fn run_pipeline(
    samples: Vec<TrackSample>,
    config: &PipelineConfig,
) -> PipelineResult<Vec<FlightFeatureRow>> {
    Pipeline::new(config.clone()).run(samples)
}
