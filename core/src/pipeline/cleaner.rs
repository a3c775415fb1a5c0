use crate::geo::geodesy::{to_radians, FEET_TO_METERS};
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::pipeline::row_pool::RowPool;
use crate::telemetry::log::LogManager;

/// Cleaning stage: drops zero-altitude samples and performs the unit
/// conversions (degrees to radians, feet to meters).
///
/// The altitude filter runs before segmentation, so removed rows never
/// influence flight boundaries.
pub struct CleanStage {
    pool: RowPool,
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl CleanStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: RowPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl PipelineStage for CleanStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        if self.config.is_none() {
            return Err(PipelineError::Internal("stage not initialized".into()));
        }

        let total = input.rows.len();
        let mut kept = self.pool.checkout(total)?;

        for mut row in input.rows {
            // Exactly zero means "on ground"; near-zero samples stay.
            if row.sample.altitude == 0.0 {
                continue;
            }
            row.latitude_rad = to_radians(row.sample.latitude);
            row.longitude_rad = to_radians(row.sample.longitude);
            row.altitude_m = row.sample.altitude * FEET_TO_METERS;
            kept.push(row);
        }

        let rows_dropped = total - kept.len();
        self.logger
            .record(&format!("CleanStage dropped {} ground rows", rows_dropped));

        let metadata = StageMetadata {
            rows_dropped,
            notes: vec![format!("altitude filter removed {}", rows_dropped)],
            ..Default::default()
        };

        Ok(StageOutput {
            rows: kept,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
    }
}
