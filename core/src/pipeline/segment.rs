use crate::geo::stats::StatsHelper;
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::telemetry::log::LogManager;

/// Segmentation stage: computes the vertical-speed difference series and
/// assigns `flight_id` by a cumulative boundary counter.
///
/// `diff_vs` is computed once here, over the whole filtered table and
/// before trimming. That matches the legacy behavior exactly: a flight's
/// first row differences against the previous flight's last row. Known
/// limitation, kept on purpose.
///
/// A boundary opens at every row whose (registration, callsign) pair
/// differs from the previous row's; the counter is seeded so the very
/// first row begins flight 1.
pub struct SegmentStage {
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl SegmentStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl Default for SegmentStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for SegmentStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        if self.config.is_none() {
            return Err(PipelineError::Internal("stage not initialized".into()));
        }

        let mut rows = input.rows;

        let speeds: Vec<f64> = rows.iter().map(|r| r.sample.vertical_speed).collect();
        let diffs = StatsHelper::abs_diff_series(&speeds);
        for (row, diff) in rows.iter_mut().zip(diffs) {
            row.diff_vs = diff;
        }

        let mut flight_id = 0u32;
        for i in 0..rows.len() {
            let boundary = i == 0
                || rows[i].sample.registration != rows[i - 1].sample.registration
                || rows[i].sample.callsign != rows[i - 1].sample.callsign;
            if boundary {
                flight_id += 1;
            }
            rows[i].flight_id = flight_id;
        }

        self.logger
            .record(&format!("SegmentStage labeled {} flights", flight_id));

        let metadata = StageMetadata {
            flight_count: Some(flight_id as usize),
            notes: vec![format!("{} flight segments", flight_id)],
            ..Default::default()
        };

        Ok(StageOutput { rows, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
