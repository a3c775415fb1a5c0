use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::records::TrackRow;
use crate::telemetry::log::LogManager;

/// Trimming stage: reduces each flight segment to its approach leg, the
/// prefix over which the distance to the runway threshold keeps
/// decreasing, ending at the first local minimum.
///
/// For each group the scan keeps row `i` while `distance[i] >
/// distance[i+1]`; at the first `i` where that fails, row `i` is kept
/// and the remainder of the group is discarded. Consequences that hold
/// by construction:
/// - a single-row group is kept whole;
/// - a strictly decreasing group is kept whole (the stop never fires);
/// - the leg always has at least one row.
///
/// Discarded rows are tagged via `approach = false` rather than dropped,
/// because the aggregator still reads full-segment altitudes. A row with
/// no computed distance terminates the scan.
pub struct TrimStage {
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl TrimStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }

    /// Index (relative to `group`) of the last approach-leg row.
    fn leg_end(group: &[TrackRow]) -> usize {
        let mut i = 0;
        while i + 1 < group.len() {
            let decreasing = match (group[i].distance_m, group[i + 1].distance_m) {
                (Some(current), Some(next)) => current > next,
                _ => false,
            };
            if !decreasing {
                break;
            }
            i += 1;
        }
        i
    }
}

impl Default for TrimStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for TrimStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        if self.config.is_none() {
            return Err(PipelineError::Internal("stage not initialized".into()));
        }

        let mut rows = input.rows;
        let mut discarded = 0usize;

        let mut start = 0;
        while start < rows.len() {
            let flight_id = rows[start].flight_id;
            let mut end = start;
            while end < rows.len() && rows[end].flight_id == flight_id {
                end += 1;
            }

            let last_kept = start + Self::leg_end(&rows[start..end]);
            for (index, row) in rows[start..end].iter_mut().enumerate() {
                let keep = start + index <= last_kept;
                row.approach = keep;
                if !keep {
                    discarded += 1;
                }
            }

            start = end;
        }

        self.logger
            .record(&format!("TrimStage tagged {} post-minimum rows", discarded));

        let metadata = StageMetadata {
            rows_dropped: discarded,
            notes: vec![format!("{} rows outside approach legs", discarded)],
            ..Default::default()
        };

        Ok(StageOutput { rows, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TrackSample;

    fn row(flight_id: u32, distance_m: Option<f64>) -> TrackRow {
        let mut row = TrackRow::from_sample(TrackSample {
            registration: "PK-GMF".into(),
            callsign: "GIA123".into(),
            aircraft_code: "B738".into(),
            latitude: 0.5,
            longitude: 101.5,
            altitude: 1000.0,
            vertical_speed: -700.0,
            heading: 100.0,
        });
        row.flight_id = flight_id;
        row.distance_m = distance_m;
        row
    }

    fn trim(rows: Vec<TrackRow>) -> Vec<TrackRow> {
        let mut stage = TrimStage::new();
        stage.initialize(&PipelineConfig::default()).unwrap();
        stage.execute(StageInput { rows }).unwrap().rows
    }

    fn kept(rows: &[TrackRow]) -> Vec<bool> {
        rows.iter().map(|r| r.approach).collect()
    }

    #[test]
    fn stops_at_first_local_minimum() {
        let rows = trim(vec![
            row(1, Some(5000.0)),
            row(1, Some(4000.0)),
            row(1, Some(4500.0)),
            row(1, Some(3000.0)),
        ]);
        assert_eq!(kept(&rows), vec![true, true, false, false]);
    }

    #[test]
    fn strictly_decreasing_group_is_kept_whole() {
        let rows = trim(vec![
            row(1, Some(5000.0)),
            row(1, Some(4000.0)),
            row(1, Some(3000.0)),
        ]);
        assert_eq!(kept(&rows), vec![true, true, true]);
    }

    #[test]
    fn single_row_group_is_kept() {
        let rows = trim(vec![row(1, Some(5000.0))]);
        assert_eq!(kept(&rows), vec![true]);
    }

    #[test]
    fn plateau_counts_as_local_minimum() {
        let rows = trim(vec![
            row(1, Some(5000.0)),
            row(1, Some(4000.0)),
            row(1, Some(4000.0)),
        ]);
        assert_eq!(kept(&rows), vec![true, true, false]);
    }

    #[test]
    fn missing_distance_terminates_the_scan() {
        let rows = trim(vec![row(1, Some(5000.0)), row(1, None), row(1, Some(3000.0))]);
        assert_eq!(kept(&rows), vec![true, false, false]);
    }

    #[test]
    fn groups_are_trimmed_independently() {
        let rows = trim(vec![
            row(1, Some(5000.0)),
            row(1, Some(4500.0)),
            row(2, Some(9000.0)),
            row(2, Some(9500.0)),
        ]);
        assert_eq!(kept(&rows), vec![true, true, true, false]);
    }

    #[test]
    fn trimming_is_idempotent() {
        let once = trim(vec![
            row(1, Some(5000.0)),
            row(1, Some(4000.0)),
            row(1, Some(4500.0)),
        ]);
        let leg: Vec<TrackRow> = once.into_iter().filter(|r| r.approach).collect();
        let expected: Vec<Option<f64>> = leg.iter().map(|r| r.distance_m).collect();

        let again = trim(leg);
        let distances: Vec<Option<f64>> = again
            .iter()
            .filter(|r| r.approach)
            .map(|r| r.distance_m)
            .collect();
        assert_eq!(distances, expected);
    }
}
