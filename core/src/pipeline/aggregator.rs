use crate::geo::stats::StatsHelper;
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::records::{FlightFeatureRow, Label, TrackRow};
use crate::telemetry::log::LogManager;

/// Aggregation stage: collapses each flight to one feature row.
///
/// `avg_elevation` and `avg_diff_vs` are means over the approach leg;
/// `avg_altitude_m` is the mean over the full untrimmed segment, which
/// is why the trimmer tags rows instead of dropping them. Tagged rows
/// are consumed here and never appear downstream. The representative
/// identifiers come from the leg's first row.
///
/// A flight with no defined leg elevations has undefined aggregates and
/// is excluded from the output entirely, never emitted with placeholder
/// values. Labels are attached afterwards by the classifier.
pub struct AggregateStage {
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl AggregateStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }

    fn collapse_group(group: &[TrackRow]) -> Option<FlightFeatureRow> {
        let leg: Vec<&TrackRow> = group.iter().filter(|r| r.approach).collect();
        let first = *leg.first()?;

        let elevations: Vec<f64> = leg.iter().filter_map(|r| r.elevation_deg).collect();
        let avg_elevation = StatsHelper::mean(&elevations)?;

        let diffs: Vec<f64> = leg.iter().map(|r| r.diff_vs).collect();
        let avg_diff_vs = StatsHelper::mean(&diffs)?;

        let altitudes: Vec<f64> = group.iter().map(|r| r.altitude_m).collect();
        let avg_altitude_m = StatsHelper::mean(&altitudes)?;

        Some(FlightFeatureRow {
            flight_id: first.flight_id,
            registration: first.sample.registration.clone(),
            callsign: first.sample.callsign.clone(),
            aircraft_code: first.sample.aircraft_code.clone(),
            runway: first.runway,
            avg_elevation,
            avg_diff_vs,
            avg_altitude_m,
            label_avg_elevation: Label::Abnormal,
            label_vertical_speed: Label::Abnormal,
        })
    }
}

impl Default for AggregateStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for AggregateStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        if self.config.is_none() {
            return Err(PipelineError::Internal("stage not initialized".into()));
        }

        let rows = input.rows;
        let mut feature_rows = Vec::new();
        let mut excluded = 0usize;

        let mut start = 0;
        while start < rows.len() {
            let flight_id = rows[start].flight_id;
            let mut end = start;
            while end < rows.len() && rows[end].flight_id == flight_id {
                end += 1;
            }

            match Self::collapse_group(&rows[start..end]) {
                Some(feature_row) => feature_rows.push(feature_row),
                None => {
                    excluded += 1;
                    self.logger
                        .flag(&format!("flight {} has undefined aggregates", flight_id));
                }
            }

            start = end;
        }

        self.logger.record(&format!(
            "AggregateStage collapsed {} flights, excluded {}",
            feature_rows.len(),
            excluded
        ));

        let metadata = StageMetadata {
            flight_count: Some(feature_rows.len()),
            feature_rows,
            notes: vec![format!("{} flights excluded", excluded)],
            ..Default::default()
        };

        Ok(StageOutput {
            rows: Vec::new(),
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TrackSample;

    fn row(
        flight_id: u32,
        approach: bool,
        elevation_deg: Option<f64>,
        diff_vs: f64,
        altitude_m: f64,
    ) -> TrackRow {
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
        row.approach = approach;
        row.elevation_deg = elevation_deg;
        row.diff_vs = diff_vs;
        row.altitude_m = altitude_m;
        row
    }

    fn aggregate(rows: Vec<TrackRow>) -> Vec<FlightFeatureRow> {
        let mut stage = AggregateStage::new();
        stage.initialize(&PipelineConfig::default()).unwrap();
        stage.execute(StageInput { rows }).unwrap().metadata.feature_rows
    }

    #[test]
    fn leg_means_exclude_tagged_rows() {
        let flights = aggregate(vec![
            row(1, true, Some(3.0), 0.0, 300.0),
            row(1, true, Some(4.0), 100.0, 280.0),
            row(1, false, Some(9.0), 400.0, 260.0),
        ]);
        assert_eq!(flights.len(), 1);
        assert!((flights[0].avg_elevation - 3.5).abs() < 1e-12);
        assert!((flights[0].avg_diff_vs - 50.0).abs() < 1e-12);
    }

    #[test]
    fn altitude_mean_spans_the_full_segment() {
        let flights = aggregate(vec![
            row(1, true, Some(3.0), 0.0, 300.0),
            row(1, false, Some(3.0), 0.0, 100.0),
        ]);
        assert!((flights[0].avg_altitude_m - 200.0).abs() < 1e-12);
    }

    #[test]
    fn single_row_flight_aggregates_to_its_own_values() {
        let flights = aggregate(vec![row(7, true, Some(2.8), 0.0, 310.0)]);
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_id, 7);
        assert_eq!(flights[0].avg_elevation, 2.8);
        assert_eq!(flights[0].avg_diff_vs, 0.0);
    }

    #[test]
    fn flight_without_defined_elevation_is_excluded() {
        let flights = aggregate(vec![
            row(1, true, None, 0.0, 300.0),
            row(2, true, Some(3.0), 0.0, 300.0),
        ]);
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight_id, 2);
    }
}
