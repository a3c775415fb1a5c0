use crate::geo::geodesy::{classify_runway, elevation_angle, haversine_distance};
use crate::prelude::{
    PipelineConfig, PipelineError, PipelineResult, PipelineStage, StageInput, StageMetadata,
    StageOutput,
};
use crate::pipeline::row_pool::RowPool;
use crate::telemetry::log::LogManager;

/// Geometry stage: classifies each row onto a runway, computes the
/// haversine distance to that runway's threshold point and the elevation
/// angle above it.
///
/// Rows whose heading serves neither runway keep `None` in `runway`,
/// `distance_m` and `elevation_deg`; they are excluded downstream
/// instead of carrying NaN placeholders.
pub struct GeometryStage {
    pool: RowPool,
    config: Option<PipelineConfig>,
    logger: LogManager,
}

impl GeometryStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: RowPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl PipelineStage for GeometryStage {
    fn initialize(&mut self, config: &PipelineConfig) -> PipelineResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PipelineResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| PipelineError::Internal("stage not initialized".into()))?;

        let mut rows = self.pool.checkout(input.rows.len())?;
        let mut degenerate = 0usize;
        let mut unclassified = 0usize;

        for mut row in input.rows {
            match classify_runway(row.sample.heading) {
                Some(runway) => {
                    let threshold = config.threshold_point(runway);
                    let distance = haversine_distance(
                        row.latitude_rad,
                        row.longitude_rad,
                        threshold.lat_rad,
                        threshold.lon_rad,
                        config.earth_radius_m,
                    );
                    if distance == 0.0 {
                        degenerate += 1;
                        self.logger.flag(&format!(
                            "degenerate geometry: {} over threshold {}",
                            row.sample.callsign, runway
                        ));
                    }
                    row.runway = Some(runway);
                    row.distance_m = Some(distance);
                    row.elevation_deg = Some(elevation_angle(row.altitude_m, distance));
                }
                None => {
                    unclassified += 1;
                    self.logger.flag(&format!(
                        "heading {} outside both runway classes ({})",
                        row.sample.heading, row.sample.callsign
                    ));
                }
            }
            rows.push(row);
        }

        self.logger.record(&format!(
            "GeometryStage computed {} rows, {} degenerate, {} unclassified",
            rows.len(),
            degenerate,
            unclassified
        ));

        let metadata = StageMetadata {
            degenerate_geometry: degenerate,
            notes: vec![format!("{} unclassified headings", unclassified)],
            ..Default::default()
        };

        Ok(StageOutput { rows, metadata })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Runway;
    use crate::records::{TrackRow, TrackSample};

    fn row(latitude: f64, longitude: f64, heading: f64) -> TrackRow {
        let mut row = TrackRow::from_sample(TrackSample {
            registration: "PK-GMF".into(),
            callsign: "GIA123".into(),
            aircraft_code: "B738".into(),
            latitude,
            longitude,
            altitude: 1000.0,
            vertical_speed: -700.0,
            heading,
        });
        row.latitude_rad = latitude.to_radians();
        row.longitude_rad = longitude.to_radians();
        row.altitude_m = 304.8;
        row
    }

    fn stage() -> GeometryStage {
        let mut stage = GeometryStage::new(4);
        stage.initialize(&PipelineConfig::default()).unwrap();
        stage
    }

    #[test]
    fn classifies_and_measures_each_row() {
        let output = stage()
            .execute(StageInput {
                rows: vec![row(0.5, 101.5, 100.0)],
            })
            .unwrap();
        let out = &output.rows[0];
        assert_eq!(out.runway, Some(Runway::R18));
        assert!(out.distance_m.unwrap() > 0.0);
        assert!(out.elevation_deg.unwrap() > 0.0);
    }

    #[test]
    fn boundary_headings_use_runway_18_threshold() {
        let output = stage()
            .execute(StageInput {
                rows: vec![row(0.5, 101.5, 90.0), row(0.5, 101.5, 270.0)],
            })
            .unwrap();
        assert_eq!(output.rows[0].runway, Some(Runway::R18));
        assert_eq!(output.rows[1].runway, Some(Runway::R18));
    }

    #[test]
    fn unclassifiable_heading_carries_no_distance() {
        let output = stage()
            .execute(StageInput {
                rows: vec![row(0.5, 101.5, 400.0)],
            })
            .unwrap();
        let out = &output.rows[0];
        assert_eq!(out.runway, None);
        assert_eq!(out.distance_m, None);
        assert_eq!(out.elevation_deg, None);
    }

    #[test]
    fn row_over_the_threshold_is_flagged_degenerate() {
        let config = PipelineConfig::default();
        let mut over = row(0.0, 0.0, 180.0);
        over.latitude_rad = config.runway_18.lat_rad;
        over.longitude_rad = config.runway_18.lon_rad;

        let output = stage().execute(StageInput { rows: vec![over] }).unwrap();
        assert_eq!(output.metadata.degenerate_geometry, 1);
        assert_eq!(output.rows[0].elevation_deg, Some(90.0));
    }
}
