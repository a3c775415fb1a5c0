use crate::workflow::runner::{AircraftAbnormality, AnalysisResult};
use approachcore::records::FlightFeatureRow;
use serde::{Deserialize, Serialize};

/// Snapshot served to the abnormality views: the labeled table, the
/// two-column scatter points and the summary tallies.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AbnormalityModel {
    pub flights: Vec<FlightFeatureRow>,
    pub feature_points: Vec<[f64; 2]>,
    pub elevation_abnormal: usize,
    pub elevation_normal: usize,
    pub vertical_speed_abnormal: usize,
    pub vertical_speed_normal: usize,
    pub per_aircraft: Vec<AircraftAbnormality>,
}

impl From<&AnalysisResult> for AbnormalityModel {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            flights: result.flights.clone(),
            feature_points: result.feature_points.clone(),
            elevation_abnormal: result.elevation_abnormal,
            elevation_normal: result.elevation_normal,
            vertical_speed_abnormal: result.vertical_speed_abnormal,
            vertical_speed_normal: result.vertical_speed_normal,
            per_aircraft: result.per_aircraft.clone(),
        }
    }
}
