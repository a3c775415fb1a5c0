use crate::prelude::Runway;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical abnormality label. Serializes to exactly `normal` /
/// `abnormal`, which downstream consumers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Normal,
    Abnormal,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Normal => write!(f, "normal"),
            Label::Abnormal => write!(f, "abnormal"),
        }
    }
}

/// One labeled summary row per flight. Terminal output of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightFeatureRow {
    pub flight_id: u32,
    pub registration: String,
    pub callsign: String,
    pub aircraft_code: String,
    pub runway: Option<Runway>,
    /// Mean elevation angle over the approach leg, degrees.
    pub avg_elevation: f64,
    /// Mean absolute successive vertical-speed difference over the leg.
    pub avg_diff_vs: f64,
    /// Mean altitude over the full segment, meters. Auxiliary feature,
    /// not used in labeling.
    pub avg_altitude_m: f64,
    pub label_avg_elevation: Label,
    pub label_vertical_speed: Label,
}

/// Projects the labeled table onto the two numeric feature columns
/// consumed by the clustering wrappers. Rows with undefined aggregates
/// never reach this table, so the matrix has no missing values.
pub fn feature_matrix(rows: &[FlightFeatureRow]) -> Array2<f64> {
    let mut matrix = Array2::zeros((rows.len(), 2));
    for (i, row) in rows.iter().enumerate() {
        matrix[[i, 0]] = row.avg_elevation;
        matrix[[i, 1]] = row.avg_diff_vs;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_row(avg_elevation: f64, avg_diff_vs: f64) -> FlightFeatureRow {
        FlightFeatureRow {
            flight_id: 1,
            registration: "PK-GMF".into(),
            callsign: "GIA123".into(),
            aircraft_code: "B738".into(),
            runway: Some(Runway::R18),
            avg_elevation,
            avg_diff_vs,
            avg_altitude_m: 300.0,
            label_avg_elevation: Label::Normal,
            label_vertical_speed: Label::Abnormal,
        }
    }

    #[test]
    fn labels_serialize_to_exact_strings() {
        let json = serde_json::to_value(feature_row(3.0, 20.0)).unwrap();
        assert_eq!(json["label_avg_elevation"], "normal");
        assert_eq!(json["label_vertical_speed"], "abnormal");
        assert_eq!(json["runway"], "18");
    }

    #[test]
    fn feature_matrix_has_one_row_per_flight() {
        let rows = vec![feature_row(3.0, 100.0), feature_row(4.2, 50.0)];
        let matrix = feature_matrix(&rows);
        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[[1, 0]], 4.2);
        assert_eq!(matrix[[0, 1]], 100.0);
    }
}
