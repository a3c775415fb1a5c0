use crate::prelude::Runway;
use serde::{Deserialize, Serialize};

/// One raw telemetry row as delivered by the ingest layer.
///
/// Identifier fields (`registration`, `callsign`, `aircraft_code`) are
/// carried through untransformed; everything else feeds the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSample {
    pub registration: String,
    pub callsign: String,
    pub aircraft_code: String,
    /// Position in degrees.
    pub latitude: f64,
    pub longitude: f64,
    /// Barometric altitude in feet.
    pub altitude: f64,
    /// Signed vertical speed.
    pub vertical_speed: f64,
    /// Track heading in degrees, 0-360.
    pub heading: f64,
}

/// Working row threaded through the pipeline stages.
///
/// Computed fields start unset and are filled in stage order. `Option`
/// and the `approach` tag replace the legacy NaN sentinels so discard is
/// always explicit.
#[derive(Debug, Clone)]
pub struct TrackRow {
    pub sample: TrackSample,
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_m: f64,
    pub runway: Option<Runway>,
    pub distance_m: Option<f64>,
    pub elevation_deg: Option<f64>,
    pub diff_vs: f64,
    pub flight_id: u32,
    /// Set by the trimmer; rows outside the approach leg carry `false`.
    pub approach: bool,
}

impl TrackRow {
    pub fn from_sample(sample: TrackSample) -> Self {
        Self {
            sample,
            latitude_rad: 0.0,
            longitude_rad: 0.0,
            altitude_m: 0.0,
            runway: None,
            distance_m: None,
            elevation_deg: None,
            diff_vs: 0.0,
            flight_id: 0,
            approach: false,
        }
    }
}
