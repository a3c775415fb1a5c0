use anyhow::{bail, Context};
use approachcore::geo::classify_runway;
use approachcore::prelude::PipelineConfig;
use approachcore::records::TrackSample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const AIRCRAFT_CODES: [&str; 3] = ["B738", "A320", "AT76"];

/// Configuration for generating synthetic approach tracks.
///
/// Each flight moves toward the runway threshold in equal longitude
/// steps, descending at a fixed rate with jitter on the vertical speed,
/// so the distance column is monotonically decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub flights: usize,
    pub rows_per_flight: usize,
    /// Initial longitude offset from the threshold, degrees.
    pub initial_offset_deg: f64,
    /// Per-row decrease of the offset, degrees.
    pub step_deg: f64,
    pub initial_altitude_ft: f64,
    /// Altitude lost per row, feet.
    pub descent_per_row_ft: f64,
    pub vertical_speed: f64,
    /// Uniform jitter applied to the vertical speed.
    pub jitter: f64,
    pub heading: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flights: 3,
            rows_per_flight: 10,
            initial_offset_deg: 0.09,
            step_deg: 0.008,
            initial_altitude_ft: 3000.0,
            descent_per_row_ft: 250.0,
            vertical_speed: -700.0,
            jitter: 40.0,
            heading: 100.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn normalized_flights(&self) -> usize {
        self.flights.max(1)
    }

    fn normalized_rows(&self) -> usize {
        self.rows_per_flight.max(1)
    }
}

pub fn build_track_samples_from_config(
    config: &GeneratorConfig,
    pipeline: &PipelineConfig,
) -> anyhow::Result<Vec<TrackSample>> {
    let runway = match classify_runway(config.heading) {
        Some(runway) => runway,
        None => bail!("generator heading {} serves no runway", config.heading),
    };
    let threshold = pipeline.threshold_point(runway);
    let threshold_lat_deg = threshold.lat_rad.to_degrees();
    let threshold_lon_deg = threshold.lon_rad.to_degrees();

    let flights = config.normalized_flights();
    let rows = config.normalized_rows();
    let sample_count = flights
        .checked_mul(rows)
        .context("overflow computing sample count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(sample_count);

    for flight_index in 0..flights {
        let registration = format!("PK-G{:02}", flight_index);
        let callsign = format!("GIA{:03}", 100 + flight_index);
        let aircraft_code = AIRCRAFT_CODES[flight_index % AIRCRAFT_CODES.len()];

        for row_index in 0..rows {
            let offset = config.initial_offset_deg - config.step_deg * row_index as f64;
            let altitude = (config.initial_altitude_ft
                - config.descent_per_row_ft * row_index as f64)
                .max(1.0);
            let jitter = if config.jitter > 0.0 {
                rng.gen_range(-config.jitter..config.jitter)
            } else {
                0.0
            };

            samples.push(TrackSample {
                registration: registration.clone(),
                callsign: callsign.clone(),
                aircraft_code: aircraft_code.to_string(),
                latitude: threshold_lat_deg,
                longitude: threshold_lon_deg + offset,
                altitude,
                vertical_speed: config.vertical_speed + jitter,
                heading: config.heading,
            });
        }
    }

    Ok(samples)
}

pub fn build_track_samples(
    flights: usize,
    rows_per_flight: usize,
    pipeline: &PipelineConfig,
) -> anyhow::Result<Vec<TrackSample>> {
    let config = GeneratorConfig {
        flights,
        rows_per_flight,
        ..Default::default()
    };
    build_track_samples_from_config(&config, pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_expected_sample_count() {
        let samples = build_track_samples(3, 10, &PipelineConfig::default()).unwrap();
        assert_eq!(samples.len(), 3 * 10);
        assert_eq!(samples[0].registration, "PK-G00");
        assert_eq!(samples[29].registration, "PK-G02");
    }

    #[test]
    fn tracks_close_on_the_threshold() {
        let pipeline = PipelineConfig::default();
        let samples = build_track_samples(1, 5, &pipeline).unwrap();
        let first_offset = samples[0].longitude - pipeline.runway_18.lon_rad.to_degrees();
        let last_offset = samples[4].longitude - pipeline.runway_18.lon_rad.to_degrees();
        assert!(last_offset < first_offset);
        assert!(last_offset > 0.0);
    }

    #[test]
    fn invalid_heading_is_rejected() {
        let config = GeneratorConfig {
            heading: 400.0,
            ..Default::default()
        };
        assert!(build_track_samples_from_config(&config, &PipelineConfig::default()).is_err());
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let pipeline = PipelineConfig::default();
        let config = GeneratorConfig {
            seed: 13,
            ..Default::default()
        };
        let a = build_track_samples_from_config(&config, &pipeline).unwrap();
        let b = build_track_samples_from_config(&config, &pipeline).unwrap();
        assert_eq!(a[7].vertical_speed, b[7].vertical_speed);
    }
}
