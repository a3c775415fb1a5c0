use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use approachcore::pipeline::run::Pipeline;
use approachcore::prelude::PipelineConfig;
use approachcore::records::{feature_matrix, FlightFeatureRow, Label, TrackSample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-aircraft-type abnormality tally, one row per `aircraft_code`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AircraftAbnormality {
    pub aircraft_code: String,
    pub elevation_abnormal: usize,
    pub elevation_normal: usize,
    pub vertical_speed_abnormal: usize,
    pub vertical_speed_normal: usize,
}

/// Outcome of one analysis run: the labeled table plus the summary
/// counts the abnormality views are built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub flights: Vec<FlightFeatureRow>,
    /// (avg_elevation, avg_diff_vs) per flight, in table order.
    pub feature_points: Vec<[f64; 2]>,
    pub elevation_abnormal: usize,
    pub elevation_normal: usize,
    pub vertical_speed_abnormal: usize,
    pub vertical_speed_normal: usize,
    pub per_aircraft: Vec<AircraftAbnormality>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        self.config.to_pipeline_config()
    }

    pub fn execute(&self, samples: Vec<TrackSample>) -> anyhow::Result<AnalysisResult> {
        let pipeline = Pipeline::new(self.pipeline_config());
        let flights = pipeline
            .run(samples)
            .context("running feature-derivation pipeline")?;

        let matrix = feature_matrix(&flights);
        let feature_points: Vec<[f64; 2]> = matrix
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1]])
            .collect();

        let elevation_normal = flights
            .iter()
            .filter(|f| f.label_avg_elevation == Label::Normal)
            .count();
        let vertical_speed_normal = flights
            .iter()
            .filter(|f| f.label_vertical_speed == Label::Normal)
            .count();

        let mut per_aircraft: BTreeMap<String, AircraftAbnormality> = BTreeMap::new();
        for flight in &flights {
            let entry = per_aircraft
                .entry(flight.aircraft_code.clone())
                .or_insert_with(|| AircraftAbnormality {
                    aircraft_code: flight.aircraft_code.clone(),
                    ..Default::default()
                });
            match flight.label_avg_elevation {
                Label::Normal => entry.elevation_normal += 1,
                Label::Abnormal => entry.elevation_abnormal += 1,
            }
            match flight.label_vertical_speed {
                Label::Normal => entry.vertical_speed_normal += 1,
                Label::Abnormal => entry.vertical_speed_abnormal += 1,
            }
        }

        Ok(AnalysisResult {
            elevation_abnormal: flights.len() - elevation_normal,
            elevation_normal,
            vertical_speed_abnormal: flights.len() - vertical_speed_normal,
            vertical_speed_normal,
            per_aircraft: per_aircraft.into_values().collect(),
            feature_points,
            flights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_track_samples;

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg);
        let samples = build_track_samples(3, 10, &runner.pipeline_config()).unwrap();
        let result = runner.execute(samples).unwrap();

        assert_eq!(result.flights.len(), 3);
        assert_eq!(result.feature_points.len(), 3);
        assert_eq!(result.elevation_normal + result.elevation_abnormal, 3);
        assert_eq!(
            result.vertical_speed_normal + result.vertical_speed_abnormal,
            3
        );
    }

    #[test]
    fn per_aircraft_counts_cover_every_flight() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg);
        let samples = build_track_samples(6, 8, &runner.pipeline_config()).unwrap();
        let result = runner.execute(samples).unwrap();

        let total: usize = result
            .per_aircraft
            .iter()
            .map(|a| a.elevation_normal + a.elevation_abnormal)
            .sum();
        assert_eq!(total, result.flights.len());
        // BTreeMap keeps the tally ordered by aircraft code.
        let codes: Vec<&str> = result
            .per_aircraft
            .iter()
            .map(|a| a.aircraft_code.as_str())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn empty_input_is_a_valid_empty_result() {
        let runner = Runner::new(WorkflowConfig::default());
        let result = runner.execute(Vec::new()).unwrap();
        assert!(result.flights.is_empty());
        assert!(result.per_aircraft.is_empty());
    }
}
