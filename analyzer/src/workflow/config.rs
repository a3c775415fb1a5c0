use anyhow::Context;
use approachcore::prelude::{PipelineConfig, ThresholdPoint};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// YAML-loadable workflow configuration. Threshold coordinates are in
/// radians, matching the core defaults for the fixed runway pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub earth_radius_m: f64,
    /// [lat_rad, lon_rad] of the runway 18 threshold.
    pub runway_18: [f64; 2],
    /// [lat_rad, lon_rad] of the runway 36 threshold.
    pub runway_36: [f64; 2],
    pub elevation_normal: [f64; 2],
    pub diff_vs_normal: [f64; 2],
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let core = PipelineConfig::default();
        Self {
            earth_radius_m: core.earth_radius_m,
            runway_18: [core.runway_18.lat_rad, core.runway_18.lon_rad],
            runway_36: [core.runway_36.lat_rad, core.runway_36.lon_rad],
            elevation_normal: [core.elevation_normal.0, core.elevation_normal.1],
            diff_vs_normal: [core.diff_vs_normal.0, core.diff_vs_normal.1],
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(elevation_normal: (f64, f64), diff_vs_normal: (f64, f64)) -> Self {
        Self {
            elevation_normal: [elevation_normal.0, elevation_normal.1],
            diff_vs_normal: [diff_vs_normal.0, diff_vs_normal.1],
            ..Default::default()
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            earth_radius_m: self.earth_radius_m,
            runway_18: ThresholdPoint {
                lat_rad: self.runway_18[0],
                lon_rad: self.runway_18[1],
            },
            runway_36: ThresholdPoint {
                lat_rad: self.runway_36[0],
                lon_rad: self.runway_36[1],
            },
            elevation_normal: (self.elevation_normal[0], self.elevation_normal[1]),
            diff_vs_normal: (self.diff_vs_normal[0], self.diff_vs_normal[1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_pipeline_config() {
        let cfg = WorkflowConfig::from_args((2.0, 4.0), (50.0, 200.0));
        let pipeline = cfg.to_pipeline_config();
        assert_eq!(pipeline.elevation_normal, (2.0, 4.0));
        assert_eq!(pipeline.diff_vs_normal, (50.0, 200.0));
        // Untouched fields keep the core defaults.
        assert_eq!(pipeline.earth_radius_m, 6_371_000.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"elevation_normal: [2.0, 4.0]\ndiff_vs_normal: [55.0, 190.0]\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.elevation_normal, [2.0, 4.0]);
        assert_eq!(cfg.diff_vs_normal, [55.0, 190.0]);
        assert_eq!(cfg.runway_18, [0.008154, 1.770544]);
    }
}
