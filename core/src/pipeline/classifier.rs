use crate::prelude::PipelineConfig;
use crate::records::{FlightFeatureRow, Label};

/// Threshold labeling. Pure, total, deterministic; the bands come from
/// configuration and are inclusive at both ends.

pub fn label_avg_elevation(avg_elevation: f64, band: (f64, f64)) -> Label {
    if avg_elevation >= band.0 && avg_elevation <= band.1 {
        Label::Normal
    } else {
        Label::Abnormal
    }
}

pub fn label_vertical_speed(avg_diff_vs: f64, band: (f64, f64)) -> Label {
    if avg_diff_vs >= band.0 && avg_diff_vs <= band.1 {
        Label::Normal
    } else {
        Label::Abnormal
    }
}

/// Attaches both labels to every aggregated flight row.
pub fn apply_labels(rows: &mut [FlightFeatureRow], config: &PipelineConfig) {
    for row in rows.iter_mut() {
        row.label_avg_elevation = label_avg_elevation(row.avg_elevation, config.elevation_normal);
        row.label_vertical_speed = label_vertical_speed(row.avg_diff_vs, config.diff_vs_normal);
    }
}
