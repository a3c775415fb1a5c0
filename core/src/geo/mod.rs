pub mod geodesy;
pub mod stats;

pub use geodesy::{classify_runway, elevation_angle, haversine_distance, to_radians};
pub use stats::StatsHelper;
