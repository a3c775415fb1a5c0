pub mod features;
pub mod sample;

pub use features::{feature_matrix, FlightFeatureRow, Label};
pub use sample::{TrackRow, TrackSample};
