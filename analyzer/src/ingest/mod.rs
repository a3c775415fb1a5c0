//! CSV ingestion for raw flight-track exports.
//!
//! The header must contain every required column before any transform
//! runs. Extra columns in the export (icao24, squawk, radar, time,
//! departure, destination, on_ground, airline_icao, ...) are simply not
//! deserialized; the typed record is the column-dropping step.

use std::fs::File;
use std::path::Path;

use approachcore::records::TrackSample;
use csv::ReaderBuilder;
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 8] = [
    "registration",
    "callsign",
    "aircraft_code",
    "latitude",
    "longitude",
    "altitude",
    "vertical_speed",
    "heading",
];

/// Errors that can occur while loading a track export.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0}")]
    MissingColumns(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Loads raw samples from a CSV export.
///
/// Fails before reading any data row when the header lacks a required
/// column. A header-only file is an empty table, not an error.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TrackSample>> {
    let file = File::open(path.as_ref())?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing.join(", ")));
    }

    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let sample: TrackSample = record?;
        samples.push(sample);
    }
    Ok(samples)
}
