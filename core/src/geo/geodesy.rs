use crate::prelude::Runway;

/// Feet to meters.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Great-circle distance between two points given in radians.
pub fn haversine_distance(
    lat1_rad: f64,
    lon1_rad: f64,
    lat2_rad: f64,
    lon2_rad: f64,
    radius_m: f64,
) -> f64 {
    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius_m * c
}

/// Elevation angle above the threshold horizontal, in degrees.
///
/// A zero ground distance is degenerate; the angle is defined as +-90
/// depending on the sign of the altitude rather than dividing by zero.
pub fn elevation_angle(altitude_m: f64, distance_m: f64) -> f64 {
    if distance_m == 0.0 {
        return 90.0_f64.copysign(altitude_m);
    }
    (altitude_m / distance_m).atan().to_degrees()
}

/// Maps a heading onto the runway serving it.
///
/// Headings in [90, 270] land on runway 18; the rest of [0, 360] lands
/// on runway 36. The runway 18 range is checked first with inclusive
/// bounds, so exactly 90 and exactly 270 resolve to runway 18. Headings
/// outside [0, 360] serve neither runway.
pub fn classify_runway(heading: f64) -> Option<Runway> {
    if (90.0..=270.0).contains(&heading) {
        Some(Runway::R18)
    } else if (0.0..90.0).contains(&heading) || (270.0..=360.0).contains(&heading) {
        Some(Runway::R36)
    } else {
        None
    }
}
