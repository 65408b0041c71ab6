//! Meter to degree conversion.

use walker_core::constants::METERS_PER_DEGREE;
use walker_core::Waypoint;

/// Degrees of latitude covered by a north-south distance.
pub fn latitude_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Degrees of longitude covered by an east-west distance at `latitude`.
pub fn longitude_degrees(meters: f64, latitude: f64) -> f64 {
    meters / METERS_PER_DEGREE / latitude.to_radians().cos()
}

/// (latitude delta, longitude delta) of a square span of `meters` around `center`.
pub fn span_around(center: Waypoint, meters: f64) -> (f64, f64) {
    (
        latitude_degrees(meters),
        longitude_degrees(meters, center.lat),
    )
}
