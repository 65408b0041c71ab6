//! Planar heading math for manual movement and camera follow.
//!
//! These use the same local projection as interpolation, not an ellipsoidal
//! solver. Accurate for the few meters covered by one key press or one tick.

use glam::DVec2;
use walker_core::Waypoint;

use crate::projection::LocalProjection;

/// Bearing from `from` to `to` in degrees (0 = North, clockwise), in [0, 360).
///
/// Returns `None` when both points coincide.
pub fn bearing_degrees(from: Waypoint, to: Waypoint) -> Option<f64> {
    let delta = LocalProjection::new(from).to_local(to);
    if delta == DVec2::ZERO {
        return None;
    }
    Some(normalize_heading(delta.x.atan2(delta.y).to_degrees()))
}

/// Move `from` by `meters` along `heading` degrees. Negative meters move backward.
pub fn nudge(from: Waypoint, heading: f64, meters: f64) -> Waypoint {
    let proj = LocalProjection::new(from);
    let rad = heading.to_radians();
    proj.to_geo(DVec2::new(rad.sin(), rad.cos()) * meters)
}

/// Wrap a heading into [0, 360).
pub fn normalize_heading(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}
