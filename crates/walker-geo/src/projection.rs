//! Local planar projection: converts between lat/lon and meters around an anchor.
//!
//! Equirectangular projection anchored at a reference waypoint. Longitude
//! distances are scaled by cos(anchor latitude), so the frame is only valid
//! near the anchor. Interpolation re-anchors at the current position every
//! tick, which keeps segments short relative to the frame.

use glam::DVec2;
use walker_core::constants::METERS_PER_DEGREE;
use walker_core::Waypoint;

/// Planar frame anchored at a waypoint.
///
/// The anchor maps to the origin. x = East, y = North, both in meters.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    anchor: Waypoint,
    /// Cached cos(anchor latitude) for longitude scaling.
    cos_anchor_lat: f64,
}

impl LocalProjection {
    pub fn new(anchor: Waypoint) -> Self {
        Self {
            anchor,
            cos_anchor_lat: anchor.lat.to_radians().cos(),
        }
    }

    /// Convert a waypoint to planar meters relative to the anchor.
    pub fn to_local(&self, point: Waypoint) -> DVec2 {
        let x = (point.lon - self.anchor.lon) * self.lon_scale();
        let y = (point.lat - self.anchor.lat) * self.lat_scale();
        DVec2::new(x, y)
    }

    /// Convert planar meters back to a waypoint.
    pub fn to_geo(&self, local: DVec2) -> Waypoint {
        let lon = self.anchor.lon + local.x / self.lon_scale();
        let lat = self.anchor.lat + local.y / self.lat_scale();
        Waypoint::new(lat, lon)
    }

    /// Planar distance between two waypoints in meters.
    pub fn distance(&self, a: Waypoint, b: Waypoint) -> f64 {
        self.to_local(a).distance(self.to_local(b))
    }

    /// Meters per degree of longitude at the anchor latitude.
    pub fn lon_scale(&self) -> f64 {
        METERS_PER_DEGREE * self.cos_anchor_lat
    }

    /// Meters per degree of latitude.
    pub fn lat_scale(&self) -> f64 {
        METERS_PER_DEGREE
    }
}
