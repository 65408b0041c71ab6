//! Fundamental geographic types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// Equality is exact: two waypoints are equal only if both components are
/// bit-for-bit equal floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// An ordered sequence of waypoints produced by a route source.
///
/// A route is never mutated in place. The traversal engine copies its points
/// into a queue and consumes that instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<Waypoint>,
}

impl Route {
    pub fn new(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    /// Straight two-point route between origin and destination.
    pub fn direct(origin: Waypoint, destination: Waypoint) -> Self {
        Self {
            points: vec![origin, destination],
        }
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Waypoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Waypoint> {
        self.points.last().copied()
    }

    /// Number of segments between consecutive points.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn into_points(self) -> Vec<Waypoint> {
        self.points
    }
}

impl FromIterator<Waypoint> for Route {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Waypoint>> for Route {
    fn from(points: Vec<Waypoint>) -> Self {
        Self { points }
    }
}
