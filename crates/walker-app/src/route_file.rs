//! Route files and coordinate arguments.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use walker_core::constants::MIN_ROUTE_POINTS;
use walker_core::{Route, TraversalError, Waypoint};

/// Accepted route file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum RouteFile {
    /// `[[lat, lon], ...]`
    Pairs(Vec<[f64; 2]>),
    /// `{ "points": [{ "lat": .., "lon": .. }, ...] }`
    Points(Route),
}

impl From<RouteFile> for Route {
    fn from(file: RouteFile) -> Self {
        match file {
            RouteFile::Pairs(pairs) => pairs
                .into_iter()
                .map(|[lat, lon]| Waypoint::new(lat, lon))
                .collect(),
            RouteFile::Points(route) => route,
        }
    }
}

pub fn parse_route(json: &str) -> anyhow::Result<Route> {
    let file: RouteFile = serde_json::from_str(json)
        .context("route must be [[lat, lon], ...] or {\"points\": [...]}")?;
    Ok(file.into())
}

pub fn load_route(path: &Path) -> anyhow::Result<Route> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read route {}", path.display()))?;
    parse_route(&json).with_context(|| format!("failed to parse route {}", path.display()))
}

/// Check a resolved route before handing it to the navigation loop, so
/// the caller gets the rejection instead of a loop that never starts.
pub fn ensure_traversable(route: Option<Route>) -> Result<Route, TraversalError> {
    let route = route.ok_or(TraversalError::NoRoute)?;
    if route.len() < MIN_ROUTE_POINTS {
        return Err(TraversalError::RouteTooShort {
            points: route.len(),
        });
    }
    Ok(route)
}

/// Parse `"LAT,LON"` into a waypoint. Used as a clap value parser.
pub fn parse_waypoint(s: &str) -> Result<Waypoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinate out of range: {lat}, {lon}"));
    }
    Ok(Waypoint::new(lat, lon))
}
