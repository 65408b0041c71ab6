//! Simulation constants and tuning parameters.

use std::time::Duration;

/// Default interval between two traversal ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Meters per degree of latitude (nearly constant across the globe).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Viewing span around the last known location when the app starts (meters).
pub const INITIAL_VIEW_SPAN_METERS: f64 = 1_000.0;

// --- Speeds (meters per second) ---

pub const WALK_SPEED: f64 = 1.2;
pub const RUN_SPEED: f64 = 2.8;
pub const CYCLE_SPEED: f64 = 8.0;
pub const DRIVE_SPEED: f64 = 16.0;
pub const RACE_SPEED: f64 = 27.0;

/// Minimum number of points a route needs to be traversed.
pub const MIN_ROUTE_POINTS: usize = 2;

/// Heading change applied by a single turn input (degrees).
pub const TURN_STEP_DEGREES: f64 = 15.0;

/// Name written into exported GPX waypoints.
pub const GPX_WAYPOINT_NAME: &str = "Simulated Location";
