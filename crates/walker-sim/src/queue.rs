//! Remaining, not-yet-visited points of the active route.

use std::collections::VecDeque;

use walker_core::{Route, Waypoint};

/// Front-consumed sequence of route points.
///
/// Only ever shrinks from the front; never reordered.
#[derive(Debug, Clone, Default)]
pub struct WaypointQueue {
    points: VecDeque<Waypoint>,
}

impl WaypointQueue {
    /// Remove and return the first point. `None` means the route is exhausted.
    pub fn pop_front(&mut self) -> Option<Waypoint> {
        self.points.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl From<&Route> for WaypointQueue {
    fn from(route: &Route) -> Self {
        Self {
            points: route.points().iter().copied().collect(),
        }
    }
}

impl From<Route> for WaypointQueue {
    fn from(route: Route) -> Self {
        Self {
            points: route.into_points().into(),
        }
    }
}
