//! Lifecycle events emitted by the traversal engine.

use serde::{Deserialize, Serialize};

use crate::enums::Speed;
use crate::types::Waypoint;

/// Discrete traversal events, drained by the host after each tick.
///
/// Per-tick positions go to the progress sink; these only mark transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TraversalEvent {
    Started {
        origin: Waypoint,
        points: usize,
        speed: Speed,
    },
    /// A segment end was reached and snapped to.
    SegmentCompleted { end: Waypoint, remaining: usize },
    Paused { at: Waypoint },
    Resumed { at: Waypoint },
    /// The last route point was reached; no further ticks follow.
    Completed { destination: Waypoint, ticks: u64 },
    Reset,
}
