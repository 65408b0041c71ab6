//! Serializable view of the traversal state.

use serde::{Deserialize, Serialize};

use crate::enums::{Speed, TraversalPhase};
use crate::types::Waypoint;

/// Point-in-time copy of the engine state, for hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalSnapshot {
    pub phase: TraversalPhase,
    pub speed: Speed,
    pub current_position: Option<Waypoint>,
    pub segment_start: Option<Waypoint>,
    pub segment_end: Option<Waypoint>,
    /// Points not yet pulled into a segment.
    pub remaining_points: usize,
    /// -1 until the first tick of the current segment computes the budget.
    pub ticks_remaining_in_segment: i64,
    /// Ticks processed since `start`.
    pub ticks_elapsed: u64,
}

impl TraversalSnapshot {
    /// Snapshot of an engine that holds no traversal.
    pub fn idle(speed: Speed) -> Self {
        Self {
            speed,
            ticks_remaining_in_segment: -1,
            ..Default::default()
        }
    }
}
