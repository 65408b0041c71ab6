//! Navigation commands sent from a front end to the traversal loop.
//!
//! Commands are queued and processed at the next loop iteration, never in the
//! middle of a tick.

use serde::{Deserialize, Serialize};

use crate::enums::Speed;
use crate::types::Route;

/// All possible user actions on the active traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavigatorCommand {
    /// Start traversing a resolved route. Replaces any active traversal.
    Start { route: Route, speed: Speed },
    /// Suspend ticks, keeping all state.
    Pause,
    /// Resume ticking immediately.
    Resume,
    /// Flip between paused and running (the space bar in the map view).
    TogglePause,
    /// Change speed; applies from the next segment on.
    SetSpeed { speed: Speed },
    /// Discard the active traversal.
    Reset,
}
