//! Error taxonomy of the traversal engine.

use thiserror::Error;

use crate::enums::TraversalPhase;

/// Failures reported synchronously by engine operations.
///
/// Empty queues and paused states are normal control flow and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// `start` was given fewer than two points.
    #[error("route needs at least 2 points, got {points}")]
    RouteTooShort { points: usize },

    /// The engine was configured with a zero tick interval, which would
    /// make every step zero meters long.
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    /// The route source could not resolve any path.
    #[error("no route available")]
    NoRoute,

    /// The operation has no meaning in the current phase.
    #[error("{operation} is not applicable while {phase}")]
    NotApplicable {
        operation: &'static str,
        phase: TraversalPhase,
    },
}
