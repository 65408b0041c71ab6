//! Consumers of emitted positions.

use walker_core::Waypoint;

/// Receives every position the engine emits, in tick order.
///
/// A sink only observes; it has no handle back into the engine.
pub trait ProgressSink {
    fn on_progress(&mut self, position: Waypoint);

    /// Called once after the final route point was emitted.
    fn on_complete(&mut self) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(Waypoint),
{
    fn on_progress(&mut self, position: Waypoint) {
        self(position)
    }
}
