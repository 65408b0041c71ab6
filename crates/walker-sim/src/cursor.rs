//! Segment cursor: per-tick interpolation along one straight segment.
//!
//! Each step re-anchors a [`LocalProjection`] at the current position, moves
//! a fixed number of meters along the segment direction and converts back.
//! The number of whole steps that fit into the segment is computed once, on
//! the first step, and the step after the last whole step snaps exactly onto
//! the segment end so floating error never accumulates across segments.

use walker_core::Waypoint;
use walker_geo::LocalProjection;

/// Tick budget of the current segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickBudget {
    /// Not computed yet; set on the first step of the segment.
    Pending,
    /// Whole steps left before the snapping step.
    Remaining(u64),
}

impl TickBudget {
    /// Signed form with -1 standing for `Pending`.
    pub fn as_signed(self) -> i64 {
        match self {
            TickBudget::Pending => -1,
            TickBudget::Remaining(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }
}

/// Result of one cursor step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Moved one step toward the segment end.
    Moved(Waypoint),
    /// Snapped onto the segment end.
    Arrived(Waypoint),
}

impl Step {
    pub fn position(self) -> Waypoint {
        match self {
            Step::Moved(p) | Step::Arrived(p) => p,
        }
    }
}

/// Current segment and position within it.
#[derive(Debug, Clone)]
pub struct SegmentCursor {
    start: Waypoint,
    end: Waypoint,
    position: Waypoint,
    budget: TickBudget,
    /// Step length frozen together with the budget.
    step_meters: f64,
}

impl SegmentCursor {
    /// Cursor positioned on `start`, budget pending.
    pub fn new(start: Waypoint, end: Waypoint) -> Self {
        Self {
            start,
            end,
            position: start,
            budget: TickBudget::Pending,
            step_meters: 0.0,
        }
    }

    pub fn start(&self) -> Waypoint {
        self.start
    }

    pub fn end(&self) -> Waypoint {
        self.end
    }

    pub fn position(&self) -> Waypoint {
        self.position
    }

    pub fn budget(&self) -> TickBudget {
        self.budget
    }

    /// Length of one step in meters, once the budget is computed.
    pub fn step_meters(&self) -> Option<f64> {
        match self.budget {
            TickBudget::Pending => None,
            TickBudget::Remaining(_) => Some(self.step_meters),
        }
    }

    /// Advance one tick.
    ///
    /// `meters_per_tick` is only read when the budget is still pending; later
    /// changes do not affect a segment already in progress.
    pub fn step(&mut self, meters_per_tick: f64) -> Step {
        debug_assert!(meters_per_tick > 0.0, "step must be positive");
        let proj = LocalProjection::new(self.position);

        let remaining = match self.budget {
            TickBudget::Pending => {
                let distance = proj.to_local(self.end).length();
                self.step_meters = meters_per_tick;
                (distance / meters_per_tick).floor() as u64
            }
            TickBudget::Remaining(n) => n,
        };

        if remaining == 0 {
            self.position = self.end;
            self.budget = TickBudget::Remaining(0);
            return Step::Arrived(self.end);
        }

        let direction = (proj.to_local(self.end) - proj.to_local(self.start)).normalize_or_zero();
        self.position = proj.to_geo(direction * self.step_meters);
        self.budget = TickBudget::Remaining(remaining - 1);
        Step::Moved(self.position)
    }
}
