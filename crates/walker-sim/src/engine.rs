//! Traversal engine, the core of the simulator.
//!
//! `TraversalEngine` owns the state of one traversal: the waypoint queue, the
//! segment cursor and the progress sink. It advances once per tick handed back
//! by its scheduler and is completely headless, so tests drive it with a
//! [`VirtualClock`] and hosts drive it with a [`crate::WallClock`].
//!
//! Phases: `Idle` → `Running` ⇄ `Paused` → `Completed`, with `reset` returning
//! to `Idle` from anywhere. Calls that make no sense in the current phase
//! return [`TraversalError::NotApplicable`] instead of silently doing nothing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use walker_core::constants::{DEFAULT_TICK_INTERVAL, MIN_ROUTE_POINTS};
use walker_core::enums::{Speed, TraversalPhase};
use walker_core::events::TraversalEvent;
use walker_core::state::TraversalSnapshot;
use walker_core::{Route, TraversalError, Waypoint};

use crate::cursor::{SegmentCursor, Step, TickBudget};
use crate::queue::WaypointQueue;
use crate::scheduler::{TickHandle, TickScheduler, VirtualClock};
use crate::sink::ProgressSink;

/// Configuration for the traversal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock time between two ticks. `start` refuses a zero interval.
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Distance covered by one tick at `speed`.
    pub fn meters_per_tick(&self, speed: Speed) -> f64 {
        speed.meters_per_second() * self.tick_interval.as_secs_f64()
    }
}

/// Live state of the active traversal.
struct Traversal {
    queue: WaypointQueue,
    cursor: SegmentCursor,
    ticks: u64,
    sink: Box<dyn ProgressSink>,
}

/// The traversal engine. Owns the scheduler and all traversal state.
pub struct TraversalEngine<S = VirtualClock> {
    config: EngineConfig,
    scheduler: S,
    phase: TraversalPhase,
    speed: Speed,
    traversal: Option<Traversal>,
    pending_tick: Option<TickHandle>,
    events: Vec<TraversalEvent>,
}

impl<S: TickScheduler> TraversalEngine<S> {
    pub fn new(config: EngineConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            phase: TraversalPhase::Idle,
            speed: Speed::default(),
            traversal: None,
            pending_tick: None,
            events: Vec::new(),
        }
    }

    /// Begin traversing `route` at `speed`.
    ///
    /// The first point is emitted synchronously, then ticks are scheduled.
    /// Allowed from `Idle` and `Completed`; an active traversal must be reset
    /// first.
    pub fn start(
        &mut self,
        route: Route,
        speed: Speed,
        sink: impl ProgressSink + 'static,
    ) -> Result<(), TraversalError> {
        if self.phase.is_active() {
            return Err(TraversalError::NotApplicable {
                operation: "start",
                phase: self.phase,
            });
        }

        if self.config.tick_interval.is_zero() {
            log::warn!("refusing to start: tick interval is zero");
            return Err(TraversalError::ZeroTickInterval);
        }

        let points = route.len();
        if points < MIN_ROUTE_POINTS {
            log::warn!("refusing to start: route has {points} point(s)");
            return Err(TraversalError::RouteTooShort { points });
        }

        let mut queue = WaypointQueue::from(route);
        let (Some(start), Some(end)) = (queue.pop_front(), queue.pop_front()) else {
            return Err(TraversalError::RouteTooShort { points });
        };

        self.clear();
        self.speed = speed;

        let mut sink: Box<dyn ProgressSink> = Box::new(sink);
        sink.on_progress(start);
        self.traversal = Some(Traversal {
            queue,
            cursor: SegmentCursor::new(start, end),
            ticks: 0,
            sink,
        });
        self.phase = TraversalPhase::Running;
        self.events.push(TraversalEvent::Started {
            origin: start,
            points,
            speed,
        });
        log::info!("traversal started at ({start}) over {points} points at {speed}");

        self.schedule_next(self.config.tick_interval);
        Ok(())
    }

    /// Start from a route source result. `None` leaves the engine untouched.
    pub fn start_resolved(
        &mut self,
        route: Option<Route>,
        speed: Speed,
        sink: impl ProgressSink + 'static,
    ) -> Result<(), TraversalError> {
        match route {
            Some(route) => self.start(route, speed, sink),
            None => {
                log::warn!("no route to traverse");
                Err(TraversalError::NoRoute)
            }
        }
    }

    /// Run a tick the scheduler reported as due.
    ///
    /// Handles other than the one currently pending (cancelled by `pause` or
    /// `reset`, or belonging to an earlier traversal) are ignored. Returns
    /// whether the tick ran.
    pub fn fire(&mut self, handle: TickHandle) -> bool {
        if self.pending_tick != Some(handle) {
            log::warn!("ignoring stale tick {handle:?}");
            return false;
        }
        self.pending_tick = None;
        if self.phase != TraversalPhase::Running {
            return false;
        }

        self.step();

        if self.phase == TraversalPhase::Running {
            self.schedule_next(self.config.tick_interval);
        }
        true
    }

    /// Fire every tick the scheduler has due. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let due = self.scheduler.take_due();
        due.into_iter().filter(|&handle| self.fire(handle)).count()
    }

    /// Suspend ticking. Idempotent while paused.
    pub fn pause(&mut self) -> Result<TraversalPhase, TraversalError> {
        match self.phase {
            TraversalPhase::Running => {
                self.cancel_pending();
                self.phase = TraversalPhase::Paused;
                if let Some(at) = self.current_position() {
                    self.events.push(TraversalEvent::Paused { at });
                }
                log::info!("traversal paused");
                Ok(self.phase)
            }
            TraversalPhase::Paused => Ok(self.phase),
            phase => Err(TraversalError::NotApplicable {
                operation: "pause",
                phase,
            }),
        }
    }

    /// Resume ticking; the next tick is due immediately rather than after a
    /// full interval. Idempotent while running.
    pub fn resume(&mut self) -> Result<TraversalPhase, TraversalError> {
        match self.phase {
            TraversalPhase::Paused => {
                self.phase = TraversalPhase::Running;
                if let Some(at) = self.current_position() {
                    self.events.push(TraversalEvent::Resumed { at });
                }
                log::info!("traversal resumed");
                self.schedule_next(Duration::ZERO);
                Ok(self.phase)
            }
            TraversalPhase::Running => Ok(self.phase),
            phase => Err(TraversalError::NotApplicable {
                operation: "resume",
                phase,
            }),
        }
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<TraversalPhase, TraversalError> {
        if paused {
            self.pause()
        } else {
            self.resume()
        }
    }

    pub fn toggle_pause(&mut self) -> Result<TraversalPhase, TraversalError> {
        let paused = self.phase == TraversalPhase::Running;
        self.set_paused(paused)
    }

    /// Change the speed. The segment in progress keeps its step size; the new
    /// speed applies from the next segment on.
    pub fn set_speed(&mut self, speed: Speed) {
        if speed != self.speed {
            log::info!("speed changed from {} to {speed}", self.speed);
        }
        self.speed = speed;
    }

    /// Discard all traversal state and cancel the pending tick. Always succeeds.
    pub fn reset(&mut self) {
        self.clear();
        self.phase = TraversalPhase::Idle;
        self.events.push(TraversalEvent::Reset);
        log::info!("traversal reset");
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TraversalEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> TraversalPhase {
        self.phase
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TraversalPhase::Paused
    }

    /// Last emitted position, if a traversal exists.
    pub fn current_position(&self) -> Option<Waypoint> {
        self.traversal.as_ref().map(|t| t.cursor.position())
    }

    /// Points not yet pulled into a segment.
    pub fn remaining_points(&self) -> usize {
        self.traversal.as_ref().map_or(0, |t| t.queue.len())
    }

    /// Tick budget of the current segment, -1 while not yet computed.
    pub fn ticks_remaining_in_segment(&self) -> i64 {
        self.traversal
            .as_ref()
            .map_or(TickBudget::Pending, |t| t.cursor.budget())
            .as_signed()
    }

    /// Handle of the tick currently scheduled, if any.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    pub fn snapshot(&self) -> TraversalSnapshot {
        match &self.traversal {
            None => TraversalSnapshot {
                phase: self.phase,
                ..TraversalSnapshot::idle(self.speed)
            },
            Some(t) => TraversalSnapshot {
                phase: self.phase,
                speed: self.speed,
                current_position: Some(t.cursor.position()),
                segment_start: Some(t.cursor.start()),
                segment_end: Some(t.cursor.end()),
                remaining_points: t.queue.len(),
                ticks_remaining_in_segment: t.cursor.budget().as_signed(),
                ticks_elapsed: t.ticks,
            },
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// One tick: step the cursor, snapping and chaining into following
    /// segments as needed, and emit every resulting position.
    ///
    /// A segment at least one step long consumes at most one move per tick.
    /// Segments shorter than one step have a zero budget and are snapped
    /// through within the same tick.
    fn step(&mut self) {
        let meters_per_tick = self.config.meters_per_tick(self.speed);
        let Some(traversal) = self.traversal.as_mut() else {
            return;
        };
        traversal.ticks += 1;

        loop {
            match traversal.cursor.step(meters_per_tick) {
                Step::Moved(position) => {
                    log::debug!(
                        "tick {}: {position}, {} step(s) left in segment",
                        traversal.ticks,
                        traversal.cursor.budget().as_signed()
                    );
                    traversal.sink.on_progress(position);
                    return;
                }
                Step::Arrived(end) => {
                    traversal.sink.on_progress(end);
                    self.events.push(TraversalEvent::SegmentCompleted {
                        end,
                        remaining: traversal.queue.len(),
                    });

                    match traversal.queue.pop_front() {
                        Some(next) => {
                            log::debug!("tick {}: reached ({end}), next ({next})", traversal.ticks);
                            traversal.cursor = SegmentCursor::new(end, next);
                        }
                        None => {
                            traversal.sink.on_complete();
                            self.events.push(TraversalEvent::Completed {
                                destination: end,
                                ticks: traversal.ticks,
                            });
                            self.phase = TraversalPhase::Completed;
                            log::info!("traversal completed at ({end}) after {} ticks", traversal.ticks);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn schedule_next(&mut self, delay: Duration) {
        self.cancel_pending();
        self.pending_tick = Some(self.scheduler.schedule_after(delay));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn clear(&mut self) {
        self.cancel_pending();
        self.traversal = None;
    }
}

impl TraversalEngine<VirtualClock> {
    /// Engine on a fresh virtual clock.
    pub fn with_virtual_clock(config: EngineConfig) -> Self {
        Self::new(config, VirtualClock::new())
    }

    /// Move virtual time forward and fire whatever became due.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.scheduler.advance(by);
        self.pump()
    }

    /// Jump from deadline to deadline until nothing is scheduled or
    /// `max_ticks` ticks ran. Returns the number of ticks fired.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        let mut fired = 0;
        while fired < max_ticks && self.scheduler.advance_to_next().is_some() {
            fired += self.pump();
        }
        fired
    }
}

impl Default for TraversalEngine<VirtualClock> {
    fn default() -> Self {
        Self::with_virtual_clock(EngineConfig::default())
    }
}
