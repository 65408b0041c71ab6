//! Tick scheduling.
//!
//! A scheduler hands out a [`TickHandle`] per deferred tick and later reports
//! which handles became due. It never calls back into the engine itself: the
//! owner pulls due handles and dispatches them on its own thread, so ticks are
//! never re-entrant and never run concurrently.
//!
//! [`VirtualClock`] advances only when told to and drives tests.
//! [`WallClock`] measures real elapsed time.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Identifies one scheduled tick. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

/// Deferred single-shot ticks with cancellation.
pub trait TickScheduler {
    /// Schedule a tick `delay` from now.
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;

    /// Cancel a scheduled tick. Returns false if it already fired or was
    /// already cancelled; calling it again is a no-op.
    fn cancel(&mut self, handle: TickHandle) -> bool;

    /// Remove and return all handles whose deadline has passed, earliest first.
    fn take_due(&mut self) -> Vec<TickHandle>;

    /// Time left until the earliest pending deadline (zero if overdue).
    fn next_due_in(&self) -> Option<Duration>;

    /// Number of ticks scheduled and not yet fired or cancelled.
    fn pending(&self) -> usize;
}

/// Deadline-ordered timer set shared by both clocks.
#[derive(Debug, Default)]
struct TimerQueue {
    next_id: u64,
    by_deadline: BTreeMap<(Duration, u64), TickHandle>,
    deadlines: HashMap<TickHandle, Duration>,
}

impl TimerQueue {
    fn insert(&mut self, due: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((due, handle.0), handle);
        self.deadlines.insert(handle, due);
        handle
    }

    fn remove(&mut self, handle: TickHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(due) => {
                self.by_deadline.remove(&(due, handle.0));
                true
            }
            None => false,
        }
    }

    fn pop_due(&mut self, now: Duration) -> Vec<TickHandle> {
        let later = self.by_deadline.split_off(&(now, u64::MAX));
        let due = std::mem::replace(&mut self.by_deadline, later);
        due.into_values()
            .inspect(|handle| {
                self.deadlines.remove(handle);
            })
            .collect()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.by_deadline.keys().next().map(|(due, _)| *due)
    }

    fn len(&self) -> usize {
        self.deadlines.len()
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    timers: TimerQueue,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move virtual time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Jump to the earliest pending deadline. Returns how far time moved,
    /// or `None` if nothing is scheduled.
    pub fn advance_to_next(&mut self) -> Option<Duration> {
        let wait = self.next_due_in()?;
        self.now += wait;
        Some(wait)
    }
}

impl TickScheduler for VirtualClock {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.timers.insert(self.now + delay)
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        self.timers.remove(handle)
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        self.timers.pop_due(self.now)
    }

    fn next_due_in(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|due| due.saturating_sub(self.now))
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}

/// Real-time clock measured from its creation.
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
    timers: TimerQueue,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            timers: TimerQueue::default(),
        }
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for WallClock {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let due = self.now() + delay;
        self.timers.insert(due)
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        self.timers.remove(handle)
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        let now = self.now();
        self.timers.pop_due(now)
    }

    fn next_due_in(&self) -> Option<Duration> {
        let now = self.now();
        self.timers.next_deadline().map(|due| due.saturating_sub(now))
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
