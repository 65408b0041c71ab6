//! Tests for the traversal engine: arrival, queue consumption, pause/resume,
//! reset and completion, driven by the virtual clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use walker_core::enums::{Speed, TraversalPhase};
use walker_core::events::TraversalEvent;
use walker_core::{Route, TraversalError, Waypoint};
use walker_geo::{nudge, LocalProjection};

use crate::cursor::{SegmentCursor, Step};
use crate::directions::{DirectionsError, DirectionsProvider, DirectionsRequest, FallbackRouteSource};
use crate::engine::{EngineConfig, TraversalEngine};
use crate::scheduler::TickScheduler;
use crate::sink::ProgressSink;

const TICK: Duration = Duration::from_secs(1);

/// Shared record of everything a sink received.
#[derive(Clone, Default)]
struct Recorder {
    positions: Rc<RefCell<Vec<Waypoint>>>,
    completions: Rc<Cell<u32>>,
}

impl Recorder {
    fn positions(&self) -> Vec<Waypoint> {
        self.positions.borrow().clone()
    }

    fn len(&self) -> usize {
        self.positions.borrow().len()
    }

    fn last(&self) -> Option<Waypoint> {
        self.positions.borrow().last().copied()
    }
}

impl ProgressSink for Recorder {
    fn on_progress(&mut self, position: Waypoint) {
        self.positions.borrow_mut().push(position);
    }

    fn on_complete(&mut self) {
        self.completions.set(self.completions.get() + 1);
    }
}

fn three_point_route() -> Route {
    Route::new(vec![
        Waypoint::new(0.0, 0.0),
        Waypoint::new(0.0, 0.001),
        Waypoint::new(0.0, 0.002),
    ])
}

fn planar_distance(a: Waypoint, b: Waypoint) -> f64 {
    LocalProjection::new(a).distance(a, b)
}

// ---- Start ----

#[test]
fn test_start_emits_origin_synchronously() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();

    assert_eq!(rec.positions(), vec![Waypoint::new(0.0, 0.0)]);
    assert_eq!(engine.phase(), TraversalPhase::Running);
    assert_eq!(engine.remaining_points(), 1);
    assert_eq!(engine.ticks_remaining_in_segment(), -1);
    assert_eq!(engine.scheduler().pending(), 1);
    assert_eq!(engine.scheduler().next_due_in(), Some(TICK));
}

#[test]
fn test_start_rejects_single_point_route() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    let result = engine.start(Route::new(vec![Waypoint::new(1.0, 1.0)]), Speed::Walk, rec.clone());

    assert_eq!(result, Err(TraversalError::RouteTooShort { points: 1 }));
    assert_eq!(rec.len(), 0);
    assert_eq!(engine.phase(), TraversalPhase::Idle);
    assert_eq!(engine.scheduler().pending(), 0);
    assert!(engine.current_position().is_none());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_start_rejects_empty_route() {
    let mut engine = TraversalEngine::default();
    let result = engine.start(Route::default(), Speed::Run, |_: Waypoint| {});
    assert_eq!(result, Err(TraversalError::RouteTooShort { points: 0 }));
}

#[test]
fn test_start_without_route() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    let result = engine.start_resolved(None, Speed::Walk, rec.clone());

    assert_eq!(result, Err(TraversalError::NoRoute));
    assert_eq!(rec.len(), 0);
    assert_eq!(engine.phase(), TraversalPhase::Idle);
    assert_eq!(engine.scheduler().pending(), 0);
}

#[test]
fn test_start_while_active_is_not_applicable() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    let err = engine.start(three_point_route(), Speed::Run, |_: Waypoint| {});
    assert_eq!(
        err,
        Err(TraversalError::NotApplicable {
            operation: "start",
            phase: TraversalPhase::Running
        })
    );
    // The running traversal is untouched
    assert_eq!(engine.speed(), Speed::Walk);
    assert_eq!(engine.scheduler().pending(), 1);
}

#[test]
fn test_closure_sink() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = Rc::clone(&seen);
    let mut engine = TraversalEngine::default();
    engine
        .start(three_point_route(), Speed::Race, move |p: Waypoint| sink_seen.borrow_mut().push(p))
        .unwrap();
    engine.run_until_idle(100);
    assert_eq!(seen.borrow().last(), Some(&Waypoint::new(0.0, 0.002)));
}

// ---- Full traversal ----

#[test]
fn test_walk_three_point_route() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();

    let ticks = engine.run_until_idle(10_000);
    let positions = rec.positions();

    // floor(111.32 / 1.2) = 92 moves per segment, plus the snapping tick.
    // The snapping tick of the first segment also takes the first move of
    // the second, so the whole route takes 92 + 1 + 91 + 1 ticks.
    assert_eq!(ticks, 185);
    assert_eq!(positions.len(), 187);
    assert_eq!(positions[0], Waypoint::new(0.0, 0.0));
    assert_eq!(positions[93], Waypoint::new(0.0, 0.001));
    assert_eq!(positions[186], Waypoint::new(0.0, 0.002));

    // Intermediate points never reach or pass the segment end
    for p in &positions[1..93] {
        assert!(p.lon > 0.0 && p.lon < 0.001, "{p:?} outside first segment");
        assert_eq!(p.lat, 0.0);
    }
    for p in &positions[94..186] {
        assert!(p.lon > 0.001 && p.lon < 0.002, "{p:?} outside second segment");
    }

    // Consecutive moves within a segment are one step apart
    for pair in positions[1..93].windows(2) {
        let d = planar_distance(pair[0], pair[1]);
        assert!((d - 1.2).abs() < 1e-6, "step of {d} m");
    }

    assert_eq!(engine.phase(), TraversalPhase::Completed);
    assert_eq!(rec.completions.get(), 1);
}

#[test]
fn test_exact_arrival_after_floor_steps() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    let end = Waypoint::new(0.0, 0.001);
    engine
        .start(Route::direct(Waypoint::new(0.0, 0.0), end), Speed::Cycle, rec.clone())
        .unwrap();

    // floor(111.32 / 8) = 13 interpolated ticks, then the snap
    for tick in 1..=13 {
        assert_eq!(engine.advance(TICK), 1);
        assert_ne!(rec.last(), Some(end), "arrived early at tick {tick}");
    }
    assert_eq!(engine.ticks_remaining_in_segment(), 0);
    engine.advance(TICK);
    assert_eq!(rec.last(), Some(end));
    assert_eq!(engine.phase(), TraversalPhase::Completed);
}

#[test]
fn test_exact_arrival_randomized_segments() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..500 {
        let start = Waypoint::new(rng.gen_range(-70.0..70.0), rng.gen_range(-170.0..170.0));
        let end = nudge(start, rng.gen_range(0.0..360.0), rng.gen_range(0.0..500.0));
        let speed = Speed::ALL[rng.gen_range(0..Speed::ALL.len())];
        let step = EngineConfig::default().meters_per_tick(speed);

        let proj = LocalProjection::new(start);
        let axis = proj.to_local(end);
        let expected_moves = (axis.length() / step).floor() as usize;

        let mut cursor = SegmentCursor::new(start, end);
        let mut moves = 0;
        let arrived = loop {
            match cursor.step(step) {
                Step::Moved(p) => {
                    moves += 1;
                    assert!(moves <= expected_moves, "overshot the tick budget");
                    // Re-anchoring each tick drifts by centimeters at high latitude
                    let along = proj.to_local(p).dot(axis) / axis.length();
                    assert!(along > 0.0, "moved backward: {along} m");
                    assert!(along <= axis.length() + 0.25, "passed the end: {along} m");
                }
                Step::Arrived(p) => break p,
            }
        };
        assert_eq!(moves, expected_moves);
        assert_eq!(arrived, end, "snap must be bit-for-bit");
    }
}

#[test]
fn test_queue_consumption_is_monotonic() {
    let route = Route::new(vec![
        Waypoint::new(10.0, 10.0),
        Waypoint::new(10.0002, 10.0),
        Waypoint::new(10.0002, 10.0003),
        Waypoint::new(10.0, 10.0003),
        Waypoint::new(10.0, 10.0),
    ]);
    let mut engine = TraversalEngine::default();
    engine.start(route, Speed::Run, |_: Waypoint| {}).unwrap();
    engine.drain_events();

    let mut remaining = engine.remaining_points();
    assert_eq!(remaining, 3);
    let mut boundaries = 0;
    while engine.phase() == TraversalPhase::Running {
        engine.advance(TICK);
        let crossed = engine
            .drain_events()
            .iter()
            .filter(|e| matches!(e, TraversalEvent::SegmentCompleted { .. }))
            .count();
        let now = engine.remaining_points();
        assert!(now <= remaining, "queue grew");
        if engine.phase() == TraversalPhase::Running {
            assert_eq!(remaining - now, crossed, "one point per boundary");
        }
        boundaries += crossed;
        remaining = now;
    }
    assert_eq!(boundaries, 4);
    assert_eq!(remaining, 0);
}

#[test]
fn test_degenerate_segment_chains_within_one_tick() {
    let a = Waypoint::new(5.0, 5.0);
    let b = Waypoint::new(5.0, 5.001);
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(Route::new(vec![a, a, a, b]), Speed::Walk, rec.clone()).unwrap();

    assert_eq!(engine.advance(TICK), 1);
    let positions = rec.positions();
    // origin, then in tick 1: two snaps through the zero-length segments and
    // the first real move toward b
    assert_eq!(positions.len(), 4);
    assert_eq!(&positions[..3], &[a, a, a]);
    assert!((planar_distance(a, positions[3]) - 1.2).abs() < 1e-6);
    assert_eq!(engine.remaining_points(), 0);
}

#[test]
fn test_short_route_completes_on_first_tick() {
    let start = Waypoint::new(0.0, 0.0);
    let end = Waypoint::new(0.0, 0.0001);
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(Route::direct(start, end), Speed::Race, rec.clone()).unwrap();

    engine.advance(TICK);
    assert_eq!(rec.positions(), vec![start, end]);
    assert_eq!(engine.phase(), TraversalPhase::Completed);
    assert_eq!(rec.completions.get(), 1);
}

// ---- Completion ----

#[test]
fn test_no_ticks_after_completion() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Drive, rec.clone()).unwrap();
    engine.run_until_idle(1000);

    let emitted = rec.len();
    assert_eq!(engine.scheduler().pending(), 0);
    assert!(engine.pending_tick().is_none());
    for _ in 0..10 {
        assert_eq!(engine.advance(TICK), 0);
    }
    assert_eq!(rec.len(), emitted);
    assert_eq!(rec.completions.get(), 1);

    let snap = engine.snapshot();
    assert_eq!(snap.phase, TraversalPhase::Completed);
    assert_eq!(snap.current_position, Some(Waypoint::new(0.0, 0.002)));
    assert_eq!(snap.remaining_points, 0);
}

#[test]
fn test_event_sequence() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Race, |_: Waypoint| {}).unwrap();
    let ticks = engine.run_until_idle(1000) as u64;

    let events = engine.drain_events();
    assert!(matches!(
        events[0],
        TraversalEvent::Started { points: 3, speed: Speed::Race, .. }
    ));
    assert_eq!(
        events[1],
        TraversalEvent::SegmentCompleted {
            end: Waypoint::new(0.0, 0.001),
            remaining: 1
        }
    );
    assert_eq!(
        events[2],
        TraversalEvent::SegmentCompleted {
            end: Waypoint::new(0.0, 0.002),
            remaining: 0
        }
    );
    assert_eq!(
        events[3],
        TraversalEvent::Completed {
            destination: Waypoint::new(0.0, 0.002),
            ticks
        }
    );
    assert_eq!(events.len(), 4);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_restart_after_completion() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Race, |_: Waypoint| {}).unwrap();
    engine.run_until_idle(1000);

    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    assert_eq!(engine.phase(), TraversalPhase::Running);
    assert_eq!(engine.ticks_remaining_in_segment(), -1);
    assert_eq!(engine.snapshot().ticks_elapsed, 0);
    assert_eq!(rec.len(), 1);
}

// ---- Pause / resume ----

#[test]
fn test_pause_freezes_state() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    engine.advance(TICK);
    engine.advance(TICK);
    assert_eq!(rec.len(), 3);

    assert_eq!(engine.set_paused(true), Ok(TraversalPhase::Paused));
    let frozen = engine.snapshot();
    assert_eq!(engine.scheduler().pending(), 0);

    for _ in 0..30 {
        assert_eq!(engine.advance(TICK), 0);
    }
    assert_eq!(rec.len(), 3);
    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn test_resume_continues_without_skip_or_repeat() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    engine.advance(TICK);
    engine.advance(TICK);
    engine.pause().unwrap();
    engine.advance(Duration::from_secs(60));

    assert_eq!(engine.set_paused(false), Ok(TraversalPhase::Running));
    // Due immediately, not a full interval later
    assert_eq!(engine.scheduler().next_due_in(), Some(Duration::ZERO));
    assert_eq!(engine.advance(Duration::ZERO), 1);

    let positions = rec.positions();
    assert_eq!(positions.len(), 4);
    assert_ne!(positions[3], positions[2]);
    let d = planar_distance(positions[2], positions[3]);
    assert!((d - 1.2).abs() < 1e-6, "resumed step was {d} m");

    // Regular cadence afterward
    assert_eq!(engine.scheduler().next_due_in(), Some(TICK));
}

#[test]
fn test_resumed_run_matches_uninterrupted_run() {
    let mut plain = TraversalEngine::default();
    let plain_rec = Recorder::default();
    plain.start(three_point_route(), Speed::Run, plain_rec.clone()).unwrap();
    plain.run_until_idle(1000);

    let mut paused = TraversalEngine::default();
    let paused_rec = Recorder::default();
    paused.start(three_point_route(), Speed::Run, paused_rec.clone()).unwrap();
    for i in 0..5 {
        paused.advance(TICK);
        paused.pause().unwrap();
        paused.advance(Duration::from_secs(i));
        paused.resume().unwrap();
    }
    paused.run_until_idle(1000);

    assert_eq!(plain_rec.positions(), paused_rec.positions());
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();

    assert_eq!(engine.resume(), Ok(TraversalPhase::Running));
    assert_eq!(engine.scheduler().pending(), 1, "resume while running must not add a tick");

    engine.pause().unwrap();
    assert_eq!(engine.pause(), Ok(TraversalPhase::Paused));
    assert!(engine.is_paused());

    engine.resume().unwrap();
    engine.resume().unwrap();
    assert_eq!(engine.scheduler().pending(), 1);
}

#[test]
fn test_toggle_pause() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    assert_eq!(engine.toggle_pause(), Ok(TraversalPhase::Paused));
    assert_eq!(engine.toggle_pause(), Ok(TraversalPhase::Running));
}

#[test]
fn test_pause_not_applicable_when_idle_or_completed() {
    let mut engine = TraversalEngine::default();
    assert_eq!(
        engine.pause(),
        Err(TraversalError::NotApplicable {
            operation: "pause",
            phase: TraversalPhase::Idle
        })
    );
    assert!(engine.toggle_pause().is_err());

    engine.start(three_point_route(), Speed::Race, |_: Waypoint| {}).unwrap();
    engine.run_until_idle(1000);
    assert_eq!(
        engine.resume(),
        Err(TraversalError::NotApplicable {
            operation: "resume",
            phase: TraversalPhase::Completed
        })
    );
}

// ---- Reset ----

#[test]
fn test_reset_clears_everything() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    engine.advance(TICK);
    engine.reset();

    let snap = engine.snapshot();
    assert_eq!(snap.phase, TraversalPhase::Idle);
    assert!(snap.current_position.is_none());
    assert!(snap.segment_start.is_none());
    assert!(snap.segment_end.is_none());
    assert_eq!(snap.remaining_points, 0);
    assert_eq!(snap.ticks_remaining_in_segment, -1);
    assert_eq!(engine.scheduler().pending(), 0);
    assert_eq!(engine.drain_events().last(), Some(&TraversalEvent::Reset));
}

#[test]
fn test_reset_from_any_phase() {
    let mut engine = TraversalEngine::default();
    engine.reset();
    assert_eq!(engine.phase(), TraversalPhase::Idle);

    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    engine.pause().unwrap();
    engine.reset();
    assert_eq!(engine.phase(), TraversalPhase::Idle);

    engine.start(three_point_route(), Speed::Race, |_: Waypoint| {}).unwrap();
    engine.run_until_idle(1000);
    engine.reset();
    assert_eq!(engine.phase(), TraversalPhase::Idle);
}

#[test]
fn test_stale_tick_after_reset_is_noop() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    engine.advance(TICK);
    let stale = engine.pending_tick().unwrap();

    engine.reset();
    assert!(!engine.fire(stale));
    assert_eq!(rec.len(), 2);
    assert_eq!(engine.phase(), TraversalPhase::Idle);
    assert!(engine.current_position().is_none());
}

#[test]
fn test_stale_tick_does_not_touch_new_traversal() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    let stale = engine.pending_tick().unwrap();
    engine.reset();

    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    assert!(!engine.fire(stale));
    assert_eq!(rec.len(), 1);
    assert_eq!(engine.ticks_remaining_in_segment(), -1);
}

#[test]
fn test_restart_after_reset_matches_first_start() {
    let mut fresh = TraversalEngine::default();
    let fresh_rec = Recorder::default();
    fresh.start(three_point_route(), Speed::Cycle, fresh_rec.clone()).unwrap();

    let mut reused = TraversalEngine::default();
    reused.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    for _ in 0..7 {
        reused.advance(TICK);
    }
    reused.reset();
    let reused_rec = Recorder::default();
    reused.start(three_point_route(), Speed::Cycle, reused_rec.clone()).unwrap();

    loop {
        let snap_a = serde_json::to_string(&fresh.snapshot()).unwrap();
        let snap_b = serde_json::to_string(&reused.snapshot()).unwrap();
        assert_eq!(snap_a, snap_b, "snapshots diverged after reset");
        if fresh.phase() != TraversalPhase::Running {
            break;
        }
        assert_eq!(fresh.advance(TICK), reused.advance(TICK));
    }
    assert_eq!(fresh_rec.positions(), reused_rec.positions());
}

// ---- Speed and configuration ----

#[test]
fn test_speed_change_applies_at_next_segment() {
    let mut engine = TraversalEngine::default();
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    engine.advance(TICK);
    let budget = engine.ticks_remaining_in_segment();

    engine.set_speed(Speed::Race);
    engine.advance(TICK);
    let positions = rec.positions();
    assert!((planar_distance(positions[1], positions[2]) - 1.2).abs() < 1e-6);
    assert_eq!(engine.ticks_remaining_in_segment(), budget - 1);

    // Finish the first segment; the second uses race steps
    while engine.remaining_points() > 0 {
        engine.advance(TICK);
    }
    let positions = rec.positions();
    let n = positions.len();
    let d = planar_distance(positions[n - 2], positions[n - 1]);
    assert!((d - 27.0).abs() < 1e-6, "second segment step was {d} m");
}

#[test]
fn test_custom_tick_interval() {
    let config = EngineConfig {
        tick_interval: Duration::from_secs(2),
    };
    assert!((config.meters_per_tick(Speed::Walk) - 2.4).abs() < 1e-12);

    let mut engine = TraversalEngine::with_virtual_clock(config);
    let rec = Recorder::default();
    engine.start(three_point_route(), Speed::Walk, rec.clone()).unwrap();
    assert_eq!(engine.advance(TICK), 0);
    assert_eq!(engine.advance(TICK), 1);
    let positions = rec.positions();
    assert!((planar_distance(positions[0], positions[1]) - 2.4).abs() < 1e-6);
}

#[test]
fn test_zero_tick_interval_is_rejected() {
    let config = EngineConfig {
        tick_interval: Duration::ZERO,
    };
    let mut engine = TraversalEngine::with_virtual_clock(config);
    let rec = Recorder::default();
    let result = engine.start(three_point_route(), Speed::Walk, rec.clone());

    assert_eq!(result, Err(TraversalError::ZeroTickInterval));
    assert_eq!(engine.run_until_idle(50), 0);
    assert_eq!(rec.len(), 0);
    assert_eq!(engine.phase(), TraversalPhase::Idle);
    assert_eq!(engine.scheduler().pending(), 0);
}

#[test]
fn test_snapshot_while_running() {
    let mut engine = TraversalEngine::default();
    engine.start(three_point_route(), Speed::Walk, |_: Waypoint| {}).unwrap();
    engine.advance(TICK);

    let snap = engine.snapshot();
    assert_eq!(snap.phase, TraversalPhase::Running);
    assert_eq!(snap.speed, Speed::Walk);
    assert_eq!(snap.segment_start, Some(Waypoint::new(0.0, 0.0)));
    assert_eq!(snap.segment_end, Some(Waypoint::new(0.0, 0.001)));
    assert_eq!(snap.remaining_points, 1);
    assert_eq!(snap.ticks_remaining_in_segment, 91);
    assert_eq!(snap.ticks_elapsed, 1);
}

// ---- Route source into engine ----

struct Offline;

impl DirectionsProvider for Offline {
    fn directions(&mut self, _request: &DirectionsRequest) -> Result<Route, DirectionsError> {
        Err(DirectionsError::Unavailable("offline".into()))
    }
}

#[test]
fn test_unresolved_route_never_starts_engine() {
    let mut source = FallbackRouteSource::new(Offline);
    let route = source.resolve(
        Waypoint::new(0.0, 0.0),
        Waypoint::new(0.0, 0.001),
        Speed::Walk.transport_mode(),
    );
    assert!(route.is_none());

    let mut engine = TraversalEngine::default();
    assert_eq!(
        engine.start_resolved(route, Speed::Walk, |_: Waypoint| {}),
        Err(TraversalError::NoRoute)
    );
    assert_eq!(engine.snapshot().phase, TraversalPhase::Idle);
}
