//! Navigation loop thread: owns the traversal engine and drives it in real time.
//!
//! The engine is created inside the thread and runs on a [`WallClock`].
//! Between ticks the loop blocks on its command channel with a timeout equal
//! to the time left until the next deadline, so commands are applied promptly
//! and always between ticks, never during one.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Mutex;
use std::thread::JoinHandle;

use walker_core::commands::NavigatorCommand;
use walker_core::enums::TraversalPhase;
use walker_core::state::TraversalSnapshot;
use walker_core::TraversalError;
use walker_sim::{EngineConfig, ProgressSink, TickScheduler, TraversalEngine, WallClock};

use crate::state::{LoopCommand, SharedSnapshot};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    pub config: EngineConfig,
    /// Leave the loop once a traversal completes.
    pub exit_on_complete: bool,
}

/// Handle to a running navigation loop.
pub struct NavLoopHandle {
    command_tx: mpsc::Sender<LoopCommand>,
    latest_snapshot: SharedSnapshot,
    thread: JoinHandle<()>,
}

impl NavLoopHandle {
    /// Queue a command. Returns false if the loop has already exited.
    pub fn send(&self, command: impl Into<LoopCommand>) -> bool {
        self.command_tx.send(command.into()).is_ok()
    }

    /// A second sender, e.g. for a keyboard reader thread.
    pub fn sender(&self) -> mpsc::Sender<LoopCommand> {
        self.command_tx.clone()
    }

    pub fn snapshot(&self) -> Option<TraversalSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Wait for the loop to exit on its own (shutdown or completion).
    pub fn join(self) -> Option<TraversalSnapshot> {
        let NavLoopHandle {
            command_tx,
            latest_snapshot,
            thread,
        } = self;
        if thread.join().is_err() {
            log::error!("navigation loop panicked");
        }
        drop(command_tx);
        let last = latest_snapshot.lock().ok().and_then(|lock| lock.clone());
        last
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Option<TraversalSnapshot> {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.join()
    }
}

/// Spawns the navigation loop in a new thread.
///
/// `make_sink` is called inside the loop thread for every started traversal.
pub fn spawn_nav_loop<K, F>(options: LoopOptions, make_sink: F) -> std::io::Result<NavLoopHandle>
where
    K: ProgressSink + 'static,
    F: FnMut() -> K + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = SharedSnapshot::default();
    let shared = latest_snapshot.clone();

    let thread = std::thread::Builder::new()
        .name("walker-nav-loop".into())
        .spawn(move || run_nav_loop(options, command_rx, &shared, make_sink))?;

    Ok(NavLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// The navigation loop. Runs until Shutdown, channel disconnect, or (if
/// configured) completion.
fn run_nav_loop<K, F>(
    options: LoopOptions,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<TraversalSnapshot>>,
    mut make_sink: F,
) where
    K: ProgressSink + 'static,
    F: FnMut() -> K,
{
    let mut engine = TraversalEngine::new(options.config, WallClock::new());
    log::debug!("navigation loop started, tick every {:?}", options.config.tick_interval);

    loop {
        // 1. Wait for a command, at most until the next tick is due
        let received = match engine.scheduler().next_due_in() {
            Some(wait) => command_rx.recv_timeout(wait),
            None => command_rx
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(LoopCommand::Navigator(command)) => {
                let starting = matches!(command, NavigatorCommand::Start { .. });
                if let Err(e) = apply(&mut engine, command, &mut make_sink) {
                    log::warn!("command ignored: {e}");
                    // A rejected start leaves nothing that could ever complete
                    if starting && options.exit_on_complete {
                        publish(latest_snapshot, &engine);
                        return;
                    }
                }
            }
            Ok(LoopCommand::Shutdown) => {
                log::debug!("navigation loop shutting down");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        // 2. Fire whatever came due while waiting
        engine.pump();

        for event in engine.drain_events() {
            log::debug!("{event:?}");
        }

        // 3. Publish the latest state for polling
        publish(latest_snapshot, &engine);

        if options.exit_on_complete && engine.phase() == TraversalPhase::Completed {
            return;
        }
    }
}

fn publish(latest_snapshot: &Mutex<Option<TraversalSnapshot>>, engine: &TraversalEngine<WallClock>) {
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(engine.snapshot());
    }
}

fn apply<K, F>(
    engine: &mut TraversalEngine<WallClock>,
    command: NavigatorCommand,
    make_sink: &mut F,
) -> Result<TraversalPhase, TraversalError>
where
    K: ProgressSink + 'static,
    F: FnMut() -> K,
{
    match command {
        NavigatorCommand::Start { route, speed } => {
            // A new destination replaces the active traversal
            if engine.phase().is_active() {
                engine.reset();
            }
            engine.start(route, speed, make_sink()).map(|()| engine.phase())
        }
        NavigatorCommand::Pause => engine.pause(),
        NavigatorCommand::Resume => engine.resume(),
        NavigatorCommand::TogglePause => engine.toggle_pause(),
        NavigatorCommand::SetSpeed { speed } => {
            engine.set_speed(speed);
            Ok(engine.phase())
        }
        NavigatorCommand::Reset => {
            engine.reset();
            Ok(engine.phase())
        }
    }
}
