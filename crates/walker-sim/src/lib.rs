//! Route traversal engine for Walker.
//!
//! Owns the waypoint queue and segment cursor of the active traversal,
//! advances them once per scheduled tick, and reports positions to a
//! progress sink. Scheduling goes through [`scheduler::TickScheduler`], so the
//! engine is headless and deterministic under [`scheduler::VirtualClock`].

pub mod cursor;
pub mod directions;
pub mod engine;
pub mod queue;
pub mod scheduler;
pub mod sink;

pub use walker_core as core;
pub use engine::{EngineConfig, TraversalEngine};
pub use scheduler::{TickHandle, TickScheduler, VirtualClock, WallClock};
pub use sink::ProgressSink;

#[cfg(test)]
mod tests;
