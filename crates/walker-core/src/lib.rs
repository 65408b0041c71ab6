//! Core types and definitions for the Walker route simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! waypoints, routes, speeds, commands, events, snapshots, errors and
//! constants. It has no dependency on any runtime or scheduling framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::TraversalError;
pub use types::{Route, Waypoint};
