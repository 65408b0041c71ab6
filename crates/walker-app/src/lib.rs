//! Real-time host for the traversal engine: navigation loop thread, GPX
//! export, preferences and route files.

pub mod gpx;
pub mod nav_loop;
pub mod preferences;
pub mod route_file;
pub mod sinks;
pub mod state;

pub use nav_loop::{spawn_nav_loop, LoopOptions, NavLoopHandle};
pub use sinks::LocationSink;
pub use state::LoopCommand;
