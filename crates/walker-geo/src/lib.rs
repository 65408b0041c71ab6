//! Geographic helpers for Walker.
//!
//! Local planar projection used by per-tick interpolation, meter/degree
//! conversion, and planar heading math for manual movement.

pub use walker_core as core;

pub mod heading;
pub mod projection;
pub mod units;

pub use heading::{bearing_degrees, nudge};
pub use projection::LocalProjection;
pub use units::{latitude_degrees, longitude_degrees};
