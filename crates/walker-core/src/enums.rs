//! Enumeration types used throughout the simulator.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Traversal speed preset.
///
/// Each preset is a fixed meters-per-second value. No positional noise is
/// applied on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Walk,
    Run,
    Cycle,
    Drive,
    Race,
}

impl Speed {
    pub const ALL: [Speed; 5] = [
        Speed::Walk,
        Speed::Run,
        Speed::Cycle,
        Speed::Drive,
        Speed::Race,
    ];

    /// Speed in meters per second.
    pub fn meters_per_second(self) -> f64 {
        match self {
            Speed::Walk => WALK_SPEED,
            Speed::Run => RUN_SPEED,
            Speed::Cycle => CYCLE_SPEED,
            Speed::Drive => DRIVE_SPEED,
            Speed::Race => RACE_SPEED,
        }
    }

    /// Reverse lookup of a stored meters-per-second value.
    pub fn from_meters_per_second(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.meters_per_second() == value)
    }

    /// Position of this preset in the "go to location" menu.
    pub fn menu_index(self) -> usize {
        match self {
            Speed::Walk => 0,
            Speed::Run => 1,
            Speed::Cycle => 2,
            Speed::Drive => 3,
            Speed::Race => 4,
        }
    }

    /// Unknown indices fall back to walking.
    pub fn from_menu_index(index: usize) -> Self {
        match index {
            1 => Speed::Run,
            2 => Speed::Cycle,
            3 => Speed::Drive,
            4 => Speed::Race,
            _ => Speed::Walk,
        }
    }

    /// Transport mode to request directions for at this speed.
    pub fn transport_mode(self) -> TransportMode {
        if self.meters_per_second() >= DRIVE_SPEED {
            TransportMode::Automobile
        } else {
            TransportMode::Walking
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speed::Walk => write!(f, "walk"),
            Speed::Run => write!(f, "run"),
            Speed::Cycle => write!(f, "cycle"),
            Speed::Drive => write!(f, "drive"),
            Speed::Race => write!(f, "race"),
        }
    }
}

impl std::str::FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" => Ok(Speed::Walk),
            "run" => Ok(Speed::Run),
            "cycle" => Ok(Speed::Cycle),
            "drive" => Ok(Speed::Drive),
            "race" => Ok(Speed::Race),
            _ => Err(format!("Unknown speed: {s}")),
        }
    }
}

/// Travel mode requested from a directions provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Walking,
    Automobile,
}

/// Lifecycle phase of the traversal engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalPhase {
    /// No traversal state exists.
    #[default]
    Idle,
    /// Ticks are being scheduled and advance the position.
    Running,
    /// Ticks are suspended; all state is frozen.
    Paused,
    /// The route has been fully consumed.
    Completed,
}

impl TraversalPhase {
    /// Whether a traversal currently holds live state.
    pub fn is_active(self) -> bool {
        matches!(self, TraversalPhase::Running | TraversalPhase::Paused)
    }
}

impl std::fmt::Display for TraversalPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalPhase::Idle => write!(f, "idle"),
            TraversalPhase::Running => write!(f, "running"),
            TraversalPhase::Paused => write!(f, "paused"),
            TraversalPhase::Completed => write!(f, "completed"),
        }
    }
}
