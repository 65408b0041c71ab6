//! Progress sink used by the real-time loop: GPX export, last-location
//! persistence and heading log.

use std::path::PathBuf;

use walker_core::Waypoint;
use walker_geo::bearing_degrees;
use walker_sim::ProgressSink;

use crate::gpx::write_gpx;
use crate::preferences::{load_preferences, save_preferences};

/// Mirrors every emitted position to the configured outputs.
///
/// I/O failures are logged and do not stop the traversal.
#[derive(Debug, Clone, Default)]
pub struct LocationSink {
    gpx_path: Option<PathBuf>,
    prefs_path: Option<PathBuf>,
    previous: Option<Waypoint>,
    emitted: u64,
}

impl LocationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gpx(mut self, path: impl Into<PathBuf>) -> Self {
        self.gpx_path = Some(path.into());
        self
    }

    pub fn with_preferences(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefs_path = Some(path.into());
        self
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn store_location(&self, position: Waypoint) -> anyhow::Result<()> {
        if let Some(path) = &self.prefs_path {
            let mut prefs = load_preferences(path)?;
            prefs.user_location = Some(position);
            save_preferences(path, &prefs)?;
        }
        if let Some(path) = &self.gpx_path {
            write_gpx(path, position)?;
        }
        Ok(())
    }
}

impl ProgressSink for LocationSink {
    fn on_progress(&mut self, position: Waypoint) {
        self.emitted += 1;
        match self.previous.and_then(|prev| bearing_degrees(prev, position)) {
            Some(heading) => log::info!("at {position}, heading {heading:.0}°"),
            None => log::info!("at {position}"),
        }
        self.previous = Some(position);

        if let Err(e) = self.store_location(position) {
            log::error!("failed to store location: {e:#}");
        }
    }

    fn on_complete(&mut self) {
        match self.previous {
            Some(at) => log::info!("arrived at {at} after {} positions", self.emitted),
            None => log::info!("arrived"),
        }
    }
}
