//! User preferences persisted as JSON: last location, speed and favorites.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use walker_core::constants::INITIAL_VIEW_SPAN_METERS;
use walker_core::enums::Speed;
use walker_core::Waypoint;
use walker_geo::units::span_around;

/// Default preferences file name.
pub const DEFAULT_PREFERENCES_FILE: &str = "walker-preferences.json";

/// A saved location, optionally named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub coordinate: Waypoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub speed: Speed,
    pub user_location: Option<Waypoint>,
    pub favorites: Vec<Favorite>,
}

impl Preferences {
    pub fn add_favorite(&mut self, coordinate: Waypoint, name: Option<String>) {
        self.favorites.push(Favorite { coordinate, name });
    }

    /// Remove the favorite at `index` (as listed).
    pub fn remove_favorite(&mut self, index: usize) -> anyhow::Result<Favorite> {
        if index >= self.favorites.len() {
            bail!(
                "no favorite #{index}, there are {} favorite(s)",
                self.favorites.len()
            );
        }
        Ok(self.favorites.remove(index))
    }

    /// Find a favorite by name.
    pub fn favorite_named(&self, name: &str) -> Option<&Favorite> {
        self.favorites
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    /// (latitude, longitude) span of the initial view around the last location.
    pub fn initial_view_span(&self) -> Option<(f64, f64)> {
        self.user_location
            .map(|center| span_around(center, INITIAL_VIEW_SPAN_METERS))
    }
}

/// Load preferences from `path`. A missing file yields the defaults.
pub fn load_preferences(path: &Path) -> anyhow::Result<Preferences> {
    if !path.exists() {
        log::debug!("no preferences at {}, using defaults", path.display());
        return Ok(Preferences::default());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read preferences {}", path.display()))?;
    let prefs = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse preferences {}", path.display()))?;
    Ok(prefs)
}

pub fn save_preferences(path: &Path, prefs: &Preferences) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create preferences directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(prefs).context("failed to serialize preferences")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write preferences {}", path.display()))?;
    Ok(())
}
