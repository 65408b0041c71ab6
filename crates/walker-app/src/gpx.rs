//! Single-waypoint GPX export.
//!
//! Xcode's location simulation reads a GPX file with one waypoint; rewriting
//! that file moves the simulated device.

use std::fs;
use std::path::Path;

use anyhow::Context;

use walker_core::constants::GPX_WAYPOINT_NAME;
use walker_core::Waypoint;

/// Default file name next to the working directory.
pub const DEFAULT_GPX_FILE: &str = "Simulated Location.gpx";

/// GPX document holding exactly one waypoint at `position`.
pub fn gpx_document(position: Waypoint) -> String {
    format!(
        "<gpx creator=\"Xcode\" version=\"1.1\"><wpt lat=\"{}\" lon=\"{}\"><name>{}</name></wpt></gpx>",
        position.lat, position.lon, GPX_WAYPOINT_NAME
    )
}

/// Replace the file at `path` with a GPX document for `position`.
///
/// The document is written to a sibling temp file and renamed over the
/// target, so readers never see a half-written file.
pub fn write_gpx(path: &Path, position: Waypoint) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create GPX directory {}", dir.display()))?;
    }
    let tmp = path.with_extension("gpx.tmp");
    fs::write(&tmp, gpx_document(position))
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
