//! Helper functions for map persistence.

use bevy::prelude::*;
use std::path::Path;

use crate::paths;

pub fn ensure_maps_directory() {
    let maps_dir = paths::maps_dir();
    if !maps_dir.exists()
        && let Err(e) = std::fs::create_dir_all(&maps_dir)
    {
        warn!("Failed to create maps directory: {}", e);
    }
}

/// File name shown in progress messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("map")
        .to_string()
}
