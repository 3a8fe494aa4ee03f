//! Message types for map persistence operations.

use bevy::prelude::*;
use std::path::PathBuf;

#[derive(Message)]
pub struct SaveMapRequest {
    pub path: PathBuf,
}

/// Replace the current map with the script stored at `path`
#[derive(Message)]
pub struct LoadMapRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct NewMapRequest;

/// Append the objects of a pasted map script to the current map
#[derive(Message)]
pub struct ImportScriptRequest {
    pub script: String,
}
