//! Resource types for map persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::{LoadResult, SaveResult};
use crate::map::{LoadReport, MapDocument};

#[derive(Resource, Default)]
pub struct MapLoadError {
    pub message: Option<String>,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct MapSaveError {
    pub message: Option<String>,
}

/// Resource tracking async map I/O operations
#[derive(Resource, Default)]
pub struct AsyncMapOperation {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// Whether a load operation is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncMapOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// Component for save task
#[derive(Component)]
pub struct SaveMapTask {
    pub task: Task<SaveResult>,
    /// Document revision that was serialized
    pub revision: u64,
}

/// Component for load task
#[derive(Component)]
pub struct LoadMapTask(pub Task<LoadResult>);

/// Resource tracking the currently loaded map file path
#[derive(Resource, Default)]
pub struct CurrentMapFile {
    pub path: Option<PathBuf>,
}

/// Resource tracking if the current map has unsaved changes
#[derive(Resource, Default)]
pub struct MapDirtyState {
    pub is_dirty: bool,
    /// Document revision at the last save, load or new map
    pub clean_revision: u64,
}

impl MapDirtyState {
    pub fn mark_clean(&mut self, revision: u64) {
        self.is_dirty = false;
        self.clean_revision = revision;
    }

    pub fn refresh(&mut self, document: &MapDocument) {
        self.is_dirty = document.revision() != self.clean_revision;
    }
}

/// Report of the most recent load or import, kept for display
#[derive(Resource, Default)]
pub struct LastLoadReport {
    pub report: Option<LoadReport>,
}
