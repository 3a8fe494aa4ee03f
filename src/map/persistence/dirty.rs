//! Dirty state detection for tracking unsaved changes.

use bevy::prelude::*;

use super::resources::MapDirtyState;
use crate::map::MapDocument;

/// System that compares the document revision against the last clean one
pub fn detect_document_changes(
    document: Res<MapDocument>,
    mut dirty_state: ResMut<MapDirtyState>,
) {
    if !document.is_changed() {
        return;
    }

    let was_dirty = dirty_state.is_dirty;
    dirty_state.refresh(&document);
    if dirty_state.is_dirty && !was_dirty {
        debug!("Map has unsaved changes");
    }
}
