//! Outline and tool handle feedback driven by selection events.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::object_selection::{ObjectSelection, SelectionEvent};
use crate::assets::RenderableHandle;
use crate::editor::tools::ToolHandle;
use crate::map::{MapDocument, ObjectId};

/// Draws or hides the selection outline of a renderable.
pub trait OutlineRenderer {
    fn set_outline_enabled(&mut self, handle: RenderableHandle, enabled: bool);
}

/// Tracks which renderables currently carry a selection outline.
#[derive(Resource, Debug, Default)]
pub struct OutlineState {
    highlighted: HashSet<RenderableHandle>,
    /// Handle outlined for each object, kept so outlines can be removed
    /// after the object itself is gone
    by_object: HashMap<ObjectId, RenderableHandle>,
}

impl OutlineState {
    pub fn is_highlighted(&self, handle: RenderableHandle) -> bool {
        self.highlighted.contains(&handle)
    }

    pub fn highlighted_count(&self) -> usize {
        self.highlighted.len()
    }

    fn track(&mut self, id: ObjectId, handle: Option<RenderableHandle>) -> Option<RenderableHandle> {
        match handle {
            Some(handle) => self.by_object.insert(id, handle),
            None => self.by_object.remove(&id),
        }
    }
}

impl OutlineRenderer for OutlineState {
    fn set_outline_enabled(&mut self, handle: RenderableHandle, enabled: bool) {
        if enabled {
            self.highlighted.insert(handle);
        } else {
            self.highlighted.remove(&handle);
        }
    }
}

/// Apply drained selection events to the outlines and the tool handle.
pub fn apply_selection_events(
    events: &[SelectionEvent],
    selection: &ObjectSelection,
    document: &MapDocument,
    outlines: &mut OutlineState,
    tool_handle: &mut ToolHandle,
) {
    let mut centroid_changed = false;

    for event in events {
        match *event {
            SelectionEvent::Outline { id, enabled: true } => {
                let Some(handle) = document.renderable(id) else {
                    continue;
                };
                if let Some(stale) = outlines.track(id, Some(handle)) {
                    outlines.set_outline_enabled(stale, false);
                }
                outlines.set_outline_enabled(handle, true);
            }
            SelectionEvent::Outline { id, enabled: false } => {
                if let Some(handle) = outlines.track(id, None) {
                    outlines.set_outline_enabled(handle, false);
                }
            }
            SelectionEvent::Centroid(centroid) => {
                tool_handle.follow(centroid);
                centroid_changed = true;
            }
        }
    }

    if centroid_changed {
        tool_handle.reset_rotation(selection, document);
    }
}

/// Drain the selection outbox once per tick.
pub fn sync_selection_feedback(
    mut selection: ResMut<ObjectSelection>,
    document: Res<MapDocument>,
    mut outlines: ResMut<OutlineState>,
    mut tool_handle: ResMut<ToolHandle>,
) {
    if selection.pending_events().is_empty() {
        return;
    }
    let events = selection.drain_events();
    apply_selection_events(&events, &selection, &document, &mut outlines, &mut tool_handle);
}
