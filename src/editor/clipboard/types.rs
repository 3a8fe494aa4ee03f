//! Clipboard data types for copy/paste operations.

use bevy::prelude::*;

use crate::editor::ObjectSelection;
use crate::map::{MapDocument, MapObject};

/// Resource that holds copied objects
#[derive(Resource, Debug, Default)]
pub struct Clipboard {
    objects: Vec<MapObject>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Replace the contents with copies of the selected objects.
    ///
    /// An empty selection leaves the clipboard untouched. Returns the number
    /// of objects copied.
    pub fn copy_selection(&mut self, selection: &ObjectSelection, document: &MapDocument) -> usize {
        if selection.is_empty() {
            return 0;
        }
        self.objects = selection
            .selected_ids()
            .into_iter()
            .filter_map(|id| document.get(id).cloned())
            .collect();
        self.objects.len()
    }
}
