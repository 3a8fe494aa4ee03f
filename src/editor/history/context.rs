//! Mutable state an [`EditCommand`](super::EditCommand) operates on.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::CommandHistory;
use crate::assets::{AssetCatalog, AssetLibrary};
use crate::editor::ObjectSelection;
use crate::map::MapDocument;

/// Borrowed view of the document, the selection and the asset catalog.
pub struct EditContext<'a> {
    pub document: &'a mut MapDocument,
    pub selection: &'a mut ObjectSelection,
    pub catalog: &'a mut dyn AssetCatalog,
}

/// System parameter bundling every resource an edit touches.
#[derive(SystemParam)]
pub struct EditState<'w> {
    pub document: ResMut<'w, MapDocument>,
    pub selection: ResMut<'w, ObjectSelection>,
    pub library: ResMut<'w, AssetLibrary>,
    pub history: ResMut<'w, CommandHistory>,
}

impl EditState<'_> {
    /// The history alongside a context over the remaining resources.
    pub fn split(&mut self) -> (&mut CommandHistory, EditContext<'_>) {
        (
            &mut *self.history,
            EditContext {
                document: &mut *self.document,
                selection: &mut *self.selection,
                catalog: &mut *self.library,
            },
        )
    }
}
