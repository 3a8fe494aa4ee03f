//! Click selection.

use bevy::prelude::*;

use super::object_selection::ObjectSelection;
use crate::editor::history::{EditCommand, EditState};
use crate::map::ObjectId;

/// A click in the viewport, resolved to the object under the pointer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRequest {
    /// Object hit by the click, `None` for empty space
    pub object: Option<ObjectId>,
    /// Shift was held: toggle instead of replace
    pub additive: bool,
}

/// The command a click should produce, if any.
pub fn pick_command(
    selection: &ObjectSelection,
    object: Option<ObjectId>,
    additive: bool,
) -> Option<EditCommand> {
    match object {
        None if !additive && !selection.is_empty() => Some(EditCommand::deselect_all(selection)),
        None => None,
        Some(id) if !selection.is_selectable(id) => None,
        Some(id) if additive => Some(if selection.is_selected(id) {
            EditCommand::deselect(id)
        } else {
            EditCommand::select_add(id)
        }),
        Some(id) => {
            let already_only = selection.selected_count() == 1 && selection.is_selected(id);
            (!already_only).then(|| EditCommand::select_replace(id, selection))
        }
    }
}

pub fn handle_pick_requests(mut picks: MessageReader<PickRequest>, mut state: EditState) {
    for pick in picks.read() {
        let Some(command) = pick_command(&state.selection, pick.object, pick.additive) else {
            continue;
        };
        let (history, mut ctx) = state.split();
        history.execute(command, &mut ctx);
    }
}
