//! Keyboard shortcuts for selection operations.

use bevy::prelude::*;

use crate::editor::conditions::ctrl_held;
use crate::editor::history::{EditCommand, EditState};

/// Ctrl+A selects everything, or clears the selection if anything is selected
pub fn handle_select_all(keyboard: Res<ButtonInput<KeyCode>>, mut state: EditState) {
    if !ctrl_held(&keyboard) || !keyboard.just_pressed(KeyCode::KeyA) {
        return;
    }

    let command = if state.selection.is_empty() {
        if state.selection.selectable_count() == 0 {
            return;
        }
        EditCommand::select_all(&state.selection)
    } else {
        EditCommand::deselect_all(&state.selection)
    };

    let (history, mut ctx) = state.split();
    history.execute(command, &mut ctx);
}

/// Ctrl+I inverts the selection
pub fn handle_invert_selection(keyboard: Res<ButtonInput<KeyCode>>, mut state: EditState) {
    if !ctrl_held(&keyboard)
        || !keyboard.just_pressed(KeyCode::KeyI)
        || state.selection.selectable_count() == 0
    {
        return;
    }

    let (history, mut ctx) = state.split();
    history.execute(EditCommand::InvertSelection, &mut ctx);
}

/// Delete or Backspace removes the selected objects
pub fn handle_deletion(keyboard: Res<ButtonInput<KeyCode>>, mut state: EditState) {
    let should_delete =
        keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace);
    if !should_delete || state.selection.is_empty() {
        return;
    }

    let (history, ctx) = state.split();
    let removed = ctx.document.delete_selected(ctx.catalog, ctx.selection);
    info!("Deleted {} objects", removed.len());
    if let Some(command) = EditCommand::delete(removed) {
        history.record(command);
    }
}
