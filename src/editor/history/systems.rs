//! Bevy systems for handling undo/redo keyboard shortcuts.

use bevy::prelude::*;

use super::context::EditState;
use crate::editor::conditions::{ctrl_held, shift_held};

/// System to handle undo keyboard shortcut (Ctrl+Z)
pub fn handle_undo(keyboard: Res<ButtonInput<KeyCode>>, mut state: EditState) {
    // Ctrl+Z (without shift) = undo
    if !ctrl_held(&keyboard) || shift_held(&keyboard) || !keyboard.just_pressed(KeyCode::KeyZ) {
        return;
    }

    let (history, mut ctx) = state.split();
    if let Err(error) = history.undo(&mut ctx) {
        debug!("Undo ignored: {}", error);
    }
}

/// System to handle redo keyboard shortcut (Ctrl+Y or Ctrl+Shift+Z)
pub fn handle_redo(keyboard: Res<ButtonInput<KeyCode>>, mut state: EditState) {
    let ctrl = ctrl_held(&keyboard);

    // Ctrl+Y or Ctrl+Shift+Z = redo
    let redo_pressed = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift_held(&keyboard) && keyboard.just_pressed(KeyCode::KeyZ));
    if !redo_pressed {
        return;
    }

    let (history, mut ctx) = state.split();
    if let Err(error) = history.redo(&mut ctx) {
        debug!("Redo ignored: {}", error);
    }
}
