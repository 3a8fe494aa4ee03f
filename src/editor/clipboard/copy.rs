//! Copy system for clipboard operations (Ctrl+C).

use bevy::prelude::*;

use super::types::Clipboard;
use crate::editor::ObjectSelection;
use crate::editor::conditions::ctrl_held;
use crate::map::MapDocument;

/// Copy selected objects to the clipboard (Ctrl+C)
pub fn handle_copy(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut clipboard: ResMut<Clipboard>,
    selection: Res<ObjectSelection>,
    document: Res<MapDocument>,
) {
    if !ctrl_held(&keyboard) || !keyboard.just_pressed(KeyCode::KeyC) {
        return;
    }

    // Nothing selected? Don't clear clipboard
    let copied = clipboard.copy_selection(&selection, &document);
    if copied > 0 {
        debug!("Copied {} objects", copied);
    }
}
