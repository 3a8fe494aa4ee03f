//! Run conditions for controlling when editor systems execute.

use bevy::prelude::*;

use crate::editor::tools::{CurrentMode, EditorMode};

/// Run condition: returns true while selection and editing input is accepted.
///
/// Usage: `.run_if(in_edit_mode)`
pub fn in_edit_mode(current: Res<CurrentMode>) -> bool {
    current.mode == EditorMode::Edit
}

/// True while either Control key is held
pub fn ctrl_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight)
}

/// True while either Shift key is held
pub fn shift_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight)
}
