//! Paste system for clipboard operations (Ctrl+V).

use bevy::prelude::*;

use super::types::Clipboard;
use crate::editor::conditions::ctrl_held;
use crate::editor::history::{CommandHistory, EditCommand, EditContext, EditState};
use crate::editor::tools::{ToolHandle, TransformTool};

/// Add copies of the clipboard objects and select them.
///
/// Returns `false` for an empty clipboard.
pub fn paste(clipboard: &Clipboard, history: &mut CommandHistory, ctx: &mut EditContext) -> bool {
    let Some(command) = EditCommand::paste(clipboard.objects(), ctx.document, ctx.selection) else {
        return false;
    };
    history.execute(command, ctx);
    true
}

/// Paste clipboard objects (Ctrl+V)
pub fn handle_paste(
    keyboard: Res<ButtonInput<KeyCode>>,
    clipboard: Res<Clipboard>,
    mut tool_handle: ResMut<ToolHandle>,
    mut state: EditState,
) {
    if !ctrl_held(&keyboard) || !keyboard.just_pressed(KeyCode::KeyV) {
        return;
    }

    let (history, mut ctx) = state.split();
    if paste(&clipboard, history, &mut ctx) {
        info!("Pasted {} objects", clipboard.len());
        // Pasted copies sit on their originals, so start out moving them
        tool_handle.set_tool(TransformTool::Translate, ctx.selection, ctx.document);
    }
}
