mod clipboard;
pub mod conditions;
mod gizmo;
pub mod history;
mod selection;
pub mod tools;
pub mod transform;

pub use clipboard::Clipboard;
pub use gizmo::{GizmoDelta, GizmoDrag, GizmoRelease, GizmoSession};
pub use history::{CommandHistory, EditCommand, EditContext, EditState, EmptyHistoryError};
pub use selection::{
    DragSelect, DragSelectInput, DragSelectMode, ObjectSelection, OutlineRenderer, OutlineState,
    PickRequest, ScreenProjection, SelectionEvent, ViewProjection,
};
pub use tools::{CurrentMode, EditorMode, EditorModeChanged, ToolHandle, TransformTool};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded};

/// Push the persisted editor settings into the live resources
fn apply_editor_settings(
    config: Res<AppConfig>,
    mut history: ResMut<CommandHistory>,
    mut drag_select: ResMut<DragSelect>,
) {
    let settings = &config.data.editor;
    history.set_limit(settings.history_limit);
    drag_select.deadzone = settings.drag_select_deadzone;
    debug!(
        "Editor settings applied: history limit {}, drag deadzone {}",
        settings.history_limit, settings.drag_select_deadzone
    );
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentMode>()
            .init_resource::<ToolHandle>()
            .init_resource::<ObjectSelection>()
            .init_resource::<CommandHistory>()
            .init_resource::<Clipboard>()
            .init_resource::<DragSelect>()
            .init_resource::<ViewProjection>()
            .init_resource::<OutlineState>()
            .init_resource::<GizmoSession>()
            .add_message::<PickRequest>()
            .add_message::<DragSelectInput>()
            .add_message::<GizmoDrag>()
            .add_message::<GizmoRelease>()
            .add_message::<EditorModeChanged>()
            .add_systems(Startup, apply_editor_settings.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts,
                    (
                        history::handle_undo,
                        history::handle_redo,
                        selection::handle_select_all,
                        selection::handle_invert_selection,
                        selection::handle_deletion,
                        clipboard::handle_copy,
                        clipboard::handle_paste,
                        selection::handle_pick_requests,
                        gizmo::handle_gizmo_drag,
                        gizmo::handle_gizmo_release,
                        selection::handle_drag_select,
                    )
                        .chain()
                        .run_if(conditions::in_edit_mode),
                    selection::sync_selection_feedback,
                )
                    .chain(),
            );
    }
}
