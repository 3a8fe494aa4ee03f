use bevy::prelude::*;

use crate::editor::conditions::ctrl_held;
use crate::editor::ObjectSelection;
use crate::map::MapDocument;

/// Whether pointer input edits the map or steers the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Edit,
    Fly,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Edit => EditorMode::Fly,
            EditorMode::Fly => EditorMode::Edit,
        }
    }
}

#[derive(Resource, Default)]
pub struct CurrentMode {
    pub mode: EditorMode,
}

/// Sent whenever the editor mode changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorModeChanged {
    pub previous: EditorMode,
    pub current: EditorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformTool {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// State of the transform gizmo drawn at the selection centroid.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ToolHandle {
    pub visible: bool,
    pub position: Vec3,
    pub rotation: Quat,
    pub tool: TransformTool,
}

impl Default for ToolHandle {
    fn default() -> Self {
        Self {
            visible: false,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            tool: TransformTool::default(),
        }
    }
}

impl ToolHandle {
    /// Show the handle at `centroid`, or hide it when there is none.
    pub fn follow(&mut self, centroid: Option<Vec3>) {
        match centroid {
            Some(position) => {
                self.visible = true;
                self.position = position;
            }
            None => self.visible = false,
        }
    }

    /// Rotate and scale handles align with a lone selected object; every
    /// other case uses world axes.
    pub fn reset_rotation(&mut self, selection: &ObjectSelection, document: &MapDocument) {
        let single = match selection.selected_ids().as_slice() {
            [id] => document.get(*id).map(|object| object.transform.rotation),
            _ => None,
        };

        self.rotation = match (self.tool, single) {
            (TransformTool::Rotate | TransformTool::Scale, Some(rotation)) => rotation,
            _ => Quat::IDENTITY,
        };
    }

    pub fn set_tool(&mut self, tool: TransformTool, selection: &ObjectSelection, document: &MapDocument) {
        self.tool = tool;
        self.reset_rotation(selection, document);
    }
}

/// W/E/R pick the transform tool, X toggles between Edit and Fly mode.
pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_mode: ResMut<CurrentMode>,
    mut handle: ResMut<ToolHandle>,
    mut mode_changed: MessageWriter<EditorModeChanged>,
    selection: Res<ObjectSelection>,
    document: Res<MapDocument>,
) {
    if ctrl_held(&keyboard) {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        let previous = current_mode.mode;
        current_mode.mode = previous.toggled();
        debug!("Editor mode: {:?} -> {:?}", previous, current_mode.mode);
        mode_changed.write(EditorModeChanged {
            previous,
            current: current_mode.mode,
        });
        return;
    }

    if current_mode.mode != EditorMode::Edit {
        return;
    }

    let new_tool = if keyboard.just_pressed(KeyCode::KeyW) {
        Some(TransformTool::Translate)
    } else if keyboard.just_pressed(KeyCode::KeyE) {
        Some(TransformTool::Rotate)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        Some(TransformTool::Scale)
    } else {
        None
    };

    if let Some(tool) = new_tool {
        handle.set_tool(tool, &selection, &document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLibrary;
    use crate::map::{MapObject, ObjectCategory};

    fn document_with_rotated_object() -> (MapDocument, ObjectSelection, crate::map::ObjectId) {
        let mut document = MapDocument::default();
        let mut selection = ObjectSelection::default();
        let mut library = AssetLibrary::default();
        let object = MapObject::new(ObjectCategory::SpawnPoint, "titan")
            .with_transform(Transform::from_rotation(Quat::from_rotation_y(1.0)));
        let id = document
            .add_object(object, &mut library, &mut selection)
            .expect("permissive library accepts every object");
        (document, selection, id)
    }

    #[test]
    fn test_default_tool_is_translate() {
        assert_eq!(TransformTool::default(), TransformTool::Translate);
        assert_eq!(ToolHandle::default().tool, TransformTool::Translate);
        assert!(!ToolHandle::default().visible);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(EditorMode::Edit.toggled(), EditorMode::Fly);
        assert_eq!(EditorMode::Fly.toggled(), EditorMode::Edit);
    }

    #[test]
    fn test_follow_shows_and_hides() {
        let mut handle = ToolHandle::default();
        handle.follow(Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(handle.visible);
        assert_eq!(handle.position, Vec3::new(1.0, 2.0, 3.0));

        handle.follow(None);
        assert!(!handle.visible);
    }

    #[test]
    fn test_rotate_tool_aligns_with_single_object() {
        let (document, mut selection, id) = document_with_rotated_object();
        selection.select(id, &document);

        let mut handle = ToolHandle::default();
        handle.set_tool(TransformTool::Rotate, &selection, &document);
        assert_eq!(handle.rotation, Quat::from_rotation_y(1.0));

        handle.set_tool(TransformTool::Translate, &selection, &document);
        assert_eq!(handle.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_handle_uses_world_axes_without_single_selection() {
        let (document, selection, _) = document_with_rotated_object();
        let mut handle = ToolHandle::default();
        handle.set_tool(TransformTool::Scale, &selection, &document);
        assert_eq!(handle.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_shortcuts_switch_tool_and_mode() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<CurrentMode>()
            .init_resource::<ToolHandle>()
            .init_resource::<ObjectSelection>()
            .init_resource::<MapDocument>()
            .add_message::<EditorModeChanged>()
            .add_systems(Update, handle_tool_shortcuts);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyE);
        app.update();
        assert_eq!(app.world().resource::<ToolHandle>().tool, TransformTool::Rotate);

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.clear();
            keyboard.release(KeyCode::KeyE);
            keyboard.press(KeyCode::KeyX);
        }
        app.update();
        assert_eq!(app.world().resource::<CurrentMode>().mode, EditorMode::Fly);

        // Tool keys are ignored in fly mode
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.clear();
            keyboard.release(KeyCode::KeyX);
            keyboard.press(KeyCode::KeyR);
        }
        app.update();
        assert_eq!(app.world().resource::<ToolHandle>().tool, TransformTool::Rotate);
    }
}
