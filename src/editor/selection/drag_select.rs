//! Rectangle selection in screen space.

use bevy::prelude::*;

use super::object_selection::ObjectSelection;
use crate::constants::DEFAULT_DRAG_SELECT_DEADZONE;
use crate::editor::gizmo::GizmoSession;
use crate::map::{MapDocument, MapObject, ObjectId};

/// Maps world points to screen pixels.
pub trait ScreenProjection {
    /// Screen position of `point`, or `None` when it is behind the viewer.
    fn world_to_screen(&self, point: Vec3) -> Option<Vec2>;

    fn viewport_size(&self) -> Vec2;
}

/// Camera snapshot used by the drag selection box.
///
/// Screen coordinates have their origin in the bottom-left corner.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub view_projection: Mat4,
    pub viewport: Vec2,
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl ViewProjection {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            view_projection: projection * view,
            viewport,
        }
    }
}

impl ScreenProjection for ViewProjection {
    fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some((ndc.truncate() + Vec2::ONE) * 0.5 * self.viewport)
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

/// How the box combines with the selection that existed before the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSelectMode {
    #[default]
    Replace,
    Additive,
    Subtractive,
}

impl DragSelectMode {
    /// Shift adds, Control subtracts; Shift wins when both are held.
    pub fn from_modifiers(shift: bool, control: bool) -> Self {
        if shift {
            DragSelectMode::Additive
        } else if control {
            DragSelectMode::Subtractive
        } else {
            DragSelectMode::Replace
        }
    }
}

/// Pointer input for the drag selection box.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum DragSelectInput {
    Press { cursor: Vec2 },
    Move {
        cursor: Vec2,
        shift: bool,
        control: bool,
    },
    Release,
    /// Abort the drag and restore the selection from before it started
    Cancel,
}

/// State of the drag selection box.
#[derive(Resource, Debug, Clone)]
pub struct DragSelect {
    pub deadzone: f32,
    start: Option<Vec2>,
    cursor: Vec2,
    dragging: bool,
    mode: DragSelectMode,
    original_selection: Vec<ObjectId>,
}

impl Default for DragSelect {
    fn default() -> Self {
        Self::with_deadzone(DEFAULT_DRAG_SELECT_DEADZONE)
    }
}

impl DragSelect {
    pub fn with_deadzone(deadzone: f32) -> Self {
        Self {
            deadzone,
            start: None,
            cursor: Vec2::ZERO,
            dragging: false,
            mode: DragSelectMode::default(),
            original_selection: Vec::new(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn mode(&self) -> DragSelectMode {
        self.mode
    }

    /// The box in screen space while dragging
    pub fn rect(&self) -> Option<Rect> {
        match (self.dragging, self.start) {
            (true, Some(start)) => Some(Rect::from_corners(start, self.cursor)),
            _ => None,
        }
    }

    pub fn press(&mut self, cursor: Vec2) {
        self.start = Some(cursor);
        self.cursor = cursor;
        self.dragging = false;
    }

    /// Track the pointer. Once it leaves the deadzone the selection follows
    /// the box. Returns whether a box drag is in progress.
    pub fn drag(
        &mut self,
        cursor: Vec2,
        mode: DragSelectMode,
        selection: &mut ObjectSelection,
        document: &MapDocument,
        projection: &dyn ScreenProjection,
    ) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        self.cursor = cursor;
        self.mode = mode;

        if !self.dragging && cursor.distance(start) > self.deadzone {
            self.original_selection = selection.selected_ids();
            self.dragging = true;
        }

        if self.dragging {
            self.update_selection(selection, document, projection);
        }
        self.dragging
    }

    /// End the drag, keeping the current selection. Returns whether a box
    /// drag was in progress.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.end();
        was_dragging
    }

    /// End the drag and restore the selection from before it started.
    pub fn cancel(&mut self, selection: &mut ObjectSelection, document: &MapDocument) {
        if self.dragging {
            selection.replace(&self.original_selection, document);
        }
        self.end();
    }

    fn end(&mut self) {
        self.start = None;
        self.dragging = false;
        self.original_selection.clear();
    }

    fn update_selection(
        &self,
        selection: &mut ObjectSelection,
        document: &MapDocument,
        projection: &dyn ScreenProjection,
    ) {
        let Some(area) = self.rect() else {
            return;
        };

        let inside: Vec<ObjectId> = selection
            .selectable_ids()
            .into_iter()
            .filter(|id| {
                document
                    .get(*id)
                    .and_then(|object| screen_bounds(object, projection))
                    .is_some_and(|bounds| strictly_contains(area, bounds))
            })
            .collect();

        let wanted: Vec<ObjectId> = match self.mode {
            DragSelectMode::Replace => inside,
            DragSelectMode::Additive => {
                let mut ids = self.original_selection.clone();
                ids.extend(inside.into_iter().filter(|id| !self.original_selection.contains(id)));
                ids
            }
            DragSelectMode::Subtractive => self
                .original_selection
                .iter()
                .copied()
                .filter(|id| !inside.contains(id))
                .collect(),
        };

        selection.replace(&wanted, document);
    }
}

/// Screen-space bounding box of the unit cube under the object's transform.
///
/// `None` if any corner is behind the viewer or off screen.
pub fn screen_bounds(object: &MapObject, projection: &dyn ScreenProjection) -> Option<Rect> {
    let transform = &object.transform;
    // Stored rotations are not guaranteed to be unit quaternions
    let rotation = if transform.rotation.is_normalized() {
        transform.rotation
    } else {
        Quat::IDENTITY
    };
    let viewport = Rect::from_corners(Vec2::ZERO, projection.viewport_size());
    let mut bounds: Option<Rect> = None;

    for corner in 0..8u8 {
        let local = Vec3::new(
            if corner & 1 == 0 { -0.5 } else { 0.5 },
            if corner & 2 == 0 { -0.5 } else { 0.5 },
            if corner & 4 == 0 { -0.5 } else { 0.5 },
        );
        let world = transform.translation + rotation * (local * transform.scale);
        let screen = projection.world_to_screen(world)?;
        if !viewport.contains(screen) {
            return None;
        }
        bounds = Some(match bounds {
            Some(rect) => rect.union_point(screen),
            None => Rect::from_center_size(screen, Vec2::ZERO),
        });
    }

    bounds
}

fn strictly_contains(area: Rect, bounds: Rect) -> bool {
    bounds.min.x > area.min.x
        && bounds.max.x < area.max.x
        && bounds.min.y > area.min.y
        && bounds.max.y < area.max.y
}

/// Feed pointer messages into the drag selection box.
pub fn handle_drag_select(
    mut inputs: MessageReader<DragSelectInput>,
    mut drag_select: ResMut<DragSelect>,
    mut selection: ResMut<ObjectSelection>,
    document: Res<MapDocument>,
    projection: Res<ViewProjection>,
    gizmo: Res<GizmoSession>,
) {
    for input in inputs.read() {
        match *input {
            DragSelectInput::Press { cursor } => {
                // The gizmo owns the pointer while it is being dragged
                if !gizmo.is_active() {
                    drag_select.press(cursor);
                }
            }
            DragSelectInput::Move {
                cursor,
                shift,
                control,
            } => {
                let mode = DragSelectMode::from_modifiers(shift, control);
                drag_select.drag(cursor, mode, &mut selection, &document, &*projection);
            }
            DragSelectInput::Release => {
                if drag_select.release() {
                    debug!("Drag selection finished with {} objects", selection.selected_count());
                }
            }
            DragSelectInput::Cancel => drag_select.cancel(&mut selection, &document),
        }
    }
}
