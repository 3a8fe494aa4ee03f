//! Reversible edit commands.

use bevy::prelude::*;

use crate::editor::ObjectSelection;
use crate::map::{MapDocument, MapObject, ObjectId};

/// A reversible edit.
///
/// Every variant captures the state it needs at construction time, so
/// applying and reverting do not depend on the selection at that moment.
#[derive(Clone, Debug, PartialEq)]
pub enum EditCommand {
    /// An object was added to the selection
    SelectAdd { id: ObjectId },
    /// The selection was replaced by a single object
    SelectReplace {
        id: ObjectId,
        previous: Vec<ObjectId>,
    },
    SelectAll { previous: Vec<ObjectId> },
    /// An object was removed from the selection
    Deselect { id: ObjectId },
    DeselectAll { previous: Vec<ObjectId> },
    InvertSelection,
    Translate {
        targets: Vec<ObjectId>,
        delta: Vec3,
    },
    Rotate {
        targets: Vec<ObjectId>,
        pivot: Vec3,
        axis: Vec3,
        angle_degrees: f32,
    },
    Scale {
        targets: Vec<ObjectId>,
        pivot: Vec3,
        factor: Vec3,
        /// Multiply local scales as well as the spacing
        scale_objects: bool,
    },
    /// Objects were removed from the document
    DeleteObjects { objects: Vec<(ObjectId, MapObject)> },
    /// Clipboard copies were added and selected
    PasteObjects {
        objects: Vec<(ObjectId, MapObject)>,
        previous: Vec<ObjectId>,
    },
}

impl EditCommand {
    pub fn select_add(id: ObjectId) -> Self {
        EditCommand::SelectAdd { id }
    }

    pub fn select_replace(id: ObjectId, selection: &ObjectSelection) -> Self {
        EditCommand::SelectReplace {
            id,
            previous: selection.selected_ids(),
        }
    }

    pub fn select_all(selection: &ObjectSelection) -> Self {
        EditCommand::SelectAll {
            previous: selection.selected_ids(),
        }
    }

    pub fn deselect(id: ObjectId) -> Self {
        EditCommand::Deselect { id }
    }

    pub fn deselect_all(selection: &ObjectSelection) -> Self {
        EditCommand::DeselectAll {
            previous: selection.selected_ids(),
        }
    }

    /// Move `targets` by `delta`. `None` when nothing would move.
    pub fn translate(targets: Vec<ObjectId>, delta: Vec3) -> Option<Self> {
        if targets.is_empty() || delta == Vec3::ZERO || !delta.is_finite() {
            return None;
        }
        Some(EditCommand::Translate { targets, delta })
    }

    /// Rotate `targets` about `pivot`.
    pub fn rotate(
        targets: Vec<ObjectId>,
        pivot: Vec3,
        axis: Vec3,
        angle_degrees: f32,
    ) -> Option<Self> {
        let axis = axis.try_normalize()?;
        if targets.is_empty() || angle_degrees == 0.0 || !angle_degrees.is_finite() {
            return None;
        }
        Some(EditCommand::Rotate {
            targets,
            pivot,
            axis,
            angle_degrees,
        })
    }

    /// Scale the spacing of `targets` about `pivot`, and their local scales
    /// too when `scale_objects` is set.
    ///
    /// Unit factors would be no-ops and zero components could not be undone,
    /// so both yield `None`.
    pub fn scale(
        targets: Vec<ObjectId>,
        pivot: Vec3,
        factor: Vec3,
        scale_objects: bool,
    ) -> Option<Self> {
        if targets.is_empty()
            || factor == Vec3::ONE
            || factor.cmpeq(Vec3::ZERO).any()
            || !factor.is_finite()
        {
            return None;
        }
        Some(EditCommand::Scale {
            targets,
            pivot,
            factor,
            scale_objects,
        })
    }

    /// Wrap objects already removed from the document.
    pub fn delete(objects: Vec<(ObjectId, MapObject)>) -> Option<Self> {
        if objects.is_empty() {
            return None;
        }
        Some(EditCommand::DeleteObjects { objects })
    }

    /// Allocate ids for copies of `objects`, to be added when applied.
    pub fn paste(
        objects: &[MapObject],
        document: &mut MapDocument,
        selection: &ObjectSelection,
    ) -> Option<Self> {
        if objects.is_empty() {
            return None;
        }
        Some(EditCommand::PasteObjects {
            objects: objects
                .iter()
                .map(|object| (document.reserve_id(), object.clone()))
                .collect(),
            previous: selection.selected_ids(),
        })
    }

    /// Short human-readable summary for logs
    pub fn description(&self) -> String {
        match self {
            EditCommand::SelectAdd { id } => format!("select {}", id),
            EditCommand::SelectReplace { id, .. } => format!("select only {}", id),
            EditCommand::SelectAll { .. } => "select all".to_string(),
            EditCommand::Deselect { id } => format!("deselect {}", id),
            EditCommand::DeselectAll { .. } => "deselect all".to_string(),
            EditCommand::InvertSelection => "invert selection".to_string(),
            EditCommand::Translate { targets, delta } => {
                format!("translate {} objects by {}", targets.len(), delta)
            }
            EditCommand::Rotate {
                targets,
                angle_degrees,
                ..
            } => format!("rotate {} objects by {} degrees", targets.len(), angle_degrees),
            EditCommand::Scale {
                targets, factor, ..
            } => format!("scale {} objects by {}", targets.len(), factor),
            EditCommand::DeleteObjects { objects } => format!("delete {} objects", objects.len()),
            EditCommand::PasteObjects { objects, .. } => {
                format!("paste {} objects", objects.len())
            }
        }
    }
}
