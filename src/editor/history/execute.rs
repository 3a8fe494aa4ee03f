//! Applying and reverting edit commands.

use bevy::prelude::*;

use super::commands::EditCommand;
use super::context::EditContext;
use crate::editor::transform;
use crate::map::{MapObject, ObjectId};

impl EditCommand {
    /// Perform the edit.
    pub fn apply(&self, ctx: &mut EditContext) {
        match self {
            EditCommand::SelectAdd { id } => {
                ctx.selection.select(*id, ctx.document);
            }
            EditCommand::SelectReplace { id, .. } => ctx.selection.replace(&[*id], ctx.document),
            EditCommand::SelectAll { .. } => ctx.selection.select_all(ctx.document),
            EditCommand::Deselect { id } => {
                ctx.selection.deselect(*id);
            }
            EditCommand::DeselectAll { .. } => ctx.selection.deselect_all(),
            EditCommand::InvertSelection => ctx.selection.invert(ctx.document),
            EditCommand::Translate { targets, delta } => translate(ctx, targets, *delta),
            EditCommand::Rotate {
                targets,
                pivot,
                axis,
                angle_degrees,
            } => rotate(ctx, targets, *pivot, *axis, *angle_degrees),
            EditCommand::Scale {
                targets,
                pivot,
                factor,
                scale_objects,
            } => scale(ctx, targets, *pivot, *factor, *scale_objects),
            EditCommand::DeleteObjects { objects } => remove_objects(ctx, objects),
            EditCommand::PasteObjects { objects, .. } => {
                ctx.selection.deselect_all();
                restore_objects(ctx, objects);
            }
        }
    }

    /// Undo the edit.
    pub fn revert(&self, ctx: &mut EditContext) {
        match self {
            EditCommand::SelectAdd { id } => {
                ctx.selection.deselect(*id);
            }
            EditCommand::SelectReplace { previous, .. }
            | EditCommand::SelectAll { previous }
            | EditCommand::DeselectAll { previous } => {
                ctx.selection.replace(previous, ctx.document)
            }
            EditCommand::Deselect { id } => {
                ctx.selection.select(*id, ctx.document);
            }
            EditCommand::InvertSelection => ctx.selection.invert(ctx.document),
            EditCommand::Translate { targets, delta } => translate(ctx, targets, -*delta),
            EditCommand::Rotate {
                targets,
                pivot,
                axis,
                angle_degrees,
            } => rotate(ctx, targets, *pivot, *axis, -*angle_degrees),
            EditCommand::Scale {
                targets,
                pivot,
                factor,
                scale_objects,
            } => scale(ctx, targets, *pivot, factor.recip(), *scale_objects),
            EditCommand::DeleteObjects { objects } => restore_objects(ctx, objects),
            EditCommand::PasteObjects { objects, previous } => {
                remove_objects(ctx, objects);
                ctx.selection.replace(previous, ctx.document);
            }
        }
    }
}

fn translate(ctx: &mut EditContext, targets: &[ObjectId], delta: Vec3) {
    transform::translate(ctx.document.transforms_mut(targets), delta);
    ctx.selection.sync_positions(targets, ctx.document);
}

fn rotate(ctx: &mut EditContext, targets: &[ObjectId], pivot: Vec3, axis: Vec3, angle: f32) {
    transform::rotate(ctx.document.transforms_mut(targets), pivot, axis, angle);
    ctx.selection.sync_positions(targets, ctx.document);
}

fn scale(ctx: &mut EditContext, targets: &[ObjectId], pivot: Vec3, factor: Vec3, objects: bool) {
    transform::scale(ctx.document.transforms_mut(targets), pivot, factor, objects);
    ctx.selection.sync_positions(targets, ctx.document);
}

fn remove_objects(ctx: &mut EditContext, objects: &[(ObjectId, MapObject)]) {
    for (id, _) in objects {
        ctx.document.remove_object(*id, ctx.catalog, ctx.selection);
    }
}

/// Re-add objects under their original ids and select them.
fn restore_objects(ctx: &mut EditContext, objects: &[(ObjectId, MapObject)]) {
    for (id, object) in objects {
        if let Err(error) = ctx.document.restore(*id, object.clone(), ctx.catalog) {
            warn!("Could not restore object {}: {}", id, error);
            continue;
        }
        ctx.selection.add_selectable(*id);
        ctx.selection.select(*id, ctx.document);
    }
}
