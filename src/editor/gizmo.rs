//! Live transform gizmo drags.
//!
//! Drag deltas are applied immediately so objects follow the pointer; the
//! accumulated edit is recorded as a single command on release.

use bevy::prelude::*;

use crate::editor::history::{CommandHistory, EditCommand, EditContext, EditState};
use crate::map::ObjectId;

/// Incremental change reported by the gizmo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoDelta {
    Translate(Vec3),
    Rotate { axis: Vec3, angle_degrees: f32 },
    /// Without `scale_objects` only the spacing about the pivot changes
    Scale { factor: Vec3, scale_objects: bool },
}

impl GizmoDelta {
    /// Combine with a following delta of the same kind.
    fn merge(self, next: GizmoDelta) -> Option<GizmoDelta> {
        match (self, next) {
            (GizmoDelta::Translate(a), GizmoDelta::Translate(b)) => {
                Some(GizmoDelta::Translate(a + b))
            }
            (
                GizmoDelta::Rotate {
                    axis,
                    angle_degrees: a,
                },
                GizmoDelta::Rotate {
                    axis: next_axis,
                    angle_degrees: b,
                },
            ) if axis.normalize_or_zero() == next_axis.normalize_or_zero() => {
                Some(GizmoDelta::Rotate {
                    axis,
                    angle_degrees: a + b,
                })
            }
            (
                GizmoDelta::Scale {
                    factor: a,
                    scale_objects,
                },
                GizmoDelta::Scale {
                    factor: b,
                    scale_objects: next_scale_objects,
                },
            ) if scale_objects == next_scale_objects => Some(GizmoDelta::Scale {
                factor: a * b,
                scale_objects,
            }),
            _ => None,
        }
    }

    /// Command for this delta, or `None` when it would change nothing.
    fn command(self, targets: &[ObjectId], pivot: Vec3) -> Option<EditCommand> {
        let targets = targets.to_vec();
        match self {
            GizmoDelta::Translate(delta) => EditCommand::translate(targets, delta),
            GizmoDelta::Rotate {
                axis,
                angle_degrees,
            } => EditCommand::rotate(targets, pivot, axis, angle_degrees),
            GizmoDelta::Scale {
                factor,
                scale_objects,
            } => EditCommand::scale(targets, pivot, factor, scale_objects),
        }
    }
}

/// The gizmo moved while held.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct GizmoDrag {
    pub delta: GizmoDelta,
}

/// The gizmo was let go.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoRelease;

#[derive(Debug, Clone)]
struct ActiveDrag {
    targets: Vec<ObjectId>,
    pivot: Vec3,
    total: GizmoDelta,
}

/// Accumulates a gizmo drag until it is released.
#[derive(Resource, Debug, Default)]
pub struct GizmoSession {
    active: Option<ActiveDrag>,
}

impl GizmoSession {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Apply one drag step to the selected objects.
    ///
    /// Steps that would change nothing are dropped so the recorded total
    /// only holds what was applied.
    pub fn drag(&mut self, delta: GizmoDelta, history: &mut CommandHistory, ctx: &mut EditContext) {
        // Switching to a different kind of edit closes the previous one
        if let Some(active) = &self.active
            && active.total.merge(delta).is_none()
        {
            self.release(history);
        }

        let (targets, pivot) = match &self.active {
            Some(active) => (active.targets.clone(), active.pivot),
            None => {
                let Some(pivot) = ctx.selection.centroid() else {
                    return;
                };
                (ctx.selection.selected_ids(), pivot)
            }
        };

        let Some(step) = delta.command(&targets, pivot) else {
            return;
        };
        step.apply(ctx);

        let total = match &self.active {
            Some(active) => active.total.merge(delta).unwrap_or(delta),
            None => delta,
        };
        self.active = Some(ActiveDrag {
            targets,
            pivot,
            total,
        });
    }

    /// Record the accumulated edit, if it changed anything.
    pub fn release(&mut self, history: &mut CommandHistory) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(command) = active.total.command(&active.targets, active.pivot) {
            history.record(command);
        }
    }
}

pub fn handle_gizmo_drag(
    mut drags: MessageReader<GizmoDrag>,
    mut session: ResMut<GizmoSession>,
    mut state: EditState,
) {
    for drag in drags.read() {
        let (history, mut ctx) = state.split();
        session.drag(drag.delta, history, &mut ctx);
    }
}

pub fn handle_gizmo_release(
    mut releases: MessageReader<GizmoRelease>,
    mut session: ResMut<GizmoSession>,
    mut history: ResMut<CommandHistory>,
) {
    if releases.read().count() > 0 {
        session.release(&mut history);
    }
}
