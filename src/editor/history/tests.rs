//! Unit tests for the history module.

use bevy::prelude::*;

use super::command_history::{CommandHistory, EmptyHistoryError};
use super::commands::EditCommand;
use super::context::EditContext;
use crate::assets::AssetLibrary;
use crate::editor::ObjectSelection;
use crate::map::{MapDocument, MapObject, ObjectCategory, ObjectId};

struct Fixture {
    document: MapDocument,
    selection: ObjectSelection,
    library: AssetLibrary,
    ids: Vec<ObjectId>,
}

impl Fixture {
    fn new(positions: &[Vec3]) -> Self {
        let mut document = MapDocument::default();
        let mut selection = ObjectSelection::default();
        let mut library = AssetLibrary::default();
        let ids = positions
            .iter()
            .map(|position| {
                let object = MapObject::new(ObjectCategory::Misc, "barrier")
                    .with_transform(Transform::from_translation(*position));
                document
                    .add_object(object, &mut library, &mut selection)
                    .expect("permissive library")
            })
            .collect();
        Self {
            document,
            selection,
            library,
            ids,
        }
    }

    fn ctx(&mut self) -> EditContext<'_> {
        EditContext {
            document: &mut self.document,
            selection: &mut self.selection,
            catalog: &mut self.library,
        }
    }

    fn select(&mut self, index: usize) {
        let id = self.ids[index];
        self.selection.select(id, &self.document);
    }

    fn positions(&self) -> Vec<Vec3> {
        self.ids
            .iter()
            .filter_map(|id| self.document.position(*id))
            .collect()
    }
}

fn two_objects() -> Fixture {
    Fixture::new(&[Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)])
}

#[test]
fn test_empty_history_errors() {
    let mut fixture = two_objects();
    let mut history = CommandHistory::default();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(
        history.undo(&mut fixture.ctx()),
        Err(EmptyHistoryError::NothingToUndo)
    );
    assert_eq!(
        history.redo(&mut fixture.ctx()),
        Err(EmptyHistoryError::NothingToRedo)
    );
}

#[test]
fn test_translate_undo_redo() {
    let mut fixture = two_objects();
    fixture.select(0);
    fixture.select(1);
    let before = fixture.positions();

    let mut history = CommandHistory::default();
    let command = EditCommand::translate(fixture.selection.selected_ids(), Vec3::X).expect("non-degenerate");
    history.execute(command, &mut fixture.ctx());
    let after = fixture.positions();
    assert_eq!(after, vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]);
    assert_eq!(fixture.selection.centroid(), Some(Vec3::new(2.0, 0.0, 0.0)));

    history.undo(&mut fixture.ctx()).expect("undo");
    assert_eq!(fixture.positions(), before);
    assert_eq!(fixture.selection.centroid(), Some(Vec3::new(1.0, 0.0, 0.0)));

    history.redo(&mut fixture.ctx()).expect("redo");
    assert_eq!(fixture.positions(), after);
}

#[test]
fn test_translate_targets_are_captured() {
    let mut fixture = two_objects();
    fixture.select(0);
    let mut history = CommandHistory::default();
    let command = EditCommand::translate(fixture.selection.selected_ids(), Vec3::Y).expect("non-degenerate");
    history.execute(command, &mut fixture.ctx());

    // Selection changes outside the history do not change what undo moves
    fixture.selection.deselect_all();
    fixture.select(1);
    history.undo(&mut fixture.ctx()).expect("undo");

    assert_eq!(fixture.positions(), vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]);
}

#[test]
fn test_rotate_and_scale_revert() {
    let mut fixture = Fixture::new(&[
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 2.0, 0.5),
        Vec3::new(0.0, -3.0, 4.0),
    ]);
    for index in 0..3 {
        fixture.select(index);
    }
    let before = fixture.positions();
    let centroid = fixture.selection.centroid().expect("selection");
    let mut history = CommandHistory::default();

    let targets = fixture.selection.selected_ids();
    let rotate = EditCommand::rotate(targets.clone(), centroid, Vec3::new(0.0, 1.0, 1.0), 33.0)
        .expect("non-degenerate");
    history.execute(rotate, &mut fixture.ctx());
    let scale = EditCommand::scale(targets, centroid, Vec3::new(2.0, 0.5, 3.0), true)
        .expect("non-degenerate");
    history.execute(scale, &mut fixture.ctx());

    // Rotating and scaling about the centroid keeps it in place
    let moved = fixture.selection.centroid().expect("selection");
    assert!(moved.abs_diff_eq(centroid, 1e-4));

    history.undo(&mut fixture.ctx()).expect("undo scale");
    history.undo(&mut fixture.ctx()).expect("undo rotate");

    for (restored, original) in fixture.positions().iter().zip(&before) {
        assert!(restored.abs_diff_eq(*original, 1e-4));
    }
    for id in &fixture.ids {
        let object = fixture.document.get(*id).expect("object");
        assert!(object.transform.rotation.abs_diff_eq(Quat::IDENTITY, 1e-4));
        assert!(object.transform.scale.abs_diff_eq(Vec3::ONE, 1e-4));
    }
}

#[test]
fn test_degenerate_commands_are_not_built() {
    let fixture = two_objects();
    let ids = fixture.ids.clone();
    assert!(EditCommand::translate(Vec::new(), Vec3::X).is_none());
    assert!(EditCommand::translate(ids.clone(), Vec3::ZERO).is_none());
    assert!(EditCommand::translate(ids.clone(), Vec3::splat(f32::NAN)).is_none());
    assert!(EditCommand::rotate(ids.clone(), Vec3::ZERO, Vec3::ZERO, 45.0).is_none());
    assert!(EditCommand::rotate(ids.clone(), Vec3::ZERO, Vec3::Y, 0.0).is_none());
    assert!(EditCommand::rotate(Vec::new(), Vec3::ZERO, Vec3::Y, 45.0).is_none());
    assert!(EditCommand::scale(ids.clone(), Vec3::ZERO, Vec3::ONE, true).is_none());
    assert!(EditCommand::scale(ids, Vec3::ZERO, Vec3::new(2.0, 0.0, 1.0), true).is_none());
    assert!(EditCommand::delete(Vec::new()).is_none());
}

#[test]
fn test_selection_commands_revert() {
    let mut fixture = two_objects();
    let (a, b) = (fixture.ids[0], fixture.ids[1]);
    let mut history = CommandHistory::default();

    history.execute(EditCommand::select_add(a), &mut fixture.ctx());
    let replace = EditCommand::select_replace(b, &fixture.selection);
    history.execute(replace, &mut fixture.ctx());
    assert_eq!(fixture.selection.selected_ids(), vec![b]);

    let select_all = EditCommand::select_all(&fixture.selection);
    history.execute(select_all, &mut fixture.ctx());
    assert_eq!(fixture.selection.selected_ids(), vec![a, b]);

    history.execute(EditCommand::InvertSelection, &mut fixture.ctx());
    assert!(fixture.selection.is_empty());

    history.undo(&mut fixture.ctx()).expect("undo invert");
    assert_eq!(fixture.selection.selected_ids(), vec![a, b]);
    history.undo(&mut fixture.ctx()).expect("undo select all");
    assert_eq!(fixture.selection.selected_ids(), vec![b]);
    history.undo(&mut fixture.ctx()).expect("undo replace");
    assert_eq!(fixture.selection.selected_ids(), vec![a]);
    history.undo(&mut fixture.ctx()).expect("undo add");
    assert!(fixture.selection.is_empty());
}

#[test]
fn test_deselect_commands_revert() {
    let mut fixture = two_objects();
    let (a, b) = (fixture.ids[0], fixture.ids[1]);
    fixture.select(0);
    fixture.select(1);
    let mut history = CommandHistory::default();

    history.execute(EditCommand::deselect(a), &mut fixture.ctx());
    assert_eq!(fixture.selection.selected_ids(), vec![b]);
    let deselect_all = EditCommand::deselect_all(&fixture.selection);
    history.execute(deselect_all, &mut fixture.ctx());
    assert!(fixture.selection.is_empty());

    history.undo(&mut fixture.ctx()).expect("undo");
    history.undo(&mut fixture.ctx()).expect("undo");
    assert_eq!(fixture.selection.selected_ids(), vec![a, b]);
    assert_eq!(fixture.selection.centroid(), Some(Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn test_new_command_discards_redo_branch() {
    let mut fixture = two_objects();
    let (a, b) = (fixture.ids[0], fixture.ids[1]);
    let mut history = CommandHistory::default();

    history.execute(EditCommand::select_add(a), &mut fixture.ctx());
    history.execute(EditCommand::select_add(b), &mut fixture.ctx());
    history.undo(&mut fixture.ctx()).expect("undo");
    assert!(history.can_redo());

    history.execute(EditCommand::deselect(a), &mut fixture.ctx());
    assert!(!history.can_redo());
    assert_eq!(history.undo_count(), 2);
    assert_eq!(history.last_applied(), Some(&EditCommand::deselect(a)));
}

#[test]
fn test_command_history_limit() {
    let mut fixture = two_objects();
    let id = fixture.ids[0];
    let mut history = CommandHistory::default();

    for _ in 0..150 {
        history.execute(EditCommand::InvertSelection, &mut fixture.ctx());
    }
    assert_eq!(history.undo_count(), crate::constants::MAX_HISTORY_SIZE);

    history.set_limit(3);
    assert_eq!(history.undo_count(), 3);

    history.undo(&mut fixture.ctx()).expect("undo");
    history.undo(&mut fixture.ctx()).expect("undo");
    history.set_limit(2);
    // The oldest applied command went first; both undone commands remain
    assert_eq!(history.undo_count(), 0);
    assert_eq!(history.redo_count(), 2);

    history.record(EditCommand::select_add(id));
    assert_eq!(history.redo_count(), 0);
    assert_eq!(history.undo_count(), 1);
}

#[test]
fn test_delete_is_undoable() {
    let mut fixture = two_objects();
    let (a, b) = (fixture.ids[0], fixture.ids[1]);
    fixture.select(1);
    let mut history = CommandHistory::default();

    let removed = fixture
        .document
        .delete_selected(&mut fixture.library, &mut fixture.selection);
    history.record(EditCommand::delete(removed).expect("something was deleted"));
    assert_eq!(fixture.document.ids(), vec![a]);
    assert!(!fixture.selection.is_selectable(b));
    assert_eq!(fixture.library.live_count(), 1);

    history.undo(&mut fixture.ctx()).expect("undo");
    assert_eq!(fixture.document.ids(), vec![a, b]);
    assert_eq!(fixture.selection.selected_ids(), vec![b]);
    assert_eq!(fixture.library.live_count(), 2);

    history.redo(&mut fixture.ctx()).expect("redo");
    assert_eq!(fixture.document.ids(), vec![a]);
    assert!(fixture.selection.is_empty());
}

#[test]
fn test_paste_apply_and_revert() {
    let mut fixture = two_objects();
    let a = fixture.ids[0];
    fixture.select(0);
    let copies = vec![fixture.document.get(a).expect("object").clone()];
    let mut history = CommandHistory::default();

    let paste = EditCommand::paste(&copies, &mut fixture.document, &fixture.selection)
        .expect("clipboard not empty");
    history.execute(paste, &mut fixture.ctx());

    assert_eq!(fixture.document.len(), 3);
    let selected = fixture.selection.selected_ids();
    assert_eq!(selected.len(), 1);
    assert_ne!(selected[0], a);

    history.undo(&mut fixture.ctx()).expect("undo");
    assert_eq!(fixture.document.len(), 2);
    assert_eq!(fixture.selection.selected_ids(), vec![a]);

    // Redo reuses the same id
    history.redo(&mut fixture.ctx()).expect("redo");
    assert_eq!(fixture.selection.selected_ids(), selected);
}

fn keyboard_app(fixture: Fixture) -> App {
    let mut app = App::new();
    app.init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(fixture.document)
        .insert_resource(fixture.selection)
        .insert_resource(fixture.library)
        .init_resource::<CommandHistory>()
        .add_systems(Update, (super::handle_undo, super::handle_redo));
    app
}

fn press(app: &mut App, keys: &[KeyCode]) {
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.reset_all();
    for key in keys {
        keyboard.press(*key);
    }
}

#[test]
fn test_keyboard_undo_redo() {
    let mut fixture = two_objects();
    let a = fixture.ids[0];
    let mut history = CommandHistory::default();
    history.execute(EditCommand::select_add(a), &mut fixture.ctx());

    let mut app = keyboard_app(fixture);
    app.insert_resource(history);

    press(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    app.update();
    assert!(app.world().resource::<ObjectSelection>().is_empty());

    press(&mut app, &[KeyCode::ControlLeft, KeyCode::ShiftLeft, KeyCode::KeyZ]);
    app.update();
    assert!(app.world().resource::<ObjectSelection>().is_selected(a));

    press(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    app.update();
    press(&mut app, &[KeyCode::ControlRight, KeyCode::KeyY]);
    app.update();
    assert!(app.world().resource::<ObjectSelection>().is_selected(a));
    assert_eq!(app.world().resource::<CommandHistory>().undo_count(), 1);
}

#[test]
fn test_keyboard_undo_on_empty_history_is_ignored() {
    let mut app = keyboard_app(two_objects());
    press(&mut app, &[KeyCode::ControlLeft, KeyCode::KeyZ]);
    app.update();
    assert!(!app.world().resource::<CommandHistory>().can_undo());
}
