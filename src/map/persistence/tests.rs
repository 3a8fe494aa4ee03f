//! Unit tests for the persistence module.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::helpers::display_name;
use super::*;
use crate::assets::AssetLibrary;
use crate::config::UpdateLastMapPathRequest;
use crate::editor::{CommandHistory, EditCommand, EditContext, ObjectSelection};
use crate::map::{MapDocument, MapPlugin};

const SCRIPT: &str = "map,disablebounds;spawnpoint,titan,1,2,3,0,0,0,1;bogus,x,1,2,3,4,5,6,7;";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("aottg_map_editor_test_{}_{}", std::process::id(), name))
}

fn persistence_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<ObjectSelection>()
        .init_resource::<AssetLibrary>()
        .init_resource::<CommandHistory>()
        .add_message::<UpdateLastMapPathRequest>()
        .add_plugins(MapPlugin);
    app.update();
    app
}

fn wait_until_idle(app: &mut App) {
    for _ in 0..crate::constants::MAX_IO_WAIT_TICKS {
        app.update();
        if !app.world().resource::<AsyncMapOperation>().is_busy() {
            return;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    panic!("map operation did not finish");
}

fn translate_everything(app: &mut App, delta: Vec3) {
    let world = app.world_mut();
    world.resource_scope(|world, mut document: Mut<MapDocument>| {
        world.resource_scope(|world, mut library: Mut<AssetLibrary>| {
            world.resource_scope(|world, mut history: Mut<CommandHistory>| {
                let mut selection = world.resource_mut::<ObjectSelection>();
                selection.select_all(&document);
                let command = EditCommand::translate(selection.selected_ids(), delta).unwrap();
                let mut ctx = EditContext {
                    document: &mut document,
                    selection: &mut selection,
                    catalog: &mut *library,
                };
                history.execute(command, &mut ctx);
            })
        })
    });
}

fn last_map_paths(app: &App) -> Vec<PathBuf> {
    let messages = app.world().resource::<Messages<UpdateLastMapPathRequest>>();
    let mut cursor = messages.get_cursor();
    cursor.read(messages).map(|m| m.path.clone()).collect()
}

#[test]
fn test_display_name() {
    assert_eq!(display_name(Path::new("maps/forest.txt")), "forest.txt");
    assert_eq!(display_name(Path::new("")), "map");
}

#[test]
fn test_async_operation_busy() {
    let mut op = AsyncMapOperation::default();
    assert!(!op.is_busy());
    op.is_loading = true;
    assert!(op.is_busy());
    op.is_loading = false;
    op.is_saving = true;
    assert!(op.is_busy());
}

#[test]
fn test_dirty_state_follows_revision() {
    let mut document = MapDocument::default();
    let mut dirty = MapDirtyState::default();
    dirty.refresh(&document);
    assert!(!dirty.is_dirty);

    document.set_bounds_disabled(true);
    dirty.refresh(&document);
    assert!(dirty.is_dirty);

    dirty.mark_clean(document.revision());
    assert!(!dirty.is_dirty);
    dirty.refresh(&document);
    assert!(!dirty.is_dirty);
}

#[test]
fn test_load_replaces_document() {
    let path = temp_path("load.txt");
    std::fs::write(&path, SCRIPT).unwrap();

    let mut app = persistence_app();
    app.world_mut()
        .write_message(ImportScriptRequest {
            script: "spawnpoint,titan,9,9,9,0,0,0,1;".to_string(),
        });
    app.update();
    translate_everything(&mut app, Vec3::X);
    assert!(app.world().resource::<CommandHistory>().can_undo());

    app.world_mut().write_message(LoadMapRequest { path: path.clone() });
    wait_until_idle(&mut app);

    let world = app.world();
    let document = world.resource::<MapDocument>();
    assert_eq!(document.len(), 1);
    assert!(document.bounds_disabled());
    assert_eq!(
        document.iter().next().map(|(_, o)| o.position()),
        Some(Vec3::new(1.0, 2.0, 3.0))
    );
    assert!(!world.resource::<CommandHistory>().can_undo());
    assert!(world.resource::<ObjectSelection>().is_empty());
    assert_eq!(world.resource::<ObjectSelection>().selectable_count(), 1);
    assert_eq!(world.resource::<CurrentMapFile>().path, Some(path.clone()));
    assert!(!world.resource::<MapDirtyState>().is_dirty);
    assert!(world.resource::<MapLoadError>().message.is_none());

    let report = world.resource::<LastLoadReport>().report.clone().unwrap();
    assert_eq!(report.skipped_indices(), vec![2]);
    assert_eq!(last_map_paths(&app), vec![path.clone()]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_missing_file_sets_error() {
    let mut app = persistence_app();
    app.world_mut().write_message(ImportScriptRequest {
        script: "spawnpoint,titan,0,0,0,0,0,0,1;".to_string(),
    });
    app.update();

    app.world_mut().write_message(LoadMapRequest {
        path: temp_path("does_not_exist.txt"),
    });
    wait_until_idle(&mut app);

    let world = app.world();
    assert!(world.resource::<MapLoadError>().message.is_some());
    // The current map is untouched
    assert_eq!(world.resource::<MapDocument>().len(), 1);
    assert!(world.resource::<CurrentMapFile>().path.is_none());
}

#[test]
fn test_save_writes_export_and_clears_dirty() {
    let path = temp_path("save.txt");
    let mut app = persistence_app();
    app.world_mut().write_message(ImportScriptRequest {
        script: SCRIPT.to_string(),
    });
    app.update();
    assert!(app.world().resource::<MapDirtyState>().is_dirty);

    app.world_mut().write_message(SaveMapRequest { path: path.clone() });
    wait_until_idle(&mut app);
    app.update();

    let world = app.world();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, world.resource::<MapDocument>().export());
    assert_eq!(written, "map,disablebounds;\nspawnpoint,titan,1,2,3,0,0,0,1;\n");
    assert!(!world.resource::<MapDirtyState>().is_dirty);
    assert!(world.resource::<MapSaveError>().message.is_none());
    assert_eq!(world.resource::<CurrentMapFile>().path, Some(path.clone()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_edit_after_save_marks_dirty() {
    let path = temp_path("dirty.txt");
    let mut app = persistence_app();
    app.world_mut().write_message(ImportScriptRequest {
        script: "spawnpoint,titan,0,0,0,0,0,0,1;".to_string(),
    });
    app.update();
    app.world_mut().write_message(SaveMapRequest { path: path.clone() });
    wait_until_idle(&mut app);
    app.update();
    assert!(!app.world().resource::<MapDirtyState>().is_dirty);

    translate_everything(&mut app, Vec3::Y);
    app.update();
    assert!(app.world().resource::<MapDirtyState>().is_dirty);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_new_map_resets_everything() {
    let mut app = persistence_app();
    app.world_mut().write_message(ImportScriptRequest {
        script: SCRIPT.to_string(),
    });
    app.update();
    translate_everything(&mut app, Vec3::Z);
    app.world_mut().resource_mut::<CurrentMapFile>().path = Some(PathBuf::from("old.txt"));

    app.world_mut().write_message(NewMapRequest);
    app.update();

    let world = app.world();
    assert!(world.resource::<MapDocument>().is_empty());
    assert!(!world.resource::<MapDocument>().bounds_disabled());
    assert!(!world.resource::<CommandHistory>().can_undo());
    assert_eq!(world.resource::<ObjectSelection>().selectable_count(), 0);
    assert!(world.resource::<CurrentMapFile>().path.is_none());
    assert!(!world.resource::<MapDirtyState>().is_dirty);
    assert_eq!(world.resource::<AssetLibrary>().live_count(), 0);
}

#[test]
fn test_import_appends_and_keeps_history() {
    let mut app = persistence_app();
    app.world_mut().write_message(ImportScriptRequest {
        script: "spawnpoint,titan,0,0,0,0,0,0,1;".to_string(),
    });
    app.update();
    translate_everything(&mut app, Vec3::X);

    app.world_mut().write_message(ImportScriptRequest {
        script: "spawnpoint,titan,5,0,0,0,0,0,1;".to_string(),
    });
    app.update();

    let world = app.world();
    assert_eq!(world.resource::<MapDocument>().len(), 2);
    assert!(world.resource::<CommandHistory>().can_undo());
    let report = world.resource::<LastLoadReport>().report.clone().unwrap();
    assert_eq!(report.loaded.len(), 1);
}
