//! Map load system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::UpdateLastMapPathRequest;
use crate::editor::EditState;

use super::helpers::display_name;
use super::messages::{ImportScriptRequest, LoadMapRequest};
use super::resources::{
    AsyncMapOperation, CurrentMapFile, LastLoadReport, LoadMapTask, MapDirtyState, MapLoadError,
};
use super::results::LoadResult;

/// Starts an async load operation (file I/O only)
pub fn load_map_system(
    mut commands: Commands,
    mut events: MessageReader<LoadMapRequest>,
    mut async_op: ResMut<AsyncMapOperation>,
) {
    for event in events.read() {
        // Don't start a new load if one is already in progress
        if async_op.is_busy() {
            warn!("Map operation already in progress, ignoring load of {:?}", event.path);
            continue;
        }

        let path = event.path.clone();
        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", display_name(&path)));

        let task = IoTaskPool::get().spawn(async move {
            match std::fs::read_to_string(&path) {
                Ok(script) => LoadResult {
                    path,
                    script: Some(script),
                    error: None,
                },
                Err(e) => LoadResult {
                    path,
                    script: None,
                    error: Some(format!("Failed to read map file: {}", e)),
                },
            }
        });

        commands.spawn(LoadMapTask(task));
    }
}

/// Polls load tasks and replaces the document once the file has been read
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadMapTask)>,
    mut async_op: ResMut<AsyncMapOperation>,
    mut edit: EditState,
    mut load_error: ResMut<MapLoadError>,
    mut current_map_file: ResMut<CurrentMapFile>,
    mut config_events: MessageWriter<UpdateLastMapPathRequest>,
    mut dirty_state: ResMut<MapDirtyState>,
    mut last_report: ResMut<LastLoadReport>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        async_op.is_loading = false;
        async_op.operation_description = None;
        load_error.message = None;

        if let Some(error) = result.error {
            error!("{}", error);
            load_error.message = Some(error);
            continue;
        }

        let Some(script) = result.script else {
            continue;
        };

        let (history, ctx) = edit.split();
        ctx.document.reset(ctx.catalog, ctx.selection);
        history.clear();
        let report = ctx.document.load(&script, ctx.catalog, ctx.selection);

        if !report.is_clean() {
            warn!(
                "Map {:?} loaded with skipped records {:?}",
                result.path,
                report.skipped_indices()
            );
        }
        info!("Map loaded from {:?}", result.path);

        current_map_file.path = Some(result.path.clone());
        config_events.write(UpdateLastMapPathRequest { path: result.path });
        dirty_state.mark_clean(edit.document.revision());
        last_report.report = Some(report);
    }
}

/// Appends pasted script text to the current map. Runs synchronously.
pub fn import_script_system(
    mut events: MessageReader<ImportScriptRequest>,
    mut edit: EditState,
    mut last_report: ResMut<LastLoadReport>,
) {
    for event in events.read() {
        let (_, ctx) = edit.split();
        let report = ctx.document.load(&event.script, ctx.catalog, ctx.selection);
        info!(
            "Imported {} objects ({} records skipped)",
            report.loaded.len(),
            report.skipped.len()
        );
        last_report.report = Some(report);
    }
}
