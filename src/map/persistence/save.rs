//! Map save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::UpdateLastMapPathRequest;
use crate::map::MapDocument;

use super::helpers::display_name;
use super::messages::SaveMapRequest;
use super::resources::{
    AsyncMapOperation, CurrentMapFile, MapDirtyState, MapSaveError, SaveMapTask,
};
use super::results::SaveResult;

/// Starts an async save operation
pub fn save_map_system(
    mut commands: Commands,
    mut events: MessageReader<SaveMapRequest>,
    document: Res<MapDocument>,
    mut async_op: ResMut<AsyncMapOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Map operation already in progress, ignoring save to {:?}", event.path);
            continue;
        }

        let script = document.export();
        let path = event.path.clone();
        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", display_name(&path)));

        let task = IoTaskPool::get().spawn(async move {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                return SaveResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to create directory: {}", e)),
                };
            }

            match std::fs::write(&path, script) {
                Ok(()) => SaveResult {
                    path,
                    success: true,
                    error: None,
                },
                Err(e) => SaveResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to write file: {}", e)),
                },
            }
        });

        commands.spawn(SaveMapTask {
            task,
            revision: document.revision(),
        });
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveMapTask)>,
    mut async_op: ResMut<AsyncMapOperation>,
    mut current_map_file: ResMut<CurrentMapFile>,
    mut config_events: MessageWriter<UpdateLastMapPathRequest>,
    mut dirty_state: ResMut<MapDirtyState>,
    mut save_error: ResMut<MapSaveError>,
    document: Res<MapDocument>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        async_op.is_saving = false;
        async_op.operation_description = None;

        if result.success {
            info!("Map saved to {:?}", result.path);
            save_error.message = None;

            current_map_file.path = Some(result.path.clone());
            config_events.write(UpdateLastMapPathRequest { path: result.path });

            // Edits made while the file was being written stay dirty
            dirty_state.mark_clean(task.revision);
            dirty_state.refresh(&document);
        } else if let Some(error) = result.error {
            error!("{}", error);
            save_error.message = Some(error);
        }
    }
}
