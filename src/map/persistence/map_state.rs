//! New map handling.

use bevy::prelude::*;

use crate::editor::EditState;

use super::messages::NewMapRequest;
use super::resources::{CurrentMapFile, LastLoadReport, MapDirtyState};

pub fn new_map_system(
    mut events: MessageReader<NewMapRequest>,
    mut edit: EditState,
    mut current_map_file: ResMut<CurrentMapFile>,
    mut dirty_state: ResMut<MapDirtyState>,
    mut last_report: ResMut<LastLoadReport>,
) {
    for _ in events.read() {
        let (history, ctx) = edit.split();
        ctx.document.reset(ctx.catalog, ctx.selection);
        history.clear();

        current_map_file.path = None;
        last_report.report = None;
        dirty_state.mark_clean(edit.document.revision());
        info!("Started a new map");
    }
}
