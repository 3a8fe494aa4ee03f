//! The map document and its text format.
//!
//! - [`codec`] - parsing and serializing single records
//! - [`persistence`] - async file load/save of map scripts

mod category;
pub mod codec;
mod document;
mod error;
mod map_object;
pub mod persistence;


pub use category::ObjectCategory;
pub use codec::{parse_record, serialize_record, ParsedRecord};
pub use document::{LoadReport, MapDocument, PlacedObject, SkippedRecord};
pub use error::{LoadError, MalformedRecordError};
pub use map_object::{MapObject, ObjectId};
pub use persistence::{
    AsyncMapOperation, CurrentMapFile, ImportScriptRequest, LastLoadReport, LoadMapRequest,
    MapDirtyState, MapLoadError, MapSaveError, NewMapRequest, SaveMapRequest,
};

use bevy::prelude::*;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapDocument>()
            .init_resource::<MapLoadError>()
            .init_resource::<MapSaveError>()
            .init_resource::<CurrentMapFile>()
            .init_resource::<MapDirtyState>()
            .init_resource::<LastLoadReport>()
            .init_resource::<AsyncMapOperation>()
            .add_message::<SaveMapRequest>()
            .add_message::<LoadMapRequest>()
            .add_message::<NewMapRequest>()
            .add_message::<ImportScriptRequest>()
            .add_systems(Startup, persistence::ensure_maps_directory)
            .add_systems(
                Update,
                (
                    persistence::save_map_system.run_if(on_message::<SaveMapRequest>),
                    persistence::load_map_system.run_if(on_message::<LoadMapRequest>),
                    persistence::new_map_system.run_if(on_message::<NewMapRequest>),
                    persistence::import_script_system.run_if(on_message::<ImportScriptRequest>),
                    persistence::poll_save_tasks,
                    persistence::poll_load_tasks,
                    persistence::detect_document_changes,
                )
                    .chain(),
            );
    }
}
