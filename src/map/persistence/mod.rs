//! Map persistence for saving and loading map scripts.
//!
//! File I/O runs on the [`IoTaskPool`](bevy::tasks::IoTaskPool); tasks are
//! polled once per tick and the script is parsed on the main tick.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for map operations
//! - [`resources`] - Resource types for state tracking
//! - [`results`] - Result types for async operations
//! - [`helpers`] - Directory creation and display names
//! - [`save`] - Save system and task polling
//! - [`load`] - Load and import systems, task polling
//! - [`map_state`] - New map system
//! - [`dirty`] - Dirty state detection

mod dirty;
mod helpers;
mod load;
mod map_state;
mod messages;
mod resources;
mod results;
mod save;

#[cfg(test)]
mod tests;

// Re-exports - Messages
pub use messages::{ImportScriptRequest, LoadMapRequest, NewMapRequest, SaveMapRequest};

// Re-exports - Resources
pub use resources::{
    AsyncMapOperation, CurrentMapFile, LastLoadReport, MapDirtyState, MapLoadError, MapSaveError,
};

// Re-exports - Helpers
pub use helpers::ensure_maps_directory;

// Re-exports - Systems
pub use dirty::detect_document_changes;
pub use load::{import_script_system, load_map_system, poll_load_tasks};
pub use map_state::new_map_system;
pub use save::{poll_save_tasks, save_map_system};
