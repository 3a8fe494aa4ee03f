//! Selection tool module for the editor.
//!
//! This module handles all selection-related functionality including:
//! - The selectable/selected sets and their running centroid
//! - Click picking and box selection
//! - Outline and tool handle feedback
//! - Keyboard shortcuts for selected objects

mod drag_select;
mod feedback;
mod object_selection;
mod picking;
mod shortcuts;


// Re-export public items
pub use drag_select::{
    screen_bounds, DragSelect, DragSelectInput, DragSelectMode, ScreenProjection, ViewProjection,
    handle_drag_select,
};
pub use feedback::{apply_selection_events, sync_selection_feedback, OutlineRenderer, OutlineState};
pub use object_selection::{ObjectSelection, SelectionEvent};
pub use picking::{handle_pick_requests, pick_command, PickRequest};
pub use shortcuts::{handle_deletion, handle_invert_selection, handle_select_all};
