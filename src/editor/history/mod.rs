//! Undo/Redo system for editor actions.
//!
//! Every reversible editor operation (selection changes, transforms,
//! deletion and paste) is an [`EditCommand`] kept in the [`CommandHistory`].
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//!
//! ## Module Structure
//!
//! - [`commands`] - EditCommand enum and its constructors
//! - [`execute`] - apply/revert for each command
//! - [`context`] - EditContext and the EditState system parameter
//! - [`command_history`] - CommandHistory resource with a cursor
//! - [`systems`] - Bevy systems for keyboard shortcuts

mod command_history;
mod commands;
mod context;
mod execute;
mod systems;

#[cfg(test)]
mod tests;

// Re-exports
pub use command_history::{CommandHistory, EmptyHistoryError};
pub use commands::EditCommand;
pub use context::{EditContext, EditState};
pub use systems::{handle_redo, handle_undo};
