//! Command history resource for tracking undo/redo state.

use bevy::prelude::*;
use thiserror::Error;

use super::commands::EditCommand;
use super::context::EditContext;
use crate::constants::MAX_HISTORY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmptyHistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Resource tracking command history for undo/redo.
///
/// Commands before `cursor` are applied; commands at or after it were undone
/// and are dropped as soon as a new command is recorded.
#[derive(Resource, Debug)]
pub struct CommandHistory {
    commands: Vec<EditCommand>,
    cursor: usize,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(MAX_HISTORY_SIZE)
    }
}

impl CommandHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Apply a command and record it.
    pub fn execute(&mut self, command: EditCommand, ctx: &mut EditContext) {
        command.apply(ctx);
        self.record(command);
    }

    /// Record a command whose effect has already been applied.
    pub fn record(&mut self, command: EditCommand) {
        debug!("Recording edit: {}", command.description());

        // Clear the redo branch when a new action is performed
        self.commands.truncate(self.cursor);
        self.commands.push(command);
        self.cursor = self.commands.len();

        self.enforce_limit();
    }

    /// Revert the most recently applied command.
    pub fn undo(&mut self, ctx: &mut EditContext) -> Result<(), EmptyHistoryError> {
        if self.cursor == 0 {
            return Err(EmptyHistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        let command = &self.commands[self.cursor];
        debug!("Undo: {}", command.description());
        command.revert(ctx);
        Ok(())
    }

    /// Re-apply the most recently undone command.
    pub fn redo(&mut self, ctx: &mut EditContext) -> Result<(), EmptyHistoryError> {
        let Some(command) = self.commands.get(self.cursor) else {
            return Err(EmptyHistoryError::NothingToRedo);
        };
        debug!("Redo: {}", command.description());
        command.apply(ctx);
        self.cursor += 1;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// The command the next undo would revert
    pub fn last_applied(&self) -> Option<&EditCommand> {
        self.cursor.checked_sub(1).and_then(|index| self.commands.get(index))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the capacity, dropping the oldest commands if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.enforce_limit();
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    fn enforce_limit(&mut self) {
        let excess = self.commands.len().saturating_sub(self.limit);
        if excess == 0 {
            return;
        }
        // Oldest applied commands go first, then the far end of the redo branch
        let from_front = excess.min(self.cursor);
        self.commands.drain(..from_front);
        self.cursor -= from_front;
        self.commands.truncate(self.limit);
    }
}
