//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Minimum number of comma-separated fields in an object record
pub const MIN_RECORD_FIELDS: usize = 9;

/// Texture name that means "keep the mesh's own material"
pub const DEFAULT_TEXTURE: &str = "default";

/// Default number of commands kept for undo
pub const MAX_HISTORY_SIZE: usize = 100;

/// Pointer travel in pixels before a click becomes a drag selection
pub const DEFAULT_DRAG_SELECT_DEADZONE: f32 = 5.0;

/// Maximum number of recent maps to remember in config
pub const MAX_RECENT_MAPS: usize = 5;

/// Upper bound on app ticks the headless runner waits for a file operation
pub const MAX_IO_WAIT_TICKS: usize = 10_000;

/// Tolerance used when comparing positions derived from incremental sums
pub const POSITION_EPSILON: f32 = 1e-4;
