//! Result types for async map operations.

use std::path::PathBuf;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async load operation. Parsing happens on the main tick.
pub struct LoadResult {
    pub path: PathBuf,
    pub script: Option<String>,
    pub error: Option<String>,
}
