//! Errors raised while reading map scripts.

use thiserror::Error;

use crate::assets::UnknownAssetError;

/// A record that cannot be turned into a map object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRecordError {
    #[error("too few elements in object script: found {found}, expected {expected}")]
    TooFewFields { found: usize, expected: usize },
    #[error("field {index} ('{value}') is not a number")]
    InvalidNumber { index: usize, value: String },
    #[error("unknown object type '{0}'")]
    UnknownCategory(String),
    #[error("unknown map directive '{0}'")]
    UnknownDirective(String),
}

/// Why a single record was skipped during a load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
    #[error(transparent)]
    UnknownAsset(#[from] UnknownAssetError),
}
