//! Error types for geo-nearby.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for dataset and index construction.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Rejected query input. Surfaced to callers as a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid latitude")]
    InvalidLatitude,
    #[error("invalid longitude")]
    InvalidLongitude,
}

/// The dataset could not be loaded, so no index can be built.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Unknown index strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown index kind `{0}` (expected one of: linear, geohash, rtree)")]
pub struct ParseIndexKindError(pub String);
