//! Loading points from JSON.
//!
//! The dataset is a JSON array of `{"hotelId": "...", "lat": .., "lon": ..}`
//! records (`id` is accepted in place of `hotelId`).

use crate::error::{DatasetError, Result};
use crate::types::Point;
use std::path::Path;

/// Parse a dataset already in memory.
pub fn parse_points(bytes: &[u8]) -> Result<Vec<Point>> {
    let points: Vec<Point> = serde_json::from_slice(bytes)?;
    log::debug!("Parsed {} points", points.len());
    Ok(points)
}

/// Read and parse a dataset file.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(&bytes)
}
