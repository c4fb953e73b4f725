//! Search and index configuration.

use crate::compute::spatial::{GeohashIndex, LinearIndex, RTreeIndex, SpatialIndex};
use crate::error::ParseIndexKindError;
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Radius of a nearby search, in kilometers.
pub const MAX_SEARCH_RADIUS_KM: f64 = 10.0;

/// Geohash precision used when none is given (cells of roughly 4.9km x 4.9km).
pub const DEFAULT_GEOHASH_PRECISION: usize = 5;

/// Limits applied to every nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Points farther than this are never returned.
    pub max_radius_km: f64,
    /// Maximum number of results; `None` means no cap.
    pub max_results: Option<usize>,
}

impl SearchConfig {
    pub fn with_max_radius_km(mut self, radius_km: f64) -> Self {
        self.max_radius_km = radius_km;
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_radius_km: MAX_SEARCH_RADIUS_KM,
            max_results: None,
        }
    }
}

/// Strategy used to back a [`SpatialIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Brute-force scan.
    Linear,
    /// Geohash-bucketed grid.
    #[default]
    Geohash,
    /// R-tree with a bounding-box prefilter.
    #[serde(rename = "rtree")]
    RTree,
}

impl IndexKind {
    /// Build an index of this kind over `points`.
    pub fn build(self, points: Vec<Point>) -> Arc<dyn SpatialIndex> {
        match self {
            Self::Linear => Arc::new(LinearIndex::build(points)),
            Self::Geohash => Arc::new(GeohashIndex::build(points)),
            Self::RTree => Arc::new(RTreeIndex::build(points)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Geohash => "geohash",
            Self::RTree => "rtree",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = ParseIndexKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "brute-force" => Ok(Self::Linear),
            "geohash" | "grid" => Ok(Self::Geohash),
            "rtree" | "r-tree" => Ok(Self::RTree),
            _ => Err(ParseIndexKindError(s.to_string())),
        }
    }
}
