//! Nearby-search request handling.
//!
//! [`NearbyService`] validates raw query input, runs the search against a
//! shared index, and shapes the response. It holds no mutable state, so a
//! clone can be handed to every request handler.

use crate::compute::spatial::{SpatialIndex, accept_all};
use crate::config::SearchConfig;
use crate::error::ValidationError;
use crate::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifiers of the points near a query, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResponse {
    #[serde(default)]
    pub hotel_ids: Vec<String>,
}

#[derive(Clone)]
pub struct NearbyService {
    index: Arc<dyn SpatialIndex>,
    config: SearchConfig,
}

impl NearbyService {
    /// Serve searches with the default limits (10km, no result cap).
    pub fn new(index: Arc<dyn SpatialIndex>) -> Self {
        Self::with_config(index, SearchConfig::default())
    }

    pub fn with_config(index: Arc<dyn SpatialIndex>, config: SearchConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &dyn SpatialIndex {
        self.index.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Parse `raw_lat`/`raw_lon` and search around them.
    ///
    /// Latitude is checked first. Values are not range checked; an off-globe
    /// coordinate just finds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_nearby::{IndexKind, NearbyService, Point, ValidationError};
    ///
    /// let index = IndexKind::Geohash.build(vec![Point::new("H1", 40.0, -73.0)]);
    /// let service = NearbyService::new(index);
    ///
    /// assert_eq!(service.handle_nearby("40.0", "-73.0")?.hotel_ids, ["H1"]);
    /// assert_eq!(
    ///     service.handle_nearby("abc", "-73.0"),
    ///     Err(ValidationError::InvalidLatitude)
    /// );
    /// # Ok::<(), ValidationError>(())
    /// ```
    pub fn handle_nearby(
        &self,
        raw_lat: &str,
        raw_lon: &str,
    ) -> Result<NearbyResponse, ValidationError> {
        let lat = parse_degrees(raw_lat).ok_or(ValidationError::InvalidLatitude)?;
        let lon = parse_degrees(raw_lon).ok_or(ValidationError::InvalidLongitude)?;

        Ok(NearbyResponse {
            hotel_ids: self.nearby(Coordinate::new(lat, lon)),
        })
    }

    /// Identifiers of points near `center`, nearest first.
    pub fn nearby(&self, center: Coordinate) -> Vec<String> {
        self.index
            .k_nearest(
                center,
                self.config.max_results,
                self.config.max_radius_km,
                &accept_all,
            )
            .into_iter()
            .map(|point| point.id().to_string())
            .collect()
    }
}

/// Parse a decimal number. Literal `inf`/`nan` are accepted, but a finite
/// literal too large for `f64` (`1e400`) is rejected rather than read as
/// infinity.
fn parse_degrees(raw: &str) -> Option<f64> {
    let value: f64 = raw.parse().ok()?;
    if value.is_infinite() {
        let digits = raw.trim_start_matches(['+', '-']);
        if !digits.get(..3)?.eq_ignore_ascii_case("inf") {
            return None;
        }
    }
    Some(value)
}

impl std::fmt::Debug for NearbyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearbyService")
            .field("index", &self.index.stats())
            .field("config", &self.config)
            .finish()
    }
}
