//! Great-circle distance.

use crate::types::Coordinate;
use geo::{Distance, Haversine};

/// Mean Earth radius in kilometers, the sphere `geo::Haversine` measures on.
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// Haversine distance between two coordinates, in kilometers.
///
/// Non-finite input yields `NaN`, which never compares as within any radius.
///
/// # Examples
///
/// ```
/// use geo_nearby::{Coordinate, haversine_km};
///
/// let nyc = Coordinate::new(40.7128, -74.0060);
/// let la = Coordinate::new(34.0522, -118.2437);
/// let distance = haversine_km(nyc, la);
/// assert!(distance > 3_900.0 && distance < 4_000.0);
/// ```
#[inline]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(a.to_geo(), b.to_geo()) / 1_000.0
}
