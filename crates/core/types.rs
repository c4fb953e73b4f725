//! Point and coordinate types.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Values are not range checked; anything that is not a valid position on
/// the globe simply fails to match nearby searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite and inside the usual degree ranges.
    #[inline]
    pub fn is_on_globe(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Convert into a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn to_geo(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// A geo-tagged point of interest.
///
/// Points are immutable once created. The dataset field is called `hotelId`
/// in the bundled data; `id` is accepted as well.
///
/// # Examples
///
/// ```
/// use geo_nearby::Point;
///
/// let point = Point::new("H1", 40.0, -73.0);
/// assert_eq!(point.id(), "H1");
/// assert_eq!(point.coordinate().lat, 40.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "hotelId", alias = "id")]
    id: String,
    lat: f64,
    lon: f64,
}

impl Point {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}
