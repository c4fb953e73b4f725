//! Distance math and spatial indexing.

pub mod distance;
pub mod spatial;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
