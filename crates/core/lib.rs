//! Static in-memory spatial index answering "what is near this coordinate".
//!
//! Points are bulk-loaded once into a [`SpatialIndex`] and queried with a
//! radius bound, a result cap and a predicate. [`NearbyService`] wraps an
//! index with input validation for request handlers.
//!
//! ```rust
//! use geo_nearby::{Coordinate, IndexKind, Point, SpatialIndex, accept_all};
//!
//! let index = IndexKind::Geohash.build(vec![
//!     Point::new("H1", 40.0, -73.0),
//!     Point::new("H2", 40.01, -73.01),
//!     Point::new("H3", 10.0, 10.0),
//! ]);
//!
//! let nearby = index.k_nearest(Coordinate::new(40.0, -73.0), None, 10.0, &accept_all);
//! assert_eq!(nearby.len(), 2);
//! assert_eq!(nearby[0].id(), "H1");
//! ```

pub mod compute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod service;
pub mod types;

pub use compute::distance::{EARTH_RADIUS_KM, haversine_km};
pub use compute::spatial::{
    GeohashIndex, IndexStats, LinearIndex, RTreeIndex, SpatialIndex, accept_all,
};
pub use config::{DEFAULT_GEOHASH_PRECISION, IndexKind, MAX_SEARCH_RADIUS_KM, SearchConfig};
pub use dataset::{load_points, parse_points};
pub use error::{DatasetError, ParseIndexKindError, Result, ValidationError};
pub use service::{NearbyResponse, NearbyService};
pub use types::{Coordinate, Point};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        Coordinate, IndexKind, NearbyService, Point, SearchConfig, SpatialIndex, accept_all,
    };
}
