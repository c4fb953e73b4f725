//! # Static spatial indexes for radius-bounded KNN
//!
//! Every index is built once from a fixed set of [`Point`]s and answers
//! [`SpatialIndex::k_nearest`] with exactly the same result as a brute-force
//! scan: points within the radius that pass the predicate, nearest first,
//! ties broken by insertion order, truncated to the result cap.
//!
//! | Strategy         | Pruning                                   |
//! |------------------|-------------------------------------------|
//! | [`LinearIndex`]  | none, reference implementation            |
//! | [`GeohashIndex`] | geohash buckets under the search window   |
//! | [`RTreeIndex`]   | R-tree envelope query over the window     |
//!
//! The pruned strategies first compute a latitude/longitude window that
//! encloses the search circle (split at the antimeridian, widened to all
//! longitudes near a pole), then measure exact haversine distances only for
//! points under that window. Points that cannot be placed in the structure
//! (non-finite or out-of-range coordinates) are kept aside and measured on
//! every query.
//!
//! ## Examples
//!
//! ```rust
//! use geo_nearby::{Coordinate, GeohashIndex, Point, SpatialIndex, accept_all};
//!
//! let index = GeohashIndex::build(vec![
//!     Point::new("H1", 40.0, -73.0),
//!     Point::new("H2", 40.01, -73.01),
//!     Point::new("H3", 10.0, 10.0),
//! ]);
//!
//! let nearby = index.k_nearest(Coordinate::new(40.0, -73.0), None, 10.0, &accept_all);
//! let ids: Vec<&str> = nearby.iter().map(|p| p.id()).collect();
//! assert_eq!(ids, ["H1", "H2"]);
//! ```

mod bounds;
pub mod geohash_grid;
pub mod linear;
pub mod rtree;

pub use geohash_grid::GeohashIndex;
pub use linear::LinearIndex;
pub use rtree::RTreeIndex;

use crate::compute::distance::haversine_km;
use crate::config::IndexKind;
use crate::types::{Coordinate, Point};
use serde::Serialize;
use std::cmp::Ordering;

/// An immutable set of points answering nearest-neighbor queries.
///
/// Implementations hold no interior mutability, so a built index can be
/// shared across threads behind an `Arc` without locking.
pub trait SpatialIndex: Send + Sync {
    /// Build the index. Never fails; duplicate ids are all kept.
    fn build(points: Vec<Point>) -> Self
    where
        Self: Sized;

    /// Points within `max_radius_km` of `center` accepted by `predicate`,
    /// nearest first, at most `max_results` of them (`None` for no cap).
    fn k_nearest(
        &self,
        center: Coordinate,
        max_results: Option<usize>,
        max_radius_km: f64,
        predicate: &dyn Fn(&Point) -> bool,
    ) -> Vec<&Point>;

    /// Number of indexed points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> IndexStats;
}

/// Predicate admitting every point.
pub fn accept_all(_: &Point) -> bool {
    true
}

/// Shape of a built index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub kind: IndexKind,
    /// Total number of indexed points
    pub points: usize,
    /// Non-empty buckets, for strategies that bucket
    pub buckets: Option<usize>,
    /// Points kept outside the structure and scanned on every query
    pub overflow: usize,
}

/// A point that passed the radius and predicate checks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hit {
    pub distance_km: f64,
    pub ordinal: usize,
}

impl Hit {
    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.distance_km
            .total_cmp(&other.distance_km)
            .then(self.ordinal.cmp(&other.ordinal))
    }
}

/// Measure one point and keep it if it qualifies.
#[inline]
pub(crate) fn probe(
    center: Coordinate,
    point: &Point,
    ordinal: usize,
    max_radius_km: f64,
    predicate: &dyn Fn(&Point) -> bool,
) -> Option<Hit> {
    let distance_km = haversine_km(center, point.coordinate());
    (distance_km <= max_radius_km && predicate(point)).then_some(Hit {
        distance_km,
        ordinal,
    })
}

/// Order hits nearest first and apply the result cap.
pub(crate) fn rank(mut hits: Vec<Hit>, max_results: Option<usize>) -> Vec<Hit> {
    if let Some(k) = max_results
        && k < hits.len()
    {
        if k > 0 {
            hits.select_nth_unstable_by(k - 1, Hit::order);
        }
        hits.truncate(k);
    }
    hits.sort_unstable_by(Hit::order);
    hits
}

/// Resolve ranked hits back to the points they refer to.
pub(crate) fn resolve(points: &[Point], hits: Vec<Hit>) -> Vec<&Point> {
    hits.into_iter().map(|hit| &points[hit.ordinal]).collect()
}
