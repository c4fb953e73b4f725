//! R-tree index over (longitude, latitude).

use super::bounds::SearchArea;
use super::{Hit, IndexStats, SpatialIndex, probe, rank, resolve};
use crate::config::IndexKind;
use crate::types::{Coordinate, Point};
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

/// Tree entry: `[lon, lat]` tagged with the point's ordinal.
type Entry = GeomWithData<[f64; 2], usize>;

/// Static index backed by a bulk-loaded `rstar::RTree`.
///
/// The tree stores planar `[lon, lat]` positions, so it only answers the
/// window prefilter; exact distances are always haversine.
#[derive(Debug, Clone)]
pub struct RTreeIndex {
    points: Vec<Point>,
    tree: RTree<Entry>,
    overflow: Vec<usize>,
}

impl SpatialIndex for RTreeIndex {
    fn build(points: Vec<Point>) -> Self {
        let mut entries = Vec::with_capacity(points.len());
        let mut overflow = Vec::new();

        for (ordinal, point) in points.iter().enumerate() {
            if point.coordinate().is_on_globe() {
                entries.push(Entry::new([point.lon(), point.lat()], ordinal));
            } else {
                log::warn!(
                    "Point {} at ({}, {}) is off the globe, scanning it on every query",
                    point.id(),
                    point.lat(),
                    point.lon()
                );
                overflow.push(ordinal);
            }
        }

        let tree = RTree::bulk_load(entries);
        log::debug!(
            "Built r-tree index over {} points, {} overflow",
            points.len(),
            overflow.len()
        );

        Self {
            points,
            tree,
            overflow,
        }
    }

    fn k_nearest(
        &self,
        center: Coordinate,
        max_results: Option<usize>,
        max_radius_km: f64,
        predicate: &dyn Fn(&Point) -> bool,
    ) -> Vec<&Point> {
        if max_results == Some(0) {
            return Vec::new();
        }

        let mut hits: Vec<Hit> = Vec::new();
        let mut measure = |ordinal: usize| {
            if let Some(hit) = probe(
                center,
                &self.points[ordinal],
                ordinal,
                max_radius_km,
                predicate,
            ) {
                hits.push(hit);
            }
        };

        match SearchArea::around(center, max_radius_km) {
            SearchArea::Nowhere => return Vec::new(),
            SearchArea::Everywhere => self.tree.iter().for_each(|e| measure(e.data)),
            SearchArea::Window(window) => {
                for &(lo, hi) in &window.lon_ranges {
                    let envelope =
                        AABB::from_corners([lo, window.min_lat], [hi, window.max_lat]);
                    self.tree
                        .locate_in_envelope(&envelope)
                        .for_each(|e| measure(e.data));
                }
            }
        }
        self.overflow.iter().for_each(|&ordinal| measure(ordinal));

        resolve(&self.points, rank(hits, max_results))
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            kind: IndexKind::RTree,
            points: self.points.len(),
            buckets: None,
            overflow: self.overflow.len(),
        }
    }
}
