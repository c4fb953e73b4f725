//! Brute-force index.
//!
//! Measures every point on every query. Used as the reference the pruned
//! strategies are tested against, and perfectly adequate for small datasets.

use super::{Hit, IndexStats, SpatialIndex, probe, rank, resolve};
use crate::config::IndexKind;
use crate::types::{Coordinate, Point};

#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    points: Vec<Point>,
}

impl SpatialIndex for LinearIndex {
    fn build(points: Vec<Point>) -> Self {
        log::debug!("Built linear index over {} points", points.len());
        Self { points }
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

        let hits: Vec<Hit> = self
            .points
            .iter()
            .enumerate()
            .filter_map(|(ordinal, point)| {
                probe(center, point, ordinal, max_radius_km, predicate)
            })
            .collect();

        resolve(&self.points, rank(hits, max_results))
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            kind: IndexKind::Linear,
            points: self.points.len(),
            buckets: None,
            overflow: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::spatial::accept_all;

    fn ids<'a>(points: &[&'a Point]) -> Vec<&'a str> {
        points.iter().map(|p| p.id()).collect()
    }

    fn sample() -> LinearIndex {
        LinearIndex::build(vec![
            Point::new("H1", 40.0, -73.0),
            Point::new("H2", 40.01, -73.01),
            Point::new("H3", 10.0, 10.0),
        ])
    }

    #[test]
    fn test_empty_index() {
        let index = LinearIndex::build(Vec::new());
        assert!(index.is_empty());
        let found = index.k_nearest(Coordinate::new(0.0, 0.0), None, 1e9, &accept_all);
        assert!(found.is_empty());
    }

    #[test]
    fn test_radius_and_order() {
        let index = sample();
        let found = index.k_nearest(Coordinate::new(40.0, -73.0), None, 10.0, &accept_all);
        assert_eq!(ids(&found), vec!["H1", "H2"]);
    }

    #[test]
    fn test_zero_radius_matches_exact_point() {
        let index = sample();
        let found = index.k_nearest(Coordinate::new(40.0, -73.0), None, 0.0, &accept_all);
        assert_eq!(ids(&found), vec!["H1"]);
    }

    #[test]
    fn test_zero_results() {
        let index = sample();
        let found = index.k_nearest(Coordinate::new(40.0, -73.0), Some(0), 1e9, &accept_all);
        assert!(found.is_empty());
    }

    #[test]
    fn test_predicate_filters() {
        let index = sample();
        let found = index.k_nearest(Coordinate::new(40.0, -73.0), None, 10.0, &|p: &Point| {
            p.id() != "H1"
        });
        assert_eq!(ids(&found), vec!["H2"]);
    }

    #[test]
    fn test_duplicates_keep_insertion_order() {
        let index = LinearIndex::build(vec![
            Point::new("b", 1.0, 1.0),
            Point::new("a", 1.0, 1.0),
            Point::new("b", 1.0, 1.0),
        ]);
        let found = index.k_nearest(Coordinate::new(1.0, 1.0), None, 1.0, &accept_all);
        assert_eq!(ids(&found), vec!["b", "a", "b"]);
        assert!(std::ptr::eq(found[0], &index.points[0]));
        assert!(std::ptr::eq(found[2], &index.points[2]));
    }
}
