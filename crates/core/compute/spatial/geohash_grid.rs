//! Geohash-bucketed grid index.
//!
//! Points are grouped by their geohash at a fixed precision. A geohash of
//! `p` characters is a cell of a regular grid with `2^ceil(5p/2)` columns and
//! `2^floor(5p/2)` rows, so the buckets under a search window can be listed
//! by row and column and looked up by the geohash of each cell's center.
//!
//! ```text
//! GeohashIndex (precision 5)
//! ├─ cells: FxHashMap<String, Vec<usize>>
//! │  ├─ "dr5re" -> [0, 4, 9]
//! │  └─ "dr5rs" -> [1]
//! ├─ overflow: [7]      // lat 95.0: not on the globe
//! └─ points: Vec<Point> // ordinals index into this
//! ```

use super::bounds::{SearchArea, Window};
use super::{Hit, IndexStats, SpatialIndex, probe, rank, resolve};
use crate::config::{DEFAULT_GEOHASH_PRECISION, IndexKind};
use crate::types::{Coordinate, Point};
use geohash::encode;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Uniform grid matching the geohash cells of one precision.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellGrid {
    rows: usize,
    cols: usize,
    cell_height: f64,
    cell_width: f64,
}

impl CellGrid {
    fn for_precision(precision: usize) -> Self {
        let bits = 5 * precision;
        let cols = 1usize << bits.div_ceil(2);
        let rows = 1usize << (bits / 2);
        Self {
            rows,
            cols,
            cell_height: 180.0 / rows as f64,
            cell_width: 360.0 / cols as f64,
        }
    }

    #[inline]
    fn row(&self, lat: f64) -> isize {
        ((lat + 90.0) / self.cell_height).floor() as isize
    }

    #[inline]
    fn col(&self, lon: f64) -> isize {
        ((lon + 180.0) / self.cell_width).floor() as isize
    }

    /// Cell holding `(lat, lon)`. The poles fall into the outermost rows
    /// and lon 180 wraps onto column 0.
    fn cell_of(&self, lat: f64, lon: f64) -> (usize, usize) {
        let row = self.row(lat).clamp(0, self.rows as isize - 1) as usize;
        let col = self.col(lon).rem_euclid(self.cols as isize) as usize;
        (row, col)
    }

    #[inline]
    fn center(&self, row: usize, col: usize) -> geohash::Coord<f64> {
        geohash::Coord {
            x: -180.0 + (col as f64 + 0.5) * self.cell_width,
            y: -90.0 + (row as f64 + 0.5) * self.cell_height,
        }
    }

    /// Rows and columns under `window`, one cell of margin on every side so
    /// points on a cell edge are never missed. Columns wrap around.
    ///
    /// Returns `None` without listing anything when the window covers
    /// `limit` cells or more.
    fn cells_under(&self, window: &Window, limit: usize) -> Option<(Vec<usize>, Vec<usize>)> {
        let last_row = self.rows as isize - 1;
        let first = (self.row(window.min_lat) - 1).clamp(0, last_row);
        let last = (self.row(window.max_lat) + 1).clamp(0, last_row);
        let row_count = (last - first + 1) as usize;

        let cols_total = self.cols as isize;
        let spans: SmallVec<[(isize, isize); 2]> = window
            .lon_ranges
            .iter()
            .map(|&(lo, hi)| {
                let start = self.col(lo) - 1;
                let span = (self.col(hi) + 1 - start + 1).clamp(0, cols_total);
                (start, span)
            })
            .collect();
        let col_count = spans
            .iter()
            .fold(0usize, |acc, &(_, span)| acc.saturating_add(span as usize))
            .min(self.cols);
        if row_count.saturating_mul(col_count) >= limit {
            return None;
        }

        let rows = (first..=last).map(|r| r as usize).collect();
        let mut seen = FxHashSet::default();
        let mut cols = Vec::with_capacity(col_count);
        for (start, span) in spans {
            for step in 0..span {
                let col = (start + step).rem_euclid(cols_total) as usize;
                if seen.insert(col) {
                    cols.push(col);
                }
            }
        }
        Some((rows, cols))
    }
}

/// Static index bucketing points by geohash.
#[derive(Debug, Clone)]
pub struct GeohashIndex {
    points: Vec<Point>,
    cells: FxHashMap<String, Vec<usize>>,
    overflow: Vec<usize>,
    precision: usize,
    grid: CellGrid,
}

impl GeohashIndex {
    /// Build with an explicit geohash precision.
    ///
    /// Cells should be comparable to the usual search radius: precision 5
    /// (~4.9km cells) suits a 10km search, 4 (~39km x 20km) suits 50-100km.
    ///
    /// # Panics
    ///
    /// Panics if precision is not in range 1-12.
    pub fn with_precision(points: Vec<Point>, precision: usize) -> Self {
        assert!(
            (1..=12).contains(&precision),
            "Geohash precision must be between 1 and 12"
        );

        let grid = CellGrid::for_precision(precision);
        let mut cells: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut overflow = Vec::new();

        for (ordinal, point) in points.iter().enumerate() {
            if !point.coordinate().is_on_globe() {
                log::warn!(
                    "Point {} at ({}, {}) is off the globe, scanning it on every query",
                    point.id(),
                    point.lat(),
                    point.lon()
                );
                overflow.push(ordinal);
                continue;
            }

            // Keyed by the grid cell rather than the raw coordinate: geohash
            // wraps lat 90 onto the southernmost row.
            let (row, col) = grid.cell_of(point.lat(), point.lon());
            match encode(grid.center(row, col), precision) {
                Ok(hash) => cells.entry(hash).or_default().push(ordinal),
                Err(e) => {
                    log::warn!("Cannot geohash point {}: {}", point.id(), e);
                    overflow.push(ordinal);
                }
            }
        }

        log::debug!(
            "Built geohash index over {} points: {} cells at precision {}, {} overflow",
            points.len(),
            cells.len(),
            precision,
            overflow.len()
        );

        Self {
            points,
            cells,
            overflow,
            precision,
            grid,
        }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Buckets under `window`, or `None` when listing them would cost more
    /// than visiting every bucket.
    fn buckets_under(&self, window: &Window) -> Option<Vec<&[usize]>> {
        let (rows, cols) = self.grid.cells_under(window, self.cells.len())?;

        let mut buckets = Vec::new();
        for &row in &rows {
            for &col in &cols {
                let Ok(hash) = encode(self.grid.center(row, col), self.precision) else {
                    continue;
                };
                if let Some(bucket) = self.cells.get(&hash) {
                    buckets.push(bucket.as_slice());
                }
            }
        }
        Some(buckets)
    }
}

impl SpatialIndex for GeohashIndex {
    fn build(points: Vec<Point>) -> Self {
        Self::with_precision(points, DEFAULT_GEOHASH_PRECISION)
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
        let mut scan = |ordinals: &[usize]| {
            hits.extend(ordinals.iter().filter_map(|&ordinal| {
                probe(
                    center,
                    &self.points[ordinal],
                    ordinal,
                    max_radius_km,
                    predicate,
                )
            }));
        };

        let buckets = match SearchArea::around(center, max_radius_km) {
            SearchArea::Nowhere => return Vec::new(),
            SearchArea::Everywhere => None,
            SearchArea::Window(window) => self.buckets_under(&window),
        };
        match buckets {
            Some(buckets) => buckets.into_iter().for_each(&mut scan),
            None => self.cells.values().for_each(|bucket| scan(bucket)),
        }
        scan(&self.overflow);

        resolve(&self.points, rank(hits, max_results))
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            kind: IndexKind::Geohash,
            points: self.points.len(),
            buckets: Some(self.cells.len()),
            overflow: self.overflow.len(),
        }
    }
}
