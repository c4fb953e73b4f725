//! Latitude/longitude windows enclosing a search circle.
//!
//! The window is only a prefilter: it may admit points outside the circle
//! but never excludes one inside it.

use crate::compute::distance::EARTH_RADIUS_KM;
use crate::types::Coordinate;
use smallvec::{SmallVec, smallvec};
use std::f64::consts::FRAC_PI_2;

/// Relative widening of every angle.
const SLACK: f64 = 1e-9;

/// What part of the globe a search has to look at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchArea {
    /// No point can be within the radius.
    Nowhere,
    /// The prefilter cannot narrow the search.
    Everywhere,
    Window(Window),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Window {
    pub min_lat: f64,
    pub max_lat: f64,
    /// Two ranges when the window crosses the antimeridian.
    pub lon_ranges: SmallVec<[(f64, f64); 2]>,
}

impl Window {
    #[cfg(test)]
    pub(crate) fn contains(&self, coord: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.lat)
            && self
                .lon_ranges
                .iter()
                .any(|(lo, hi)| (*lo..=*hi).contains(&coord.lon))
    }
}

impl SearchArea {
    pub(crate) fn around(center: Coordinate, radius_km: f64) -> Self {
        // NaN radius or center: every distance comparison fails.
        if radius_km.is_nan()
            || radius_km < 0.0
            || !center.lat.is_finite()
            || !center.lon.is_finite()
        {
            return Self::Nowhere;
        }
        if !center.is_on_globe() {
            return Self::Everywhere;
        }

        let angular = widen(radius_km / EARTH_RADIUS_KM);
        if angular >= FRAC_PI_2 {
            return Self::Everywhere;
        }

        let dlat = angular.to_degrees();
        let min_lat = center.lat - dlat;
        let max_lat = center.lat + dlat;

        // A pole inside the circle means every meridian crosses it.
        if min_lat <= -90.0 || max_lat >= 90.0 {
            return Self::Window(Window {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                lon_ranges: smallvec![(-180.0, 180.0)],
            });
        }

        let ratio = angular.sin() / center.lat.to_radians().cos();
        let lon_ranges = if ratio >= 1.0 {
            smallvec![(-180.0, 180.0)]
        } else {
            let dlon = widen(ratio.asin()).to_degrees();
            wrap_lon_range(center.lon - dlon, center.lon + dlon)
        };

        Self::Window(Window {
            min_lat,
            max_lat,
            lon_ranges,
        })
    }
}

#[inline]
fn widen(angle: f64) -> f64 {
    angle * (1.0 + SLACK) + SLACK
}

fn wrap_lon_range(lo: f64, hi: f64) -> SmallVec<[(f64, f64); 2]> {
    if hi - lo >= 360.0 {
        smallvec![(-180.0, 180.0)]
    } else if lo < -180.0 {
        smallvec![(lo + 360.0, 180.0), (-180.0, hi)]
    } else if hi > 180.0 {
        smallvec![(lo, 180.0), (-180.0, hi - 360.0)]
    } else {
        smallvec![(lo, hi)]
    }
}
