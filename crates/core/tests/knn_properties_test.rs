//! Randomized checks of the KNN contract, with the linear index as oracle.

use geo_nearby::{
    Coordinate, GeohashIndex, IndexKind, LinearIndex, Point, RTreeIndex, SpatialIndex,
    accept_all, haversine_km,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Points clustered around a few centers, including the antimeridian and a
/// pole, with some exact duplicates and a handful of off-globe values.
fn random_dataset(rng: &mut StdRng, n: usize) -> Vec<Point> {
    let hubs = [
        (40.0, -73.0),
        (0.0, 179.95),
        (0.0, -179.95),
        (89.95, 0.0),
        (-33.9, 151.2),
        (51.5, -0.1),
    ];
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let point = match rng.random_range(0..20) {
            0 if i > 0 => {
                let copy: &Point = &points[rng.random_range(0..i)];
                Point::new(format!("dup{i}"), copy.lat(), copy.lon())
            }
            1 => Point::new(format!("odd{i}"), rng.random_range(90.0..95.0), 0.0),
            2 => Point::new(
                format!("any{i}"),
                rng.random_range(-90.0..=90.0),
                rng.random_range(-180.0..=180.0),
            ),
            _ => {
                let (lat, lon) = hubs[rng.random_range(0..hubs.len())];
                let lat = (lat + rng.random_range(-0.3..0.3_f64)).clamp(-90.0, 90.0);
                let mut lon = lon + rng.random_range(-0.3..0.3);
                if lon > 180.0 {
                    lon -= 360.0;
                } else if lon < -180.0 {
                    lon += 360.0;
                }
                Point::new(format!("p{i}"), lat, lon)
            }
        };
        points.push(point);
    }
    points
}

fn random_center(rng: &mut StdRng, points: &[Point]) -> Coordinate {
    if !points.is_empty() && rng.random_bool(0.7) {
        let p = &points[rng.random_range(0..points.len())];
        Coordinate::new(
            p.lat() + rng.random_range(-0.05..0.05),
            p.lon() + rng.random_range(-0.05..0.05),
        )
    } else {
        Coordinate::new(rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0))
    }
}

#[test]
fn test_pruned_indexes_match_brute_force() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x6e65_6172);

    for round in 0..20 {
        let points = random_dataset(&mut rng, 400);
        let linear = LinearIndex::build(points.clone());
        let geohash = GeohashIndex::build(points.clone());
        let fine = GeohashIndex::with_precision(points.clone(), 7);
        let coarse = GeohashIndex::with_precision(points.clone(), 2);
        let rtree = RTreeIndex::build(points.clone());

        for _ in 0..50 {
            let center = random_center(&mut rng, &points);
            let radius = match rng.random_range(0..6) {
                0 => 0.0,
                1 => rng.random_range(0.0..1.0),
                2 => rng.random_range(0.0..50.0),
                3 => rng.random_range(50.0..2_000.0),
                4 => 10.0,
                _ => rng.random_range(0.0..25.0),
            };
            let cap = match rng.random_range(0..4) {
                0 => None,
                1 => Some(0),
                _ => Some(rng.random_range(1..30)),
            };
            let odd = rng.random_bool(0.3);
            let predicate = move |p: &Point| !odd || p.id().len() % 2 == 1;

            let expected: Vec<&str> = linear
                .k_nearest(center, cap, radius, &predicate)
                .iter()
                .map(|p| p.id())
                .collect();

            let pruned: [(&str, &dyn SpatialIndex); 4] = [
                ("geohash", &geohash),
                ("geohash-7", &fine),
                ("geohash-2", &coarse),
                ("rtree", &rtree),
            ];
            for (name, index) in pruned {
                let got: Vec<&str> = index
                    .k_nearest(center, cap, radius, &predicate)
                    .iter()
                    .map(|p| p.id())
                    .collect();
                assert_eq!(
                    got, expected,
                    "{name} diverged in round {round}: center {center:?}, radius {radius}, cap {cap:?}"
                );
            }
        }
    }
}

#[test]
fn test_results_satisfy_contract() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_dataset(&mut rng, 600);

    for kind in [IndexKind::Linear, IndexKind::Geohash, IndexKind::RTree] {
        let index = kind.build(points.clone());

        for _ in 0..100 {
            let center = random_center(&mut rng, &points);
            let radius = rng.random_range(0.0..40.0);
            let cap = rng.random_range(1..15);
            let predicate = |p: &Point| !p.id().starts_with("dup");

            let found = index.k_nearest(center, Some(cap), radius, &predicate);

            // Result cap.
            assert!(found.len() <= cap);

            let distances: Vec<f64> = found
                .iter()
                .map(|p| haversine_km(center, p.coordinate()))
                .collect();

            // Radius bound and predicate filter.
            for (point, d) in found.iter().zip(&distances) {
                assert!(*d <= radius, "{kind}: {} at {d}km > {radius}km", point.id());
                assert!(predicate(point));
            }

            // Ordering.
            assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{kind}: unordered");

            // Completeness: anything qualifying and left out is no closer
            // than the farthest result, and only missing when the cap is hit.
            for p in &points {
                let d = haversine_km(center, p.coordinate());
                let qualifies = d <= radius && predicate(p);
                let included = found.iter().any(|f| f.id() == p.id());
                if qualifies && !included {
                    assert_eq!(found.len(), cap, "{kind}: dropped {} below cap", p.id());
                    assert!(d >= *distances.last().unwrap_or(&0.0));
                }
            }
        }
    }
}

#[test]
fn test_empty_index_returns_nothing() {
    let mut rng = StdRng::seed_from_u64(7);
    for kind in [IndexKind::Linear, IndexKind::Geohash, IndexKind::RTree] {
        let index = kind.build(Vec::new());
        assert!(index.is_empty());
        for _ in 0..20 {
            let center = random_center(&mut rng, &[]);
            let radius = rng.random_range(0.0..1e6);
            assert!(index.k_nearest(center, None, radius, &accept_all).is_empty());
        }
        assert!(
            index
                .k_nearest(Coordinate::new(0.0, 0.0), None, f64::INFINITY, &accept_all)
                .is_empty()
        );
    }
}

#[test]
fn test_non_finite_input_terminates() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut points = random_dataset(&mut rng, 200);
    points.push(Point::new("nan", f64::NAN, f64::NAN));
    points.push(Point::new("inf", f64::INFINITY, 0.0));

    let centers = [
        Coordinate::new(f64::NAN, 0.0),
        Coordinate::new(0.0, f64::INFINITY),
        Coordinate::new(f64::NEG_INFINITY, f64::NAN),
        Coordinate::new(40.0, -73.0),
    ];
    let radii = [f64::NAN, f64::INFINITY, -1.0, 10.0];

    for kind in [IndexKind::Linear, IndexKind::Geohash, IndexKind::RTree] {
        let index = kind.build(points.clone());
        assert_eq!(index.stats().points, 202);
        for center in centers {
            for radius in radii {
                let found = index.k_nearest(center, None, radius, &accept_all);
                assert!(found.iter().all(|p| p.id() != "nan" && p.id() != "inf"));
            }
        }
    }
}

/// Every 5 degrees, including lat +-90 and both lon -180 and lon 180.
fn lattice() -> Vec<Point> {
    (-18..=18)
        .flat_map(|lat| {
            (-36..=36).map(move |lon| {
                Point::new(format!("{lat}:{lon}"), lat as f64 * 5.0, lon as f64 * 5.0)
            })
        })
        .collect()
}

#[test]
fn test_geohash_matches_brute_force_at_globe_edges() {
    init_logging();
    let points = lattice();
    let linear = LinearIndex::build(points.clone());

    let centers = [
        Coordinate::new(90.0, 0.0),
        Coordinate::new(90.0, -180.0),
        Coordinate::new(-90.0, 180.0),
        Coordinate::new(89.99, 45.0),
        Coordinate::new(-85.0, 5.0),
        Coordinate::new(0.0, 180.0),
        Coordinate::new(0.0, -180.0),
        Coordinate::new(45.0, 179.999),
    ];
    let radii = [0.0, 1.0, 10.0, 300.0, 600.0, 2_000.0];

    for precision in 1..=12 {
        let geohash = GeohashIndex::with_precision(points.clone(), precision);
        for center in centers {
            for radius in radii {
                let expected: Vec<&str> = linear
                    .k_nearest(center, None, radius, &accept_all)
                    .iter()
                    .map(|p| p.id())
                    .collect();
                let got: Vec<&str> = geohash
                    .k_nearest(center, None, radius, &accept_all)
                    .iter()
                    .map(|p| p.id())
                    .collect();
                assert_eq!(
                    got, expected,
                    "precision {precision}: center {center:?}, radius {radius}"
                );
            }
        }
    }
}
