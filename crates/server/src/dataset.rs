//! Dataset bundled into the server binary.

use geo_nearby::{Point, load_points, parse_points};
use std::path::Path;
use tracing::info;

/// Hotel locations shipped with the server.
pub const BUNDLED: &[u8] = include_bytes!("../data/geo.json");

/// Load points from `path`, or the bundled dataset when no path is given.
pub fn load(path: Option<&Path>) -> geo_nearby::Result<Vec<Point>> {
    match path {
        Some(path) => {
            info!("Loading dataset from {}", path.display());
            load_points(path)
        }
        None => {
            info!("Loading bundled dataset");
            parse_points(BUNDLED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let points = load(None).unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].id(), "1");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo.json");
        std::fs::write(&path, r#"[{"hotelId": "x", "lat": 0.0, "lon": 0.0}]"#).unwrap();
        let points = load(Some(&path)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id(), "x");
    }

    #[test]
    fn test_load_bad_path_fails() {
        assert!(load(Some(Path::new("/definitely/not/here.json"))).is_err());
    }
}
