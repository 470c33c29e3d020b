//! Geometry translation between provider paths and persisted line strings.
//!
//! Every save and every load flips the axis order exactly once, here. The
//! functions only reorder values, so round trips are bit-exact.

use crate::GeometryError;
use crate::route::{LatLng, LineString};
use crate::search::SearchRegion;

/// Copy a provider path into draft form. Order is preserved.
pub fn to_draft_path(provider_points: &[LatLng]) -> Vec<LatLng> {
    provider_points.to_vec()
}

/// Convert a draft path to a GeoJSON line string, `{lat, lng}` → `[lng, lat]`.
///
/// Fails when fewer than two points are given; a single point is not a line.
pub fn to_persisted_path(draft_path: &[LatLng]) -> Result<LineString, GeometryError> {
    if draft_path.len() < 2 {
        return Err(GeometryError::TooFewPoints(draft_path.len()));
    }
    let coordinates = draft_path.iter().map(|p| [p.lng, p.lat]).collect();
    Ok(LineString::new(coordinates))
}

/// Convert GeoJSON positions back to provider points, `[lng, lat]` → `{lat, lng}`.
pub fn from_persisted_path(coordinates: &[[f64; 2]]) -> Vec<LatLng> {
    coordinates
        .iter()
        .map(|&[lng, lat]| LatLng { lat, lng })
        .collect()
}

/// Normalise provider rectangle bounds into a search region.
pub fn to_search_region(ne: LatLng, sw: LatLng) -> Result<SearchRegion, GeometryError> {
    SearchRegion::new(ne, sw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> Vec<LatLng> {
        points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()
    }

    #[test]
    fn draft_path_preserves_order_and_duplicates() {
        let points = path(&[(1.0, 2.0), (1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(to_draft_path(&points), points);
    }

    #[test]
    fn persisted_path_flips_axes() {
        let line = to_persisted_path(&path(&[(45.5, -73.5), (45.6, -73.6)])).unwrap();
        assert_eq!(line.coordinates, vec![[-73.5, 45.5], [-73.6, 45.6]]);
    }

    #[test]
    fn empty_path_rejected() {
        assert_eq!(to_persisted_path(&[]), Err(GeometryError::TooFewPoints(0)));
    }

    #[test]
    fn single_point_rejected() {
        assert_eq!(
            to_persisted_path(&path(&[(1.0, 1.0)])),
            Err(GeometryError::TooFewPoints(1))
        );
    }

    #[test]
    fn round_trip_is_exact() {
        let original = path(&[
            (45.508_888_1, -73.561_668_3),
            (0.1 + 0.2, -0.0),
            (-89.999_999_999, 179.999_999_999),
            (1e-300, -1e-300),
        ]);
        let line = to_persisted_path(&original).unwrap();
        assert_eq!(from_persisted_path(&line.coordinates), original);
    }

    #[test]
    fn from_persisted_flips_back() {
        let points = from_persisted_path(&[[-73.5, 45.5], [-73.6, 45.6]]);
        assert_eq!(points, path(&[(45.5, -73.5), (45.6, -73.6)]));
    }

    #[test]
    fn search_region_from_bounds() {
        let region = to_search_region(LatLng::new(45.0, -73.0), LatLng::new(44.0, -74.0)).unwrap();
        assert_eq!(region.sw(), LatLng::new(44.0, -74.0));
    }
}
