//! Coordinate validation and axis-order normalization

use crate::types::{GeoPoint, LATITUDE_RANGE, LONGITUDE_RANGE};

/// How a raw coordinate pair was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// First value is latitude (also chosen when both readings are valid)
    LatLon,
    /// First value is longitude; the pair must be swapped
    LonLat,
    /// Neither reading is in range
    Invalid,
}

/// Classifies a raw `(first, second)` pair
///
/// Pairs such as `(45, 45)` are valid either way round. There is no way to tell
/// them apart from the numbers alone, so they are reported as `LatLon`.
pub fn detect_axis_order(first: f64, second: f64) -> AxisOrder {
    if LATITUDE_RANGE.contains(&first) && LONGITUDE_RANGE.contains(&second) {
        AxisOrder::LatLon
    } else if LONGITUDE_RANGE.contains(&first) && LATITUDE_RANGE.contains(&second) {
        AxisOrder::LonLat
    } else {
        AxisOrder::Invalid
    }
}

/// Returns the pair as a latitude-first point
///
/// Swaps only when the pair is unambiguously longitude-first; otherwise the
/// order is left as given, including for out-of-range pairs.
pub fn normalize_axis_order(first: f64, second: f64) -> GeoPoint {
    match detect_axis_order(first, second) {
        AxisOrder::LonLat => GeoPoint::new(second, first),
        AxisOrder::LatLon | AxisOrder::Invalid => GeoPoint::new(first, second),
    }
}

/// Splits points into in-range and out-of-range, preserving order
pub fn partition_valid(points: &[GeoPoint]) -> (Vec<GeoPoint>, Vec<GeoPoint>) {
    points.iter().copied().partition(GeoPoint::is_valid)
}

/// Drops out-of-range points, logging each one
pub fn validate(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let (valid, rejected) = partition_valid(points);

    for p in &rejected {
        log::warn!("Invalid coordinates skipped: {}, {}", p.latitude, p.longitude);
    }

    valid
}
