//! Great-circle distance and path length

use crate::error::{Error, Result};
use crate::types::GeoPoint;

/// Mean Earth radius in meters (spherical model)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters, or an error if either point is out of range
pub fn try_distance(p1: GeoPoint, p2: GeoPoint) -> Result<f64> {
    for p in [p1, p2] {
        if !p.is_valid() {
            return Err(Error::InvalidCoordinate {
                latitude: p.latitude,
                longitude: p.longitude,
            });
        }
    }

    let dlat = p2.lat_rad() - p1.lat_rad();
    let dlon = p2.lon_rad() - p1.lon_rad();

    let a = (dlat / 2.0).sin().powi(2)
        + p1.lat_rad().cos() * p2.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_M * c)
}

/// Haversine distance in meters
///
/// Out-of-range input is logged and yields 0.
pub fn distance(p1: GeoPoint, p2: GeoPoint) -> f64 {
    match try_distance(p1, p2) {
        Ok(meters) => meters,
        Err(e) => {
            log::error!("Distance calculation error: {}", e);
            0.0
        }
    }
}

/// Sum of segment lengths along an open path
///
/// No edge is added from the last point back to the first.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}

/// Length of a flight route, closing the loop when it has more than two points
pub fn route_length(points: &[GeoPoint]) -> f64 {
    let open = polyline_length(points);

    match points {
        [first, .., last] if points.len() > 2 => open + distance(*last, *first),
        _ => open,
    }
}
