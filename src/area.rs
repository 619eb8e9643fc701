//! Polygon area of a survey boundary
//!
//! Area is computed in two tiers. The boundary is first projected into a
//! planar CRS and measured with the shoelace formula. If the projection cannot
//! be built or produces unusable coordinates, the spherical-excess
//! approximation is used instead and the reason is returned as a warning.

use serde::Serialize;

use crate::distance::EARTH_RADIUS_M;
use crate::error::{Error, Result};
use crate::projection::{epsg, Coordinate, PlanarProjection, Transformer};
use crate::types::GeoPoint;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Which method produced an area value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMethod {
    /// Fewer than three points, nothing was computed
    Insufficient,
    /// Shoelace formula on projected coordinates
    Projected,
    /// Spherical-excess approximation
    Spherical,
}

/// An area in hectares with the method that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaEstimate {
    pub hectares: f64,
    pub method: AreaMethod,
    /// Why the projected method was not used, if it failed
    pub warning: Option<String>,
}

impl AreaEstimate {
    fn insufficient() -> Self {
        Self { hectares: 0.0, method: AreaMethod::Insufficient, warning: None }
    }

    fn fallback(points: &[GeoPoint], error: &Error) -> Self {
        log::warn!("Area calculation warning: {}. Using approximate method.", error);

        Self {
            hectares: spherical_area(points),
            method: AreaMethod::Spherical,
            warning: Some(error.to_string()),
        }
    }
}

/// Unsigned shoelace area of a closed planar ring, in square units of the input
pub fn shoelace_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let n = ring.len();
    let twice_signed: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();

    twice_signed.abs() / 2.0
}

/// Area in hectares measured on the plane of `projection`
pub fn projected_area<P: PlanarProjection + ?Sized>(projection: &P, points: &[GeoPoint]) -> Result<f64> {
    if points.len() < 3 {
        return Ok(0.0);
    }

    let ring = projection.project_all(points)?;
    let square_meters = shoelace_area(&ring);

    if !square_meters.is_finite() {
        return Err(Error::Projection("Degenerate polygon: projected area is not finite".to_string()));
    }

    Ok(square_meters / SQUARE_METERS_PER_HECTARE)
}

/// Spherical-excess approximation of the polygon area in hectares
///
/// The last point always connects back to the first.
pub fn spherical_area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let n = points.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            (p2.lon_rad() - p1.lon_rad()) * (2.0 + p1.lat_rad().sin() + p2.lat_rad().sin())
        })
        .sum();

    sum.abs() * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0 / SQUARE_METERS_PER_HECTARE
}

/// Projected area through `projection`, falling back to the spherical method
pub fn estimate_area_with<P: PlanarProjection + ?Sized>(projection: &P, points: &[GeoPoint]) -> AreaEstimate {
    if points.len() < 3 {
        return AreaEstimate::insufficient();
    }

    match projected_area(projection, points) {
        Ok(hectares) => AreaEstimate { hectares, method: AreaMethod::Projected, warning: None },
        Err(e) => AreaEstimate::fallback(points, &e),
    }
}

/// Projected area in `target_epsg`, falling back to the spherical method
pub fn estimate_area(points: &[GeoPoint], target_epsg: u16) -> AreaEstimate {
    if points.len() < 3 {
        return AreaEstimate::insufficient();
    }

    match Transformer::from_wgs84(target_epsg) {
        Ok(transformer) => estimate_area_with(&transformer, points),
        Err(e) => AreaEstimate::fallback(points, &e),
    }
}

/// Polygon area in hectares using the default equal-area CRS
///
/// Returns 0 for fewer than three points.
pub fn polygon_area(points: &[GeoPoint]) -> f64 {
    estimate_area(points, epsg::DEFAULT_AREA).hectares
}
