use crate::types::GeoPoint;

/// A position in a coordinate reference system, `x` east and `y` north
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new planar coordinate
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a coordinate from longitude/latitude in degrees (WGS84)
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat)
    }

    /// Creates the longitude-first coordinate of a geographic point
    pub fn from_geo(point: GeoPoint) -> Self {
        Self::from_lonlat(point.longitude, point.latitude)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
