//! Core data types for skyforest-survey

use serde::{Deserialize, Serialize};

/// Valid latitude range in decimal degrees
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in decimal degrees
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 geographic position in decimal degrees, latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a point from KML's longitude-first order
    pub fn from_lonlat(longitude: f64, latitude: f64) -> Self {
        Self::new(latitude, longitude)
    }

    /// Returns true if both axes are inside the WGS84 range (NaN is never valid)
    pub fn is_valid(&self) -> bool {
        LATITUDE_RANGE.contains(&self.latitude) && LONGITUDE_RANGE.contains(&self.longitude)
    }

    /// Latitude in radians
    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians
    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A flight-plan waypoint; its label comes from its position in the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(flatten)]
    pub point: GeoPoint,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { point: GeoPoint::new(latitude, longitude) }
    }

    pub fn latitude(&self) -> f64 {
        self.point.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.point.longitude
    }
}

impl From<GeoPoint> for Waypoint {
    fn from(point: GeoPoint) -> Self {
        Self { point }
    }
}

/// Returns the label for the waypoint at `index`
///
/// Labels run `A`..`Z`, then continue in bijective base-26 the way spreadsheet
/// columns do (`AA`, `AB`, ..., `ZZ`, `AAA`), so every index is unique.
pub fn waypoint_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }

    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.0001, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_from_lonlat_swaps_axes() {
        let point = GeoPoint::from_lonlat(72.5, 24.6);
        assert_eq!(point.latitude, 24.6);
        assert_eq!(point.longitude, 72.5);
    }

    #[test]
    fn test_waypoint_label_single_letters() {
        assert_eq!(waypoint_label(0), "A");
        assert_eq!(waypoint_label(1), "B");
        assert_eq!(waypoint_label(25), "Z");
    }

    #[test]
    fn test_waypoint_label_beyond_alphabet() {
        assert_eq!(waypoint_label(26), "AA");
        assert_eq!(waypoint_label(27), "AB");
        assert_eq!(waypoint_label(51), "AZ");
        assert_eq!(waypoint_label(52), "BA");
        assert_eq!(waypoint_label(701), "ZZ");
        assert_eq!(waypoint_label(702), "AAA");
    }

    #[test]
    fn test_waypoint_serde_shape() {
        let wp = Waypoint::new(24.6, 72.5);
        let json = serde_json::to_string(&wp).unwrap();
        assert_eq!(json, r#"{"latitude":24.6,"longitude":72.5}"#);

        let back: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wp);
    }
}
