//! Decimal degree to degrees/minutes/seconds formatting

use serde::Serialize;

use crate::types::GeoPoint;

/// Seconds at or above this value roll over into the next minute
const SECONDS_CARRY_THRESHOLD: f64 = 59.99995;

/// Formatted latitude and longitude of one point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DmsPair {
    pub latitude: String,
    pub longitude: String,
}

/// Formats a decimal degree value as `DD°MM'SS.SSSS"X`
///
/// The direction letter is `N`/`S` for latitudes and `E`/`W` for longitudes;
/// zero (including `-0.0`) counts as non-negative. The value is expected to be
/// range-checked already.
pub fn format_dms(decimal: f64, is_latitude: bool) -> String {
    let direction = match (is_latitude, decimal >= 0.0) {
        (true, true) => 'N',
        (true, false) => 'S',
        (false, true) => 'E',
        (false, false) => 'W',
    };

    let abs_val = decimal.abs();

    let mut degrees = abs_val.trunc() as u32;
    let minutes_full = (abs_val - degrees as f64) * 60.0;
    let mut minutes = minutes_full.trunc() as u32;
    let mut seconds = (minutes_full - minutes as f64) * 60.0;

    if seconds >= SECONDS_CARRY_THRESHOLD {
        seconds = 0.0;
        minutes += 1;
        if minutes >= 60 {
            minutes = 0;
            degrees += 1;
        }
    }

    format!("{:02}°{:02}'{:07.4}\"{}", degrees, minutes, seconds, direction)
}

/// Formats both axes of a point
pub fn format_dms_pair(point: GeoPoint) -> DmsPair {
    DmsPair {
        latitude: format_dms(point.latitude, true),
        longitude: format_dms(point.longitude, false),
    }
}
