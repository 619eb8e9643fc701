//! Route statistics and flight-log legs for a waypoint plan

use serde::Serialize;

use crate::config::DroneSpecs;
use crate::distance::route_length;
use crate::dms::{format_dms_pair, DmsPair};
use crate::error::Result;
use crate::types::{GeoPoint, Waypoint};

pub use crate::types::waypoint_label;

/// Minimum photo estimate for any survey
const MIN_ESTIMATED_PHOTOS: usize = 10;

/// Photos estimated per waypoint
const PHOTOS_PER_WAYPOINT: usize = 3;

/// Safe remaining battery above which a route has comfortable headroom, percent
const COMFORTABLE_RESERVE_PCT: f64 = 20.0;

/// Whether a route fits within one battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    /// Fits with the safety margin intact
    Feasible,
    /// Fits, but eats into the safety margin
    Marginal,
    /// Needs more than the maximum flight time
    ExceedsFlightTime,
}

/// Battery reserve left after the route, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryStatus {
    Comfortable,
    Low,
    Insufficient,
}

/// Computed statistics of a flight plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightStats {
    pub waypoint_count: usize,
    /// Route length in meters, returning to the start for more than two waypoints
    pub total_distance_m: f64,
    pub flight_time_min: f64,
    pub battery_used_pct: f64,
    pub battery_remaining_pct: f64,
    /// Remaining battery minus the safety margin; negative when the margin is eaten
    pub safe_remaining_pct: f64,
    pub battery_status: BatteryStatus,
    pub feasibility: Feasibility,
    pub estimated_photos: usize,
}

impl FlightStats {
    /// Computes route statistics for `waypoints` flown by a drone with `specs`
    pub fn compute(waypoints: &[Waypoint], specs: &DroneSpecs) -> Result<Self> {
        specs.validate()?;

        let points: Vec<GeoPoint> = waypoints.iter().map(|wp| wp.point).collect();
        let total_distance_m = route_length(&points);

        let flight_time_min = total_distance_m / specs.cruise_speed_mps / 60.0;
        let battery_used_pct = flight_time_min / specs.max_flight_time_min * 100.0;
        let battery_remaining_pct = (100.0 - battery_used_pct).max(0.0);
        let safe_remaining_pct = battery_remaining_pct - specs.battery_safety_margin_pct;

        let battery_status = if safe_remaining_pct > COMFORTABLE_RESERVE_PCT {
            BatteryStatus::Comfortable
        } else if safe_remaining_pct > 0.0 {
            BatteryStatus::Low
        } else {
            BatteryStatus::Insufficient
        };

        let feasibility = if battery_used_pct > 100.0 {
            Feasibility::ExceedsFlightTime
        } else if battery_used_pct > 100.0 - specs.battery_safety_margin_pct {
            Feasibility::Marginal
        } else {
            Feasibility::Feasible
        };

        Ok(Self {
            waypoint_count: waypoints.len(),
            total_distance_m,
            flight_time_min,
            battery_used_pct,
            battery_remaining_pct,
            safe_remaining_pct,
            battery_status,
            feasibility,
            estimated_photos: (waypoints.len() * PHOTOS_PER_WAYPOINT).max(MIN_ESTIMATED_PHOTOS),
        })
    }
}

/// One from/to row of the flight log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightLeg {
    pub index: usize,
    pub from_label: String,
    pub to_label: String,
    pub from: DmsPair,
    pub to: DmsPair,
}

/// Builds the leg list for a flight log, the last leg returning to the first waypoint
///
/// Fewer than two waypoints make no legs.
pub fn flight_legs(waypoints: &[Waypoint]) -> Vec<FlightLeg> {
    let n = waypoints.len();
    if n < 2 {
        return Vec::new();
    }

    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            FlightLeg {
                index: i,
                from_label: waypoint_label(i),
                to_label: waypoint_label(j),
                from: format_dms_pair(waypoints[i].point),
                to: format_dms_pair(waypoints[j].point),
            }
        })
        .collect()
}

/// Turns drawn polyline vertices into waypoints, one per vertex
pub fn waypoints_from_vertices(points: &[GeoPoint]) -> Vec<Waypoint> {
    points.iter().copied().map(Waypoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance;

    fn abc() -> Vec<Waypoint> {
        vec![
            Waypoint::new(24.6000, 72.5000),
            Waypoint::new(24.6010, 72.5010),
            Waypoint::new(24.6020, 72.5000),
        ]
    }

    #[test]
    fn test_stats_close_the_loop() {
        let wps = abc();
        let stats = FlightStats::compute(&wps, &DroneSpecs::default()).unwrap();

        let expected = distance(wps[0].point, wps[1].point)
            + distance(wps[1].point, wps[2].point)
            + distance(wps[2].point, wps[0].point);
        assert!((stats.total_distance_m - expected).abs() < 1e-9);
        assert_eq!(stats.waypoint_count, 3);
        assert_eq!(stats.estimated_photos, 10);
    }

    #[test]
    fn test_flight_time_and_battery() {
        // two points 4800 m apart: 600 s at 8 m/s, 10 of 30 minutes
        let d = 4800.0 / crate::distance::EARTH_RADIUS_M;
        let wps = [Waypoint::new(0.0, 0.0), Waypoint::new(d.to_degrees(), 0.0)];
        let stats = FlightStats::compute(&wps, &DroneSpecs::default()).unwrap();

        assert!((stats.total_distance_m - 4800.0).abs() < 1e-6);
        assert!((stats.flight_time_min - 10.0).abs() < 1e-6);
        assert!((stats.battery_used_pct - 100.0 / 3.0).abs() < 1e-6);
        assert!((stats.battery_remaining_pct - 200.0 / 3.0).abs() < 1e-6);
        assert!((stats.safe_remaining_pct - (200.0 / 3.0 - 15.0)).abs() < 1e-6);
        assert_eq!(stats.battery_status, BatteryStatus::Comfortable);
        assert_eq!(stats.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn test_marginal_and_exceeded_routes() {
        let specs = DroneSpecs { max_flight_time_min: 1.0, ..DroneSpecs::default() };
        let meters = |m: f64| (m / crate::distance::EARTH_RADIUS_M).to_degrees();

        // 432 m at 8 m/s = 0.9 min = 90 % of one minute
        let marginal = [Waypoint::new(0.0, 0.0), Waypoint::new(meters(432.0), 0.0)];
        let stats = FlightStats::compute(&marginal, &specs).unwrap();
        assert_eq!(stats.feasibility, Feasibility::Marginal);
        assert_eq!(stats.battery_status, BatteryStatus::Insufficient);

        let long = [Waypoint::new(0.0, 0.0), Waypoint::new(meters(1000.0), 0.0)];
        let stats = FlightStats::compute(&long, &specs).unwrap();
        assert_eq!(stats.feasibility, Feasibility::ExceedsFlightTime);
        assert_eq!(stats.battery_remaining_pct, 0.0);
    }

    #[test]
    fn test_stats_reject_bad_specs() {
        let specs = DroneSpecs { cruise_speed_mps: 0.0, ..DroneSpecs::default() };
        assert!(FlightStats::compute(&abc(), &specs).is_err());
    }

    #[test]
    fn test_empty_plan() {
        let stats = FlightStats::compute(&[], &DroneSpecs::default()).unwrap();
        assert_eq!(stats.total_distance_m, 0.0);
        assert_eq!(stats.feasibility, Feasibility::Feasible);
        assert_eq!(stats.estimated_photos, 10);
    }

    #[test]
    fn test_photo_estimate_scales() {
        let wps: Vec<Waypoint> = (0..5).map(|i| Waypoint::new(i as f64 * 0.001, 0.0)).collect();
        let stats = FlightStats::compute(&wps, &DroneSpecs::default()).unwrap();
        assert_eq!(stats.estimated_photos, 15);
    }

    #[test]
    fn test_legs_wrap_to_start() {
        let legs = flight_legs(&abc());
        assert_eq!(legs.len(), 3);
        assert_eq!((legs[0].from_label.as_str(), legs[0].to_label.as_str()), ("A", "B"));
        assert_eq!((legs[2].from_label.as_str(), legs[2].to_label.as_str()), ("C", "A"));
        assert_eq!(legs[2].to, legs[0].from);
        assert_eq!(legs[0].from.latitude, "24°36'00.0000\"N");
        assert_eq!(legs[0].from.longitude, "72°30'00.0000\"E");
    }

    #[test]
    fn test_two_waypoints_make_out_and_back_legs() {
        let legs = flight_legs(&abc()[..2]);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].from_label, "B");
        assert_eq!(legs[1].to_label, "A");
    }

    #[test]
    fn test_no_legs_for_single_waypoint() {
        assert!(flight_legs(&abc()[..1]).is_empty());
        assert!(flight_legs(&[]).is_empty());
    }

    #[test]
    fn test_waypoints_from_vertices() {
        let points = [GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)];
        let wps = waypoints_from_vertices(&points);
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[1].point, points[1]);
    }
}
