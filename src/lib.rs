//! skyforest-survey - Flight planning geometry for drone surveys
//!
//! skyforest-survey holds the computational core of a survey planner:
//! DMS formatting, great-circle distances, boundary areas, and reading and
//! writing KML flight plans. Every function is a pure transformation of its
//! arguments.
//!
//! # Examples
//!
//! ## Survey boundary from KML
//!
//! ```no_run
//! use skyforest_survey::{parse_kml, polygon_area, polyline_length};
//!
//! let raw = std::fs::read("boundary.kml")?;
//! let boundary = parse_kml(&raw);
//!
//! println!("Points: {}", boundary.len());
//! println!("Area: {:.2} ha", polygon_area(&boundary));
//! println!("Outline: {:.0} m", polyline_length(&boundary));
//! # Ok::<(), skyforest_survey::Error>(())
//! ```
//!
//! ## Flight plan export
//!
//! ```
//! use skyforest_survey::{build_kml, format_dms, Waypoint};
//!
//! let plan = vec![
//!     Waypoint::new(24.6000, 72.5000),
//!     Waypoint::new(24.6010, 72.5010),
//!     Waypoint::new(24.6020, 72.5000),
//! ];
//!
//! let kml = build_kml(&plan, "2024-05-01");
//! assert!(kml.contains("<name>WPC</name>"));
//! assert_eq!(format_dms(24.64, true), "24°38'24.0000\"N");
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod dms;
pub mod distance;
pub mod area;
pub mod validate;
pub mod flight;
pub mod formats;
pub mod projection;
pub mod api;

pub use error::{Error, Result};
pub use types::{GeoPoint, Waypoint, waypoint_label};
pub use config::{DroneSpecs, SurveyConfig};
pub use dms::{format_dms, format_dms_pair, DmsPair};
pub use distance::{distance, polyline_length, route_length, try_distance};
pub use area::{estimate_area, estimate_area_with, polygon_area, spherical_area, AreaEstimate, AreaMethod};
pub use validate::{normalize_axis_order, validate, AxisOrder};
pub use flight::{flight_legs, waypoints_from_vertices, FlightLeg, FlightStats};
pub use formats::kml::{
    build_kml, parse_kml, serializer_for, try_parse_kml,
    KmlBackend, KmlParse, KmlSerializer, ParseMode,
};
pub use projection::{Coordinate, PlanarProjection, Transformer};
