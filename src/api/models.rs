use serde::{Deserialize, Serialize};

use crate::area::AreaEstimate;
use crate::dms::DmsPair;
use crate::flight::{FlightLeg, FlightStats};
use crate::formats::kml::KmlBackend;
use crate::types::{GeoPoint, Waypoint};

#[derive(Debug, Serialize, Deserialize)]
pub struct DmsRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceRequest {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub meters: f64,
}

#[derive(Debug, Serialize)]
pub struct DmsResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub dms: DmsPair,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AreaRequest {
    pub points: Vec<GeoPoint>,
    /// Overrides the configured target CRS
    #[serde(default)]
    pub epsg: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub point_count: usize,
    pub rejected: usize,
    pub area: AreaEstimate,
    pub perimeter_m: f64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct KmlParseResponse {
    pub points: Vec<GeoPoint>,
    /// "strict" or "lenient"
    pub parse_mode: String,
    pub rejected: usize,
    pub duplicates: usize,
    pub area: AreaEstimate,
    pub perimeter_m: f64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildKmlRequest {
    pub waypoints: Vec<Waypoint>,
    #[serde(default = "default_label")]
    pub label: String,
    /// Overrides the configured serializer
    #[serde(default)]
    pub backend: Option<KmlBackend>,
}

fn default_label() -> String {
    "Survey".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteRequest {
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub stats: FlightStats,
    pub legs: Vec<FlightLeg>,
}

#[derive(Debug, Deserialize)]
pub struct CsvPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
