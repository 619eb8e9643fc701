use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::Response,
    Json,
    body::Body,
};
use axum::extract::multipart::Multipart;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use crate::area::estimate_area;
use crate::config::SurveyConfig;
use crate::distance::{route_length, try_distance};
use crate::dms::format_dms_pair;
use crate::flight::{flight_legs, FlightStats};
use crate::formats::kml::{serializer_for, try_parse_kml, ParseMode, KML_MIME_TYPE};
use crate::types::{GeoPoint, Waypoint};
use crate::validate::partition_valid;
use super::models::*;

/// Shared, read-only server configuration
pub type AppState = Arc<SurveyConfig>;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: error.into() }))
}

fn reject_invalid_waypoints(waypoints: &[Waypoint]) -> Result<(), ApiError> {
    match waypoints.iter().position(|wp| !wp.point.is_valid()) {
        Some(bad) => Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Waypoint {} is out of range", bad),
        )),
        None => Ok(()),
    }
}

pub async fn get_dms(
    Query(req): Query<DmsRequest>,
) -> Result<Json<DmsResponse>, ApiError> {
    log::debug!("DMS request for {}, {}", req.latitude, req.longitude);

    let point = GeoPoint::new(req.latitude, req.longitude);
    if !point.is_valid() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Coordinate out of range: {}, {}", req.latitude, req.longitude),
        ));
    }

    Ok(Json(DmsResponse {
        latitude: req.latitude,
        longitude: req.longitude,
        dms: format_dms_pair(point),
    }))
}

pub async fn get_distance(
    Query(req): Query<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    log::debug!(
        "Distance request {}, {} -> {}, {}",
        req.lat1, req.lon1, req.lat2, req.lon2
    );

    let from = GeoPoint::new(req.lat1, req.lon1);
    let to = GeoPoint::new(req.lat2, req.lon2);

    match try_distance(from, to) {
        Ok(meters) => Ok(Json(DistanceResponse { meters })),
        Err(e) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub async fn parse_kml_upload(
    State(config): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<KmlParseResponse>, ApiError> {
    let start = Instant::now();

    let raw = read_field(&mut multipart, "kml").await?;

    let parse = try_parse_kml(&raw).map_err(|e| {
        api_error(StatusCode::UNPROCESSABLE_ENTITY, format!("Failed to parse KML: {}", e))
    })?;

    log::debug!(
        "Parsed {} boundary points ({:?}, {} rejected, {} duplicates)",
        parse.points.len(), parse.mode, parse.rejected, parse.duplicates
    );

    let area = estimate_area(&parse.points, config.area_epsg);
    let perimeter_m = route_length(&parse.points);

    Ok(Json(KmlParseResponse {
        parse_mode: match parse.mode {
            ParseMode::Strict => "strict".to_string(),
            ParseMode::Lenient => "lenient".to_string(),
        },
        rejected: parse.rejected,
        duplicates: parse.duplicates,
        points: parse.points,
        area,
        perimeter_m,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }))
}

pub async fn build_kml_document(
    State(config): State<AppState>,
    Json(req): Json<BuildKmlRequest>,
) -> Result<Response, ApiError> {
    log::debug!("KML build request: {} waypoints, label {:?}", req.waypoints.len(), req.label);
    reject_invalid_waypoints(&req.waypoints)?;

    let serializer = serializer_for(req.backend.unwrap_or(config.kml_backend));
    let kml = serializer.serialize(&req.waypoints, &req.label).map_err(|e| {
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let file_stem: String = req
        .label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, KML_MIME_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_Flight_Plan.kml\"", file_stem),
        )
        .body(Body::from(kml))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn compute_area(
    State(config): State<AppState>,
    Json(req): Json<AreaRequest>,
) -> Json<AreaResponse> {
    let start = Instant::now();
    let epsg = req.epsg.unwrap_or(config.area_epsg);
    log::debug!("Area request: {} points in EPSG:{}", req.points.len(), epsg);

    Json(area_response(&req.points, epsg, start))
}

pub async fn upload_area_csv(
    State(config): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AreaResponse>, ApiError> {
    let start = Instant::now();

    let csv_data = read_field(&mut multipart, "csv").await?;
    log::debug!("Area CSV upload: {} bytes", csv_data.len());

    let mut csv_reader = csv::Reader::from_reader(Cursor::new(csv_data));
    let mut points = Vec::new();

    for result in csv_reader.deserialize::<CsvPoint>() {
        match result {
            Ok(row) => points.push(GeoPoint::new(row.latitude, row.longitude)),
            Err(e) => log::warn!("Skipping unreadable CSV row: {}", e),
        }
    }

    Ok(Json(area_response(&points, config.area_epsg, start)))
}

pub async fn compute_route(
    State(config): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    log::debug!("Route request: {} waypoints", req.waypoints.len());
    reject_invalid_waypoints(&req.waypoints)?;

    let stats = FlightStats::compute(&req.waypoints, &config.drone)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(RouteResponse {
        stats,
        legs: flight_legs(&req.waypoints),
    }))
}

fn area_response(points: &[GeoPoint], epsg: u16, start: Instant) -> AreaResponse {
    let (valid, rejected) = partition_valid(points);
    for p in &rejected {
        log::warn!("Invalid coordinates skipped: {}, {}", p.latitude, p.longitude);
    }

    AreaResponse {
        point_count: valid.len(),
        rejected: rejected.len(),
        area: estimate_area(&valid, epsg),
        perimeter_m: route_length(&valid),
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

async fn read_field(multipart: &mut Multipart, wanted: &str) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e))
    })? {
        if field.name() == Some(wanted) {
            let bytes = field.bytes().await.map_err(|e| {
                api_error(StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", wanted, e))
            })?;
            return Ok(bytes.to_vec());
        }
    }

    Err(api_error(StatusCode::BAD_REQUEST, format!("Missing {} file", wanted)))
}
