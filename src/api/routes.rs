use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;

use crate::config::SurveyConfig;
use super::handlers::*;

pub fn create_router(config: SurveyConfig) -> Router {
    Router::new()
        .route("/api/dms", get(get_dms))
        .route("/api/distance", get(get_distance))
        .route("/api/kml/parse", post(parse_kml_upload))
        .route("/api/kml/build", post(build_kml_document))
        .route("/api/area", post(compute_area))
        .route("/api/area/csv", post(upload_area_csv))
        .route("/api/route", post(compute_route))
        .with_state(Arc::new(config))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(100 * 1024 * 1024)) // 100MB limit
                .layer(CorsLayer::permissive())
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_post(uri: &str, field: &str, content: &str) -> Request<Body> {
        let boundary = "X-SURVEY-BOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"upload\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{c}\r\n--{b}--\r\n",
            b = boundary,
            f = field,
            c = content
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_dms_endpoint() {
        let app = create_router(SurveyConfig::default());
        let response = app
            .oneshot(Request::get("/api/dms?latitude=24.64&longitude=-72.5").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["dms"]["latitude"], "24°38'24.0000\"N");
        assert_eq!(json["dms"]["longitude"], "72°30'00.0000\"W");
    }

    #[tokio::test]
    async fn test_distance_rejects_invalid() {
        let app = create_router(SurveyConfig::default());
        let response = app
            .oneshot(
                Request::get("/api/distance?lat1=95&lon1=0&lat2=0&lon2=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_kml_endpoint() {
        let app = create_router(SurveyConfig::default());
        let request = json_post(
            "/api/kml/build",
            r#"{"label": "Plot 4", "waypoints": [
                {"latitude": 24.6, "longitude": 72.5},
                {"latitude": 24.601, "longitude": 72.501}
            ]}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.google-earth.kml+xml"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("Plot_4_Flight_Plan.kml"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let kml = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(kml.contains("<name>Flight Plan Plot 4</name>"));
        assert!(kml.contains("<name>WPB</name>"));
    }

    #[tokio::test]
    async fn test_kml_parse_endpoint() {
        let app = create_router(SurveyConfig::default());
        let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Placemark><name>A & B</name>
            <Polygon><outerBoundaryIs><LinearRing><coordinates>
            72.50,24.60 72.51,24.60 72.51,24.61 72.50,24.61 72.50,24.60
            </coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark></kml>"#;
        let response = app.oneshot(multipart_post("/api/kml/parse", "kml", kml)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["parse_mode"], "lenient");
        assert_eq!(json["points"].as_array().unwrap().len(), 4);
        assert_eq!(json["duplicates"], 1);
        assert!(json["area"]["hectares"].as_f64().unwrap() > 100.0);
    }

    #[tokio::test]
    async fn test_area_csv_endpoint() {
        let app = create_router(SurveyConfig::default());
        let csv = "latitude,longitude\n24.60,72.50\n24.60,72.51\nbad,row\n24.61,72.51\n";
        let response = app.oneshot(multipart_post("/api/area/csv", "csv", csv)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["point_count"], 3);
        assert!(json["area"]["hectares"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_route_endpoint() {
        let app = create_router(SurveyConfig::default());
        let request = json_post(
            "/api/route",
            r#"{"waypoints": [
                {"latitude": 24.6000, "longitude": 72.5000},
                {"latitude": 24.6010, "longitude": 72.5010},
                {"latitude": 24.6020, "longitude": 72.5000}
            ]}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["stats"]["waypoint_count"], 3);
        assert_eq!(json["stats"]["feasibility"], "feasible");
        assert_eq!(json["legs"].as_array().unwrap().len(), 3);
        assert_eq!(json["legs"][2]["to_label"], "A");
    }

    #[tokio::test]
    async fn test_route_rejects_out_of_range_waypoint() {
        let app = create_router(SurveyConfig::default());
        let request = json_post(
            "/api/route",
            r#"{"waypoints": [
                {"latitude": 24.6000, "longitude": 72.5000},
                {"latitude": 95.0, "longitude": 72.5010},
                {"latitude": 24.6020, "longitude": 72.5000}
            ]}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Waypoint 1 is out of range");
    }

    #[tokio::test]
    async fn test_missing_upload_field() {
        let app = create_router(SurveyConfig::default());
        let response = app
            .oneshot(multipart_post("/api/kml/parse", "other", "<kml/>"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
