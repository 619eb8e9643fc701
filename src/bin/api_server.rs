use skyforest_survey::api::create_router;
use skyforest_survey::SurveyConfig;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match SurveyConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address.clone();
    let app = create_router(config);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .expect("Failed to bind port");

    println!("🚁 Survey Planner API Server");
    println!("📡 Listening on http://{}", bind_address);
    println!();
    println!("📍 Endpoints:");
    println!("  GET  /api/dms?latitude=<lat>&longitude=<lon>");
    println!("  GET  /api/distance?lat1=<lat>&lon1=<lon>&lat2=<lat>&lon2=<lon>");
    println!("  POST /api/kml/parse (multipart/form-data: kml file)");
    println!("  POST /api/kml/build (json: waypoints, label, backend)");
    println!("  POST /api/area (json: points, epsg)");
    println!("  POST /api/area/csv (multipart/form-data: csv file)");
    println!("  POST /api/route (json: waypoints)");
    println!();

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
