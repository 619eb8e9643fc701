use std::path::Path;

use skyforest_survey::{
    estimate_area, flight_legs, format_dms, polyline_length, route_length, serializer_for,
    try_parse_kml, waypoint_label, waypoints_from_vertices, Error, FlightStats, Result,
    SurveyConfig,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: skyforest-survey <boundary.kml> [label]");
            std::process::exit(2);
        }
    };
    let label = args.next().unwrap_or_else(|| "Survey".to_string());

    let config = SurveyConfig::load()?;

    println!("skyforest-survey - KML Survey Report\n");

    let raw = std::fs::read(&input)?;
    let parse = try_parse_kml(&raw)?;

    println!("File: {}", input);
    println!("Parse mode: {:?}", parse.mode);
    println!("Points: {} ({} out of range, {} duplicates)", parse.points.len(), parse.rejected, parse.duplicates);

    if parse.points.is_empty() {
        return Err(Error::Xml(format!("No coordinates found in {}", input)));
    }

    println!("\n--- Waypoints ---");
    for (i, point) in parse.points.iter().enumerate() {
        println!(
            "  WP{:<3} {:>11.6}, {:>11.6}   {}  {}",
            waypoint_label(i),
            point.latitude,
            point.longitude,
            format_dms(point.latitude, true),
            format_dms(point.longitude, false),
        );
    }

    println!("\n--- Boundary ---");
    println!("  Open path length: {:.1} m", polyline_length(&parse.points));
    println!("  Perimeter: {:.1} m", route_length(&parse.points));

    let area = estimate_area(&parse.points, config.area_epsg);
    println!("  Area: {:.4} ha ({:?})", area.hectares, area.method);
    if let Some(warning) = &area.warning {
        println!("  Warning: {}", warning);
    }

    let waypoints = waypoints_from_vertices(&parse.points);
    let stats = FlightStats::compute(&waypoints, &config.drone)?;

    println!("\n--- Route ---");
    println!("  Total distance: {:.0} m", stats.total_distance_m);
    println!("  Estimated flight time: {:.1} min", stats.flight_time_min);
    println!("  Battery used: {:.0}% ({:.0}% remaining)", stats.battery_used_pct, stats.battery_remaining_pct);
    println!("  Feasibility: {:?}", stats.feasibility);
    println!("  Estimated photos: ~{}", stats.estimated_photos);

    println!("\n--- Flight Log Legs ---");
    for leg in flight_legs(&waypoints) {
        println!(
            "  {:>3}. {} -> {}   {} {}  ->  {} {}",
            leg.index + 1,
            leg.from_label,
            leg.to_label,
            leg.from.latitude,
            leg.from.longitude,
            leg.to.latitude,
            leg.to.longitude,
        );
    }

    let kml = serializer_for(config.kml_backend).serialize(&waypoints, &label)?;
    let stem = Path::new(&input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("survey");
    let output = format!("{}_flight_plan.kml", stem);
    std::fs::write(&output, kml)?;

    println!("\nFlight plan written to {}", output);

    Ok(())
}
