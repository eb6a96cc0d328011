use anyhow::{Context, Result};
use geojson::GeoJson;
use geotasks::geometric::boundary::multi_polygon_from_geojson;
use geotasks::sample_grid;
use tracing_subscriber::EnvFilter;

/// Example: centroid grid over a polygon read from a GeoJSON file (no network)
///
/// Usage: cargo run --example grid_from_geojson -- <file.geojson> [radius_m] [overlap_m]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("Missing GeoJSON file argument")?;
    let radius_m: f64 = match args.next() {
        Some(raw) => raw.parse().context("Invalid radius")?,
        None => 1000.0,
    };
    let overlap_m: f64 = match args.next() {
        Some(raw) => raw.parse().context("Invalid overlap")?,
        None => 0.0,
    };

    let content = std::fs::read_to_string(&path).context(format!("Failed to read {}", path))?;
    let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature.geometry.context("Feature without geometry")?,
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .find_map(|f| f.geometry)
            .context("FeatureCollection without geometry")?,
    };
    let shape = multi_polygon_from_geojson(&geometry.value)?;

    let centroids = sample_grid(&shape, radius_m, overlap_m)?;
    println!("lat,lng");
    for c in &centroids {
        println!("{},{}", c.lat, c.lng);
    }

    Ok(())
}
