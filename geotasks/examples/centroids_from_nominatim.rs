use anyhow::Result;
use geotasks::collect::osm::models::NominatimQuery;
use geotasks::{OsmBoundary, ShapeCombination};
use tracing_subscriber::EnvFilter;

/// Example: equidistant centroid grid over the administrative boundary of a city
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Example: centroid grid from Nominatim ===\n");

    let query = NominatimQuery::default()
        .with_city("La Rochelle")
        .with_country("France");

    println!("Fetching administrative boundary...");
    let mut boundary = OsmBoundary::fetch(&query, None, ShapeCombination::Union)?;

    if let Some(name) = &boundary.metadata().display_name {
        println!("  - Place: {}", name);
    }
    let (lat, lng) = boundary.geo_center_location(false)?;
    println!("  - Geometric center: ({:.5}, {:.5})", lat, lng);
    let (lat, lng) = boundary.geo_center_location(true)?;
    println!("  - Administrative center: ({:.5}, {:.5})", lat, lng);

    // 500 m circles overlapping by 100 m
    let centroids = boundary.find_geo_centroids(500.0, 100.0)?;
    println!("\n{} centroids found", centroids.len());
    for c in centroids.iter().take(5) {
        println!("  ({:.5}, {:.5})", c.lat, c.lng);
    }

    boundary.set_output_path("./output");
    let path = boundary.to_geojson(Some("la_rochelle_centroids"))?;
    println!("\nSaved to {:?}", path);

    Ok(())
}
