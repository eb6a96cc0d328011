use anyhow::{Context, Result};
use geo::{BooleanOps, Centroid, Coord, LineString, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::collect::global_variables::get_temp_path;
use crate::collect::osm::models::PlaceMetadata;
use crate::geometric::grid::{sample_grid, CentroidPoint, GridError};

#[cfg(feature = "reqwest")]
use crate::collect::osm::{models::NominatimQuery, nominatim_collect::NominatimCollect};

/// How a custom polygon is combined with the administrative shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeCombination {
    #[default]
    Union,
    Intersection,
}

/// Administrative boundary of a place, as returned by Nominatim
/// Holds the boundary shape and the last centroid grid computed over it
pub struct OsmBoundary {
    metadata: PlaceMetadata,
    shape: MultiPolygon<f64>,
    centroids: Option<Vec<CentroidPoint>>,
    output_path: PathBuf,
}

impl OsmBoundary {
    /// Fetch the first administrative place matching `query` and build its boundary
    #[cfg(feature = "reqwest")]
    pub fn fetch(
        query: &NominatimQuery,
        custom_shape: Option<Polygon<f64>>,
        combination: ShapeCombination,
    ) -> Result<Self> {
        let mut collect = NominatimCollect::new();
        Self::fetch_with(&mut collect, query, custom_shape, combination)
    }

    /// Same as [`OsmBoundary::fetch`] with a configured client
    #[cfg(feature = "reqwest")]
    pub fn fetch_with(
        collect: &mut NominatimCollect,
        query: &NominatimQuery,
        custom_shape: Option<Polygon<f64>>,
        combination: ShapeCombination,
    ) -> Result<Self> {
        let metadata = collect
            .fetch_administrative(query)
            .context("Failed to fetch administrative boundary from Nominatim")?;
        Self::from_metadata(metadata, custom_shape, combination)
    }

    /// Build the boundary from a Nominatim place carrying a GeoJSON geometry
    pub fn from_metadata(
        metadata: PlaceMetadata,
        custom_shape: Option<Polygon<f64>>,
        combination: ShapeCombination,
    ) -> Result<Self> {
        let geometry = metadata
            .geojson
            .as_ref()
            .context("Place has no GeoJSON geometry (request it with polygon_geojson=1)")?;
        let mut shape = multi_polygon_from_geojson(&geometry.value)?;

        if let Some(custom) = custom_shape {
            shape = match combination {
                ShapeCombination::Union => shape.union(&MultiPolygon::new(vec![custom])),
                ShapeCombination::Intersection => {
                    shape.intersection(&MultiPolygon::new(vec![custom]))
                }
            };
        }

        Ok(OsmBoundary {
            metadata,
            shape,
            centroids: None,
            output_path: get_temp_path(),
        })
    }

    pub fn set_output_path(&mut self, output_path: impl Into<PathBuf>) {
        self.output_path = output_path.into();
    }

    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn metadata(&self) -> &PlaceMetadata {
        &self.metadata
    }

    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    pub fn osm_id(&self) -> Option<u64> {
        self.metadata.osm_id
    }

    /// Center of the place as (lat, lng)
    ///
    /// With `administrative`, the center Nominatim reports for the place;
    /// otherwise the geometric centroid of the boundary shape.
    pub fn geo_center_location(&self, administrative: bool) -> Result<(f64, f64)> {
        if administrative {
            let lat = parse_coordinate(self.metadata.lat.as_deref(), "lat")?;
            let lng = parse_coordinate(self.metadata.lon.as_deref(), "lon")?;
            return Ok((lat, lng));
        }

        let centroid = self
            .shape
            .centroid()
            .context("Boundary shape is empty, no centroid")?;
        Ok((centroid.y(), centroid.x()))
    }

    /// Equidistant grid of points inside the boundary, cached for later use
    pub fn find_geo_centroids(
        &mut self,
        radius_m: f64,
        superposition_m: f64,
    ) -> Result<&[CentroidPoint], GridError> {
        let centroids = sample_grid(&self.shape, radius_m, superposition_m)?;
        info!(
            "Found {} centroids for radius {} m (overlap {} m)",
            centroids.len(),
            radius_m,
            superposition_m
        );
        Ok(self.centroids.insert(centroids).as_slice())
    }

    /// Centroids of the last successful [`OsmBoundary::find_geo_centroids`]
    pub fn centroids(&self) -> Option<&[CentroidPoint]> {
        self.centroids.as_deref()
    }

    /// Boundary feature followed by one point feature per cached centroid
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut boundary_properties = JsonObject::new();
        boundary_properties.insert("role".to_string(), "boundary".into());
        if let Some(name) = &self.metadata.display_name {
            boundary_properties.insert("display_name".to_string(), name.clone().into());
        }
        if let Some(osm_id) = self.metadata.osm_id {
            boundary_properties.insert("osm_id".to_string(), osm_id.into());
        }

        let mut features = vec![Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&self.shape))),
            id: None,
            properties: Some(boundary_properties),
            foreign_members: None,
        }];

        for centroid in self.centroids.iter().flatten() {
            let mut properties = JsonObject::new();
            properties.insert("role".to_string(), "centroid".into());
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![centroid.lng, centroid.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    /// Save boundary and centroids to `<output_path>/<name>.geojson`
    pub fn to_geojson(&self, name: Option<&str>) -> Result<PathBuf> {
        let name = name.unwrap_or("boundary");

        std::fs::create_dir_all(&self.output_path)
            .context(format!("Failed to create directory: {:?}", self.output_path))?;

        let output_file = self.output_path.join(format!("{}.geojson", name));
        let geojson = GeoJson::FeatureCollection(self.to_feature_collection());
        std::fs::write(&output_file, geojson.to_string())
            .context(format!("Failed to write GeoJSON file: {:?}", output_file))?;

        info!("Boundary saved to: {:?}", output_file);
        Ok(output_file)
    }
}

fn parse_coordinate(value: Option<&str>, field: &str) -> Result<f64> {
    let raw = value.with_context(|| format!("Place metadata has no '{}'", field))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid '{}' in place metadata: {}", field, raw))
}

/// Convert a GeoJSON Polygon / MultiPolygon into a `geo` MultiPolygon, keeping holes
pub fn multi_polygon_from_geojson(value: &Value) -> Result<MultiPolygon<f64>> {
    match value {
        Value::Polygon(rings) => Ok(MultiPolygon::new(vec![polygon_from_rings(rings)?])),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| polygon_from_rings(rings))
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon::new),
        other => anyhow::bail!(
            "Unsupported boundary geometry {}: expected Polygon or MultiPolygon",
            geometry_type_name(other)
        ),
    }
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
    let (exterior, interiors) = rings
        .split_first()
        .context("Polygon without exterior ring")?;
    let exterior = line_string_from_positions(exterior)?;
    let interiors = interiors
        .iter()
        .map(|ring| line_string_from_positions(ring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn line_string_from_positions(positions: &[Vec<f64>]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => anyhow::bail!("Position with fewer than two coordinates: {:?}", position),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
