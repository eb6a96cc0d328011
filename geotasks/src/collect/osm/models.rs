use serde::{Deserialize, Serialize};

/// Place type Nominatim reports for administrative boundaries
pub const ADMINISTRATIVE_TYPE: &str = "administrative";

/// Parameters of a Nominatim lookup / search request
/// Only the fields that are set are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominatimQuery {
    /// Comma separated typed OSM ids (e.g. "R146656"), selects the lookup endpoint
    pub osm_ids: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    /// Free-form query
    pub q: Option<String>,
}

impl NominatimQuery {
    pub fn by_osm_ids(osm_ids: impl Into<String>) -> Self {
        NominatimQuery {
            osm_ids: Some(osm_ids.into()),
            ..Default::default()
        }
    }

    pub fn free_form(q: impl Into<String>) -> Self {
        NominatimQuery {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Endpoint name: "lookup" when OSM ids are given, "search" otherwise
    pub fn endpoint(&self) -> &'static str {
        match self.osm_ids.as_deref() {
            Some(ids) if !ids.is_empty() => "lookup",
            _ => "search",
        }
    }

    /// Query string pairs, always asking for GeoJSON polygons in JSON format
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("osm_ids", &self.osm_ids),
            ("country", &self.country),
            ("city", &self.city),
            ("county", &self.county),
            ("state", &self.state),
            ("q", &self.q),
        ];

        let mut pairs: Vec<(&'static str, String)> = optional
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
            .collect();
        pairs.push(("polygon_geojson", "1".to_string()));
        pairs.push(("format", "json".to_string()));
        pairs
    }
}

/// One place returned by Nominatim (format=json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceMetadata {
    pub place_id: Option<u64>,
    pub osm_type: Option<String>,
    pub osm_id: Option<u64>,
    /// Administrative center latitude, sent as a decimal string
    pub lat: Option<String>,
    /// Administrative center longitude, sent as a decimal string
    pub lon: Option<String>,
    pub display_name: Option<String>,
    #[serde(alias = "category")]
    pub class: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub importance: Option<f64>,
    /// [min_lat, max_lat, min_lon, max_lon] as decimal strings
    pub boundingbox: Option<Vec<String>>,
    /// Present when requested with polygon_geojson=1
    pub geojson: Option<geojson::Geometry>,
}

impl PlaceMetadata {
    pub fn is_administrative(&self) -> bool {
        self.place_type.as_deref() == Some(ADMINISTRATIVE_TYPE)
    }
}

/// First administrative place of a Nominatim response, in response order
pub fn select_administrative(results: Vec<PlaceMetadata>) -> Option<PlaceMetadata> {
    results.into_iter().find(PlaceMetadata::is_administrative)
}
