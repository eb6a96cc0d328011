use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::collect::global_variables::{NOMINATIM_BASE_URL, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::collect::osm::models::{select_administrative, NominatimQuery, PlaceMetadata};

/// Client for the Nominatim lookup / search API
/// Keeps the raw body of the last response in `content`
pub struct NominatimCollect {
    pub content: Option<Vec<u8>>,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl NominatimCollect {
    pub fn new() -> Self {
        NominatimCollect {
            content: None,
            base_url: NOMINATIM_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Use another Nominatim instance (e.g. a self-hosted one)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL: base + endpoint + encoded query string
    pub fn build_request_url(&self, query: &NominatimQuery) -> Result<Url> {
        let endpoint = format!("{}/{}", self.base_url.trim_end_matches('/'), query.endpoint());
        Url::parse_with_params(&endpoint, query.to_pairs())
            .with_context(|| format!("Invalid Nominatim URL: {}", endpoint))
    }

    /// Send the request and parse the JSON array of places
    pub fn execute(&mut self, query: &NominatimQuery) -> Result<Vec<PlaceMetadata>> {
        let request_url = self.build_request_url(query)?;
        info!("Nominatim request: {}", request_url);

        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let response = client
            .get(request_url.clone())
            .send()
            .with_context(|| format!("Failed to send Nominatim request to {}", request_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Nominatim API returned error {}: {}", status, body);
        }

        let content_bytes = response
            .bytes()
            .context("Failed to read response body")?
            .to_vec();

        let results = self.store_content(content_bytes)?;
        debug!("Nominatim returned {} places", results.len());
        Ok(results)
    }

    /// Keep the raw body, even when it is not valid JSON, then parse it
    fn store_content(&mut self, content_bytes: Vec<u8>) -> Result<Vec<PlaceMetadata>> {
        let content = self.content.insert(content_bytes);
        Self::parse_results(content)
    }

    /// First administrative place matching `query`
    pub fn fetch_administrative(&mut self, query: &NominatimQuery) -> Result<PlaceMetadata> {
        let results = self.execute(query)?;
        let total = results.len();
        match select_administrative(results) {
            Some(place) => {
                info!(
                    "Administrative boundary: {}",
                    place.display_name.as_deref().unwrap_or("<unnamed>")
                );
                Ok(place)
            }
            None => {
                warn!("None of the {} Nominatim results is administrative", total);
                anyhow::bail!("No administrative boundary found for query {:?}", query)
            }
        }
    }

    /// Parse a Nominatim JSON response body
    pub fn parse_results(content: &[u8]) -> Result<Vec<PlaceMetadata>> {
        serde_json::from_slice(content).context("Failed to parse Nominatim JSON response")
    }

    /// Get the content as a string (for debugging)
    pub fn content_as_string(&self) -> Result<String> {
        let content = self.content.as_ref().context("No content available")?;
        String::from_utf8(content.clone()).context("Content is not valid UTF-8")
    }
}

impl Default for NominatimCollect {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_collect_new() {
        let collect = NominatimCollect::new();
        assert_eq!(collect.base_url(), "https://nominatim.openstreetmap.org");
        assert!(collect.content.is_none());
        assert!(collect.content_as_string().is_err());
    }

    #[test]
    fn test_build_lookup_url() {
        let collect = NominatimCollect::new();
        let url = collect
            .build_request_url(&NominatimQuery::by_osm_ids("R117858"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/lookup?osm_ids=R117858&polygon_geojson=1&format=json"
        );
    }

    #[test]
    fn test_build_search_url_encodes_values() {
        let collect = NominatimCollect::new().with_base_url("http://localhost:8080/");
        let query = NominatimQuery::default()
            .with_city("La Rochelle")
            .with_state("Nouvelle-Aquitaine");
        let url = collect.build_request_url(&query).unwrap();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("city".to_string(), "La Rochelle".to_string()),
                ("state".to_string(), "Nouvelle-Aquitaine".to_string()),
                ("polygon_geojson".to_string(), "1".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
        assert!(url.as_str().starts_with("http://localhost:8080/search?city=La+Rochelle"));
    }

    #[test]
    fn test_invalid_base_url() {
        let collect = NominatimCollect::new().with_base_url("not a url");
        assert!(collect.build_request_url(&NominatimQuery::free_form("x")).is_err());
    }

    #[test]
    fn test_unparseable_body_is_kept_for_debugging() {
        let mut collect = NominatimCollect::new();
        let body = b"<html>503 Service Unavailable</html>".to_vec();
        assert!(collect.store_content(body).is_err());
        assert_eq!(
            collect.content_as_string().unwrap(),
            "<html>503 Service Unavailable</html>"
        );

        let places = collect
            .store_content(br#"[{"type": "administrative"}]"#.to_vec())
            .unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(
            collect.content_as_string().unwrap(),
            r#"[{"type": "administrative"}]"#
        );
    }

    #[test]
    fn test_parse_results() {
        let body = br#"[{"osm_id": 1, "type": "administrative", "lat": "1.0", "lon": "2.0"}]"#;
        let results = NominatimCollect::parse_results(body).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_administrative());

        assert!(NominatimCollect::parse_results(b"{\"error\": \"x\"}").is_err());
    }
}
