// src/geocoder.rs

use crate::config::GeocoderConfig;
use crate::domain::Coordinates;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Place-name to coordinate lookup.
///
/// Implementations never fail loudly: "no match" and "provider error"
/// both come back as `None`.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, city: &str, county: &str, state: &str) -> Option<Coordinates>;
}

pub fn place_query(city: &str, county: &str, state: &str) -> String {
    format!("{}, {}, {}", city.trim(), county.trim(), state.trim())
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(cfg: &GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn lookup(&self, query: &str) -> Result<Option<Coordinates>, String> {
        let resp = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| format!("request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("provider returned {}", resp.status()));
        }

        let body = resp.text().map_err(|e| format!("reading body failed: {e}"))?;
        parse_search_response(&body)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, city: &str, county: &str, state: &str) -> Option<Coordinates> {
        if city.trim().is_empty() {
            return None;
        }

        let query = place_query(city, county, state);
        match self.lookup(&query) {
            Ok(Some(coords)) => {
                log::debug!("geocoded '{query}' to {coords:?}");
                Some(coords)
            }
            Ok(None) => {
                log::warn!("no geocoding match for '{query}'");
                None
            }
            Err(e) => {
                log::warn!("geocoding '{query}' failed: {e}");
                None
            }
        }
    }
}

/// Nominatim answers with a JSON array of places; coordinates are strings.
fn parse_search_response(body: &str) -> Result<Option<Coordinates>, String> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| format!("unexpected response shape: {e}"))?;

    let Some(first) = places.first() else {
        return Ok(None);
    };

    let latitude = first
        .lat
        .parse::<f64>()
        .map_err(|e| format!("bad latitude '{}': {e}", first.lat))?;
    let longitude = first
        .lon
        .parse::<f64>()
        .map_err(|e| format!("bad longitude '{}': {e}", first.lon))?;

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_city_county_state() {
        assert_eq!(
            place_query(" Madison", "Dane ", "Wisconsin"),
            "Madison, Dane, Wisconsin"
        );
    }

    #[test]
    fn parses_first_place() {
        let body = r#"[
            {"place_id": 1, "lat": "43.0747", "lon": "-89.3841", "display_name": "Madison"},
            {"place_id": 2, "lat": "0", "lon": "0"}
        ]"#;
        let coords = parse_search_response(body).unwrap().unwrap();
        assert_eq!(coords.latitude, 43.0747);
        assert_eq!(coords.longitude, -89.3841);
    }

    #[test]
    fn empty_array_is_no_match() {
        assert_eq!(parse_search_response("[]").unwrap(), None);
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(parse_search_response("<html>rate limited</html>").is_err());
        assert!(parse_search_response(r#"[{"lat": "north", "lon": "1"}]"#).is_err());
    }

    #[test]
    fn unreachable_provider_yields_none() {
        let geocoder = NominatimGeocoder::new(&GeocoderConfig {
            base_url: "http://127.0.0.1:9".into(),
            user_agent: "volunteer_directory-tests".into(),
            timeout_secs: 2,
        })
        .unwrap();
        assert_eq!(geocoder.geocode("Madison", "Dane", "Wisconsin"), None);
    }

    #[test]
    fn blank_city_skips_lookup() {
        let geocoder = NominatimGeocoder::new(&GeocoderConfig {
            base_url: "http://127.0.0.1:9".into(),
            user_agent: "volunteer_directory-tests".into(),
            timeout_secs: 2,
        })
        .unwrap();
        assert_eq!(geocoder.geocode("  ", "Dane", "Wisconsin"), None);
    }
}
