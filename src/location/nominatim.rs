//! Reverse geocoding against an OpenStreetMap Nominatim server

use super::{Address, ReverseGeocoder};
use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use crate::gps::GpsCoordinate;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Body of a `/reverse` response; only the parts we consult
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking Nominatim client
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    endpoint: String,
    language: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build();

        Self {
            agent,
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
        }
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse(&self, coordinate: GpsCoordinate) -> Result<Option<Address>> {
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            endpoint = %self.endpoint,
            "Reverse geocoding request"
        );

        let response = self
            .agent
            .get(&self.endpoint)
            .query("format", "jsonv2")
            .query("lat", &coordinate.latitude.to_string())
            .query("lon", &coordinate.longitude.to_string())
            .query("addressdetails", "1")
            .query("accept-language", &self.language)
            .call()
            .map_err(|e| Error::Geocode(e.to_string()))?;

        let body = response.into_string()?;
        parse_reverse_response(&body)
    }
}

/// Decode a `/reverse` JSON body.
///
/// Nominatim answers coordinates it cannot place (open sea, for example) with
/// an `error` member; that is "no address", not a failure.
fn parse_reverse_response(body: &str) -> Result<Option<Address>> {
    let response: ReverseResponse = serde_json::from_str(body)
        .map_err(|e| Error::Geocode(format!("invalid response body: {}", e)))?;

    if let Some(message) = response.error {
        debug!(%message, "Geocoder returned no result");
        return Ok(None);
    }

    Ok(response.address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_response() {
        let body = r#"{
            "place_id": 123,
            "display_name": "Berlin, Deutschland",
            "address": {
                "city": "Berlin",
                "state": "Berlin",
                "country": "Deutschland",
                "country_code": "de"
            }
        }"#;

        let address = parse_reverse_response(body).unwrap().unwrap();
        assert_eq!(address.city.as_deref(), Some("Berlin"));
        assert_eq!(address.town, None);
        assert_eq!(address.place_name(), Some("Berlin"));
    }

    #[test]
    fn test_parse_village_response() {
        let body = r#"{"address": {"village": "Hallstatt", "county": "Bezirk Gmunden"}}"#;
        let address = parse_reverse_response(body).unwrap().unwrap();
        assert_eq!(address.place_name(), Some("Hallstatt"));
    }

    #[test]
    fn test_parse_unable_to_geocode() {
        let body = r#"{"error": "Unable to geocode"}"#;
        assert_eq!(parse_reverse_response(body).unwrap(), None);
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(matches!(
            parse_reverse_response("<html>busy</html>"),
            Err(Error::Geocode(_))
        ));
    }

    #[test]
    fn test_unreachable_server_is_an_error() {
        let config = GeocoderConfig {
            // Port 9 (discard) on loopback; nothing listens there in CI
            endpoint: "http://127.0.0.1:9/reverse".into(),
            timeout_secs: 1,
            ..GeocoderConfig::default()
        };
        let geocoder = NominatimGeocoder::new(&config);

        let result = geocoder.reverse(GpsCoordinate::new(52.52, 13.405));
        assert!(matches!(result, Err(Error::Geocode(_))));
    }
}
