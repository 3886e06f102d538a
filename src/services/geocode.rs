// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place-name search (Nominatim-compatible) used to recenter the map.

use crate::models::coords::LatLng;
use serde::Deserialize;

/// Nominatim asks every client to identify itself.
const USER_AGENT: &str = concat!("fieldwatch/", env!("CARGO_PKG_VERSION"));

/// Geocoding API client.
#[derive(Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: &str) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GeocodingError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a free-text place name to its best match, if any.
    pub async fn search(&self, query: &str) -> Result<Option<LatLng>, GeocodingError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .await
            .map_err(|e| GeocodingError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Request(format!("HTTP {}: {}", status, body)));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(query, "No geocoding match");
            return Ok(None);
        };

        let point = place.to_latlng()?;
        tracing::debug!(query, lat = point.lat, lng = point.lng, "Geocoded place");
        Ok(Some(point))
    }
}

/// Search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn to_latlng(&self) -> Result<LatLng, GeocodingError> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GeocodingError::Parse(format!("invalid coordinate '{}'", raw)))
        };
        Ok(LatLng::new(parse(&self.lat)?, parse(&self.lon)?))
    }
}

/// Errors from geocoding.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Failed to parse geocoding response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_parses_string_coordinates() {
        let place: Place =
            serde_json::from_str(r#"{"lat":"23.0225","lon":"72.5714","display_name":"Ahmedabad"}"#)
                .unwrap();
        assert_eq!(place.to_latlng().unwrap(), LatLng::new(23.0225, 72.5714));
    }

    #[test]
    fn test_place_rejects_garbage() {
        let place = Place {
            lat: "north".to_string(),
            lon: "72.5".to_string(),
        };
        assert!(matches!(place.to_latlng(), Err(GeocodingError::Parse(_))));
    }
}
