//! Geocoding client
//!
//! Resolves a free-text location string to a canonical address and
//! coordinate pair. Failure to resolve is a signaled absence of data, not
//! an error: callers get `None` and decide what that means for them.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GoogleConfig;
use crate::error::LocaleError;
use crate::models::{Coordinate, ResolvedLocation};

/// Client for the geocoding provider
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Geocoding response envelope
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodingClient {
    /// Create a new client sharing the service-wide HTTP client
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.geocoding_base_url.clone(),
        }
    }

    /// Resolve a location string to a canonical address and coordinate.
    ///
    /// Returns `None` on provider error, non-success status, or an empty
    /// result list. One outbound HTTP call, attempted exactly once.
    pub async fn resolve(&self, location: &str) -> Option<ResolvedLocation> {
        match self.try_resolve(location).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Geocoding failed for '{}': {}", location, e);
                None
            }
        }
    }

    async fn try_resolve(
        &self,
        location: &str,
    ) -> Result<Option<ResolvedLocation>, LocaleError> {
        let url = format!(
            "{}?address={}&key={}",
            self.base_url,
            urlencoding::encode(location),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LocaleError::provider(format!(
                "geocoding request returned HTTP {}",
                response.status()
            )));
        }

        let geocode: GeocodeResponse = response.json().await?;

        if geocode.status != "OK" {
            debug!(
                "Geocoder returned status '{}' for '{}'",
                geocode.status, location
            );
            return Ok(None);
        }

        let Some(result) = geocode.results.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(ResolvedLocation {
            formatted_address: result.formatted_address,
            coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
        }))
    }
}
