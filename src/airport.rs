//! Nearest airport lookup
//!
//! A specialization of the place search restricted to the "airport"
//! category. The provider's first result is trusted as closest; results
//! are not re-ranked by computed distance.

use reqwest::Client;
use tracing::warn;

use crate::config::GoogleConfig;
use crate::distance;
use crate::error::LocaleError;
use crate::models::{AirportInfo, Coordinate};
use crate::places::{CircleArea, NearbySearchRequest, PlaceSearchClient};

/// Provider ceiling for circle-restricted searches (meters)
const RADIUS_CEILING_METERS: f64 = 50_000.0;

/// Results requested; only the first is used
const MAX_RESULT_COUNT: u32 = 5;

/// Fields requested from the provider for airport lookups
const AIRPORT_FIELD_MASK: &str = "places.displayName,places.location";

/// Finder for the nearest airport around a coordinate
pub struct AirportFinder {
    places: PlaceSearchClient,
}

impl AirportFinder {
    /// Create a new finder sharing the service-wide HTTP client
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            places: PlaceSearchClient::new(client, config),
        }
    }

    /// Find the nearest airport within the provider's maximum search circle.
    pub async fn nearest(&self, center: &Coordinate) -> AirportInfo {
        self.nearest_within(center, RADIUS_CEILING_METERS).await
    }

    /// Find the nearest airport within a radius, capped at the provider
    /// ceiling.
    ///
    /// Zero results yield `{"None nearby", "N/A"}`; a failed request
    /// yields `{"Error", "N/A"}`.
    pub async fn nearest_within(&self, center: &Coordinate, radius_meters: f64) -> AirportInfo {
        let radius_meters = radius_meters.min(RADIUS_CEILING_METERS);

        match self.try_nearest(center, radius_meters).await {
            Ok(Some(airport)) => airport,
            Ok(None) => AirportInfo {
                name: "None nearby".to_string(),
                distance_miles: "N/A".to_string(),
            },
            Err(e) => {
                warn!(
                    "Airport search failed for ({:.4}, {:.4}): {}",
                    center.latitude, center.longitude, e
                );
                AirportInfo {
                    name: "Error".to_string(),
                    distance_miles: "N/A".to_string(),
                }
            }
        }
    }

    async fn try_nearest(
        &self,
        center: &Coordinate,
        radius_meters: f64,
    ) -> Result<Option<AirportInfo>, LocaleError> {
        let body = NearbySearchRequest {
            included_types: vec!["airport"],
            max_result_count: MAX_RESULT_COUNT,
            rank_preference: None,
            location_restriction: CircleArea::new(center, radius_meters),
        };

        let response = self
            .places
            .post("places:searchNearby", AIRPORT_FIELD_MASK, &body)
            .await?;

        let Some(closest) = response.places.into_iter().next() else {
            return Ok(None);
        };

        let location = closest
            .location
            .ok_or_else(|| LocaleError::parse("airport record is missing a coordinate"))?;

        let airport_coordinate = Coordinate::new(location.latitude, location.longitude);
        let miles = distance::round_miles(distance::miles_between(center, &airport_coordinate), 1);

        Ok(Some(AirportInfo {
            name: closest
                .display_name
                .map_or_else(|| "Unknown".to_string(), |name| name.text),
            distance_miles: format!("{miles:.1} mi"),
        }))
    }
}
