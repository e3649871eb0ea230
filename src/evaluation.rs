//! Evaluation orchestrator
//!
//! The core entry point: resolves the location, fans out to the place
//! search, climate archive, and airport lookup, and merges everything
//! into one report. Only an unresolvable location aborts an evaluation;
//! every other upstream failure degrades to its component's documented
//! fallback value.

use anyhow::{Context, Result};
use futures::future;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::airport::AirportFinder;
use crate::climate::ClimateClient;
use crate::config::LocaleConfig;
use crate::criteria;
use crate::distance;
use crate::geocoding::GeocodingClient;
use crate::models::{EvaluationOutcome, EvaluationReport, TransportationInfo};
use crate::places::PlaceSearchClient;

/// One evaluation request
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    /// Address or city name to evaluate
    pub location: String,
    /// Search radius in miles
    pub radius_miles: f64,
    /// Criterion keys to evaluate; `None` selects all predefined criteria
    pub criteria: Option<Vec<String>>,
    /// Free-text amenity queries
    pub custom_amenities: Vec<String>,
    /// Minimum restaurant rating; 0 disables rating filtering
    pub restaurant_min_rating: f64,
}

/// Evaluates locations against the upstream providers
pub struct Evaluator {
    geocoder: GeocodingClient,
    places: PlaceSearchClient,
    climate: ClimateClient,
    airports: AirportFinder,
}

impl Evaluator {
    /// Build an evaluator and its provider clients from configuration
    pub fn from_config(config: &LocaleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds.into()))
            .user_agent(concat!("Locale/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            geocoder: GeocodingClient::new(client.clone(), &config.google),
            places: PlaceSearchClient::new(client.clone(), &config.google),
            climate: ClimateClient::new(client.clone(), &config.climate),
            airports: AirportFinder::new(client, &config.google),
        })
    }

    /// Evaluate a location: geocode, fan out, merge.
    ///
    /// The independent upstream calls run concurrently purely as a latency
    /// optimization; results are merged into the report by key, so ordering
    /// and content do not depend on arrival order.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationOutcome {
        info!(
            "Evaluating '{}' within {} miles",
            request.location, request.radius_miles
        );

        let Some(resolved) = self.geocoder.resolve(&request.location).await else {
            info!("Location '{}' could not be resolved", request.location);
            return EvaluationOutcome::LocationNotFound;
        };

        debug!(
            "Resolved '{}' to {} at ({:.4}, {:.4})",
            request.location,
            resolved.formatted_address,
            resolved.coordinate.latitude,
            resolved.coordinate.longitude
        );

        let center = resolved.coordinate;
        let radius_meters = distance::miles_to_meters(request.radius_miles);

        let category_searches = selected_criteria(request).into_iter().map(|(key, place_type)| {
            let min_rating = (key == "restaurants" && request.restaurant_min_rating > 0.0)
                .then_some(request.restaurant_min_rating);
            async move {
                let result = self
                    .places
                    .search_category(&center, place_type, radius_meters, min_rating)
                    .await;
                (key, result)
            }
        });

        let custom_searches = trimmed_queries(&request.custom_amenities)
            .into_iter()
            .map(|query| async move {
                let result = self.places.search_text(&center, query, radius_meters).await;
                (query.to_string(), result)
            });

        let (category_results, custom_results, climate, airport) = tokio::join!(
            future::join_all(category_searches),
            future::join_all(custom_searches),
            self.climate.summarize(&center),
            self.airports.nearest(&center),
        );

        let amenities: BTreeMap<_, _> = category_results
            .into_iter()
            .chain(custom_results)
            .collect();

        EvaluationOutcome::Report(Box::new(EvaluationReport {
            location: resolved.formatted_address,
            coordinates: center,
            radius_miles: request.radius_miles,
            climate,
            amenities,
            transportation: TransportationInfo::from(airport),
        }))
    }
}

/// Selected criteria with their provider place types.
///
/// Keys absent from the predefined table are skipped; no criteria given
/// selects the whole table.
fn selected_criteria(request: &EvaluationRequest) -> Vec<(String, &'static str)> {
    match &request.criteria {
        Some(keys) => keys
            .iter()
            .filter_map(|key| criteria::place_type_for(key).map(|t| (key.clone(), t)))
            .collect(),
        None => criteria::CRITERIA
            .iter()
            .map(|(key, place_type)| ((*key).to_string(), *place_type))
            .collect(),
    }
}

/// Non-empty custom queries, whitespace-trimmed.
fn trimmed_queries(queries: &[String]) -> Vec<&str> {
    queries
        .iter()
        .map(|query| query.trim())
        .filter(|query| !query.is_empty())
        .collect()
}
