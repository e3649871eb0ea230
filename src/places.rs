//! Place search client
//!
//! Queries the place-search provider for places of a category or matching
//! a free-text query within a radius, then normalizes, filters, and ranks
//! the results. A failed search degrades to an empty result so that one
//! bad category never aborts a whole evaluation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GoogleConfig;
use crate::distance;
use crate::error::LocaleError;
use crate::models::{Coordinate, CriterionResult, PlaceResult};

/// Provider limit per request
const MAX_RESULT_COUNT: u32 = 20;

/// Fields requested from the provider for amenity searches
const PLACE_FIELD_MASK: &str =
    "places.displayName,places.rating,places.location,places.types,places.googleMapsUri";

/// Client for the place-search provider
pub struct PlaceSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Circle-bounded search area
#[derive(Debug, Serialize)]
pub(crate) struct CircleArea {
    pub circle: Circle,
}

#[derive(Debug, Serialize)]
pub(crate) struct Circle {
    pub center: LatLngParam,
    pub radius: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LatLngParam {
    pub latitude: f64,
    pub longitude: f64,
}

impl CircleArea {
    pub(crate) fn new(center: &Coordinate, radius_meters: f64) -> Self {
        Self {
            circle: Circle {
                center: LatLngParam {
                    latitude: center.latitude,
                    longitude: center.longitude,
                },
                radius: radius_meters,
            },
        }
    }
}

/// Category search request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NearbySearchRequest<'a> {
    pub included_types: Vec<&'a str>,
    pub max_result_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_preference: Option<&'a str>,
    pub location_restriction: CircleArea,
}

/// Free-text search request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextSearchRequest<'a> {
    text_query: &'a str,
    max_result_count: u32,
    rank_preference: &'a str,
    location_bias: CircleArea,
}

/// Search response envelope
#[derive(Debug, Deserialize, Default)]
pub(crate) struct PlacesResponse {
    #[serde(default)]
    pub places: Vec<ProviderPlace>,
}

/// One place as reported by the provider
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProviderPlace {
    pub display_name: Option<DisplayName>,
    pub rating: Option<f64>,
    pub location: Option<PlaceLatLng>,
    #[serde(default)]
    pub types: Vec<String>,
    pub google_maps_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DisplayName {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceLatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceSearchClient {
    /// Create a new client sharing the service-wide HTTP client
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.places_base_url.clone(),
        }
    }

    /// Search for places of a provider category within a radius.
    ///
    /// Results are ranked by the provider by distance, except restaurant
    /// searches with a minimum rating, which rank by popularity so the
    /// better-reviewed results surface before the rating filter applies.
    /// Degrades to an empty result on any request failure.
    pub async fn search_category(
        &self,
        center: &Coordinate,
        place_type: &str,
        radius_meters: f64,
        min_rating: Option<f64>,
    ) -> CriterionResult {
        let min_rating = min_rating.filter(|rating| *rating > 0.0);

        match self
            .try_search_category(center, place_type, radius_meters, min_rating)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("Place search failed for type '{}': {}", place_type, e);
                CriterionResult::empty()
            }
        }
    }

    /// Search for places matching a free-text query near a coordinate.
    ///
    /// The provider treats the circle as a bias, not a boundary, so results
    /// are post-filtered to those within the requested radius. Degrades to
    /// an empty result on any request failure.
    pub async fn search_text(
        &self,
        center: &Coordinate,
        query: &str,
        radius_meters: f64,
    ) -> CriterionResult {
        match self.try_search_text(center, query, radius_meters).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Text search failed for '{}': {}", query, e);
                CriterionResult::empty()
            }
        }
    }

    async fn try_search_category(
        &self,
        center: &Coordinate,
        place_type: &str,
        radius_meters: f64,
        min_rating: Option<f64>,
    ) -> Result<CriterionResult, LocaleError> {
        let rank_preference = if place_type == "restaurant" && min_rating.is_some() {
            "POPULARITY"
        } else {
            "DISTANCE"
        };

        let body = NearbySearchRequest {
            included_types: vec![place_type],
            max_result_count: MAX_RESULT_COUNT,
            rank_preference: Some(rank_preference),
            location_restriction: CircleArea::new(center, radius_meters),
        };

        let response = self
            .post("places:searchNearby", PLACE_FIELD_MASK, &body)
            .await?;

        let places = qualifying_category_places(center, response.places, place_type, min_rating);
        info!(
            "Found {} qualifying '{}' places within {:.0}m",
            places.len(),
            place_type,
            radius_meters
        );

        Ok(CriterionResult {
            count: places.len(),
            places,
        })
    }

    async fn try_search_text(
        &self,
        center: &Coordinate,
        query: &str,
        radius_meters: f64,
    ) -> Result<CriterionResult, LocaleError> {
        let body = TextSearchRequest {
            text_query: query,
            max_result_count: MAX_RESULT_COUNT,
            rank_preference: "DISTANCE",
            location_bias: CircleArea::new(center, radius_meters),
        };

        let response = self
            .post("places:searchText", PLACE_FIELD_MASK, &body)
            .await?;

        let places = places_within_radius(center, response.places, radius_meters);
        info!(
            "Found {} '{}' matches within {:.0}m",
            places.len(),
            query,
            radius_meters
        );

        Ok(CriterionResult {
            count: places.len(),
            places,
        })
    }

    /// POST a search body to the provider and decode the response envelope.
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        field_mask: &str,
        body: &B,
    ) -> Result<PlacesResponse, LocaleError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocaleError::provider(format!(
                "place search returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Category qualification rule.
///
/// The provider tags many convenience-adjacent places with "cafe" as a
/// secondary type, so that category requires the primary (first) type to
/// match; every other category accepts a match anywhere in the type list.
fn matches_category(place_type: &str, types: &[String]) -> bool {
    if place_type == "cafe" {
        types.first().map(String::as_str) == Some("cafe")
    } else {
        types.iter().any(|t| t == place_type)
    }
}

/// Normalize one provider record, skipping it when no coordinate is given.
fn to_place_result(center: &Coordinate, place: ProviderPlace) -> Option<PlaceResult> {
    let location = place.location?;
    let coordinate = Coordinate::new(location.latitude, location.longitude);

    Some(PlaceResult {
        name: place
            .display_name
            .map_or_else(|| "Unknown".to_string(), |name| name.text),
        distance_miles: distance::round_miles(distance::miles_between(center, &coordinate), 2),
        rating: place.rating,
        map_url: place.google_maps_uri.unwrap_or_default(),
        coordinate,
    })
}

/// Apply the category and rating rules, then sort closest-first.
fn qualifying_category_places(
    center: &Coordinate,
    places: Vec<ProviderPlace>,
    place_type: &str,
    min_rating: Option<f64>,
) -> Vec<PlaceResult> {
    let mut results: Vec<PlaceResult> = places
        .into_iter()
        .filter(|place| matches_category(place_type, &place.types))
        .filter(|place| match min_rating {
            Some(min) if place_type == "restaurant" => place.rating.unwrap_or(0.0) >= min,
            _ => true,
        })
        .filter_map(|place| to_place_result(center, place))
        .collect();

    sort_by_distance(&mut results);
    results
}

/// Normalize and enforce the radius as a hard cutoff, then sort.
fn places_within_radius(
    center: &Coordinate,
    places: Vec<ProviderPlace>,
    radius_meters: f64,
) -> Vec<PlaceResult> {
    let radius_miles = radius_meters / distance::METERS_PER_MILE;

    let mut results: Vec<PlaceResult> = places
        .into_iter()
        .filter_map(|place| to_place_result(center, place))
        .filter(|place| place.distance_miles <= radius_miles)
        .collect();

    sort_by_distance(&mut results);
    results
}

/// Stable ascending sort; provider order breaks ties.
fn sort_by_distance(places: &mut [PlaceResult]) {
    places.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_place(
        name: &str,
        lat: f64,
        lng: f64,
        rating: Option<f64>,
        types: &[&str],
    ) -> ProviderPlace {
        ProviderPlace {
            display_name: Some(DisplayName {
                text: name.to_string(),
            }),
            rating,
            location: Some(PlaceLatLng {
                latitude: lat,
                longitude: lng,
            }),
            types: types.iter().map(|t| (*t).to_string()).collect(),
            google_maps_uri: Some(format!("https://maps.example/{name}")),
        }
    }

    fn center() -> Coordinate {
        Coordinate::new(30.27, -97.74)
    }

    #[test]
    fn test_cafe_requires_primary_type() {
        let places = vec![
            provider_place("Real Cafe", 30.28, -97.74, Some(4.5), &["cafe", "store"]),
            provider_place(
                "Gas Stop",
                30.27,
                -97.75,
                Some(3.2),
                &["gas_station", "cafe"],
            ),
        ];

        let results = qualifying_category_places(&center(), places, "cafe", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Real Cafe");
    }

    #[test]
    fn test_non_cafe_category_matches_anywhere_in_type_list() {
        let places = vec![provider_place(
            "Corner Pharmacy",
            30.28,
            -97.74,
            None,
            &["store", "pharmacy"],
        )];

        let results = qualifying_category_places(&center(), places, "pharmacy", None);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_restaurant_min_rating_filter() {
        let places = vec![
            provider_place("Great Food", 30.28, -97.74, Some(4.6), &["restaurant"]),
            provider_place("Just Below", 30.27, -97.75, Some(3.9), &["restaurant"]),
            provider_place("Unrated Diner", 30.26, -97.74, None, &["restaurant"]),
        ];

        let results = qualifying_category_places(&center(), places, "restaurant", Some(4.0));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Great Food");
        assert!(results[0].rating.unwrap() >= 4.0);
    }

    #[test]
    fn test_rating_not_applied_to_other_categories() {
        let places = vec![provider_place(
            "Quiet Park",
            30.28,
            -97.74,
            None,
            &["park"],
        )];

        let results = qualifying_category_places(&center(), places, "park", Some(4.0));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_missing_coordinate_skips_record_only() {
        let mut no_location = provider_place("Ghost Gym", 0.0, 0.0, None, &["gym"]);
        no_location.location = None;
        let places = vec![
            no_location,
            provider_place("Iron Works", 30.28, -97.74, Some(4.1), &["gym"]),
        ];

        let results = qualifying_category_places(&center(), places, "gym", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Iron Works");
    }

    #[test]
    fn test_results_sorted_ascending_by_distance() {
        let places = vec![
            provider_place("Far School", 30.32, -97.74, None, &["school"]),
            provider_place("Near School", 30.28, -97.74, None, &["school"]),
            provider_place("Mid School", 30.30, -97.74, None, &["school"]),
        ];

        let results = qualifying_category_places(&center(), places, "school", None);
        let distances: Vec<f64> = results.iter().map(|p| p.distance_miles).collect();
        assert_eq!(results[0].name, "Near School");
        assert_eq!(results[2].name, "Far School");
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(distances.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn test_text_search_radius_is_hard_cutoff() {
        // ~0.69 mi and ~6.9 mi north of the center
        let places = vec![
            provider_place("Close Match", 30.28, -97.74, None, &[]),
            provider_place("Distant Match", 30.37, -97.74, None, &[]),
        ];

        let radius_meters = distance::miles_to_meters(1.0);
        let results = places_within_radius(&center(), places, radius_meters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Close Match");
        assert!(results[0].distance_miles <= 1.0);
    }

    #[test]
    fn test_missing_display_name_falls_back_to_unknown() {
        let mut place = provider_place("ignored", 30.28, -97.74, None, &["park"]);
        place.display_name = None;
        let results = qualifying_category_places(&center(), vec![place], "park", None);
        assert_eq!(results[0].name, "Unknown");
    }

    #[test]
    fn test_places_response_tolerates_missing_places_field() {
        let response: PlacesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }
}
