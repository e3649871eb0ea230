//! Report data model for location evaluations
//!
//! Everything here is ephemeral: one evaluation produces one report and no
//! entity survives the request that built it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A location string resolved to a canonical address and coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Canonical address as reported by the geocoder
    pub formatted_address: String,
    /// Resolved coordinate
    pub coordinate: Coordinate,
}

/// One place returned by a search, with its computed distance
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceResult {
    /// Display name
    pub name: String,
    /// Straight-line distance from the search center in miles
    pub distance_miles: f64,
    /// Provider rating, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Link to the place on the provider's map
    pub map_url: String,
    /// Place coordinate
    pub coordinate: Coordinate,
}

/// Qualifying places for one criterion, sorted ascending by distance
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CriterionResult {
    /// Number of qualifying places
    pub count: usize,
    /// Full qualifying list, closest first
    pub places: Vec<PlaceResult>,
}

impl CriterionResult {
    /// Degraded value for a failed search: zero count, empty list
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Climate statistics for the past year, as display strings
///
/// All three fields are the literal string "N/A" when the archive could not
/// be queried or returned empty series. Never partially numeric.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClimateSummary {
    /// Average of the daily max/min temperatures, e.g. "68.2°F"
    pub avg_temp_f: String,
    /// Total precipitation over the window, e.g. "34.1 in/yr"
    pub annual_precipitation: String,
    /// Days with less than 0.1 inch of precipitation, e.g. "217 days/yr"
    pub sunny_days: String,
}

impl ClimateSummary {
    /// Degraded value when the archive is unavailable
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            avg_temp_f: "N/A".to_string(),
            annual_precipitation: "N/A".to_string(),
            sunny_days: "N/A".to_string(),
        }
    }
}

/// Nearest airport as reported by the place-search provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirportInfo {
    /// Airport display name, or "None nearby" / "Error" sentinels
    pub name: String,
    /// Distance as a display string, e.g. "12.4 mi", or "N/A"
    pub distance_miles: String,
}

/// Transportation section of the report
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransportationInfo {
    pub nearest_airport: String,
    pub airport_distance: String,
}

impl From<AirportInfo> for TransportationInfo {
    fn from(airport: AirportInfo) -> Self {
        Self {
            nearest_airport: airport.name,
            airport_distance: airport.distance_miles,
        }
    }
}

/// Aggregated evaluation of one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Canonical address of the evaluated location
    pub location: String,
    /// Resolved coordinate
    pub coordinates: Coordinate,
    /// Requested search radius in miles
    pub radius_miles: f64,
    /// Climate statistics for the past year
    pub climate: ClimateSummary,
    /// Criterion key (or trimmed custom query) to its search result
    pub amenities: BTreeMap<String, CriterionResult>,
    /// Nearest airport
    pub transportation: TransportationInfo,
}

/// Outcome of an evaluation
///
/// An unresolvable location is signaled data absence, not an error: the
/// caller renders it as a "not found" payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// Full report for a resolved location
    Report(Box<EvaluationReport>),
    /// The geocoder could not resolve the location; nothing else was queried
    LocationNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_summary_unavailable_is_all_na() {
        let summary = ClimateSummary::unavailable();
        assert_eq!(summary.avg_temp_f, "N/A");
        assert_eq!(summary.annual_precipitation, "N/A");
        assert_eq!(summary.sunny_days, "N/A");
    }

    #[test]
    fn test_empty_criterion_result() {
        let result = CriterionResult::empty();
        assert_eq!(result.count, 0);
        assert!(result.places.is_empty());
    }

    #[test]
    fn test_place_result_serializes_without_missing_rating() {
        let place = PlaceResult {
            name: "Corner Cafe".to_string(),
            distance_miles: 0.42,
            rating: None,
            map_url: "https://maps.example/corner-cafe".to_string(),
            coordinate: Coordinate::new(30.27, -97.74),
        };
        let json = serde_json::to_value(&place).unwrap();
        assert!(json.get("rating").is_none());
        assert_eq!(json["distance_miles"], 0.42);
    }

    #[test]
    fn test_transportation_from_airport() {
        let airport = AirportInfo {
            name: "Austin-Bergstrom International Airport".to_string(),
            distance_miles: "7.6 mi".to_string(),
        };
        let transportation = TransportationInfo::from(airport);
        assert_eq!(
            transportation.nearest_airport,
            "Austin-Bergstrom International Airport"
        );
        assert_eq!(transportation.airport_distance, "7.6 mi");
    }
}
