//! Straight-line distance approximation
//!
//! Flat-plane formula with fixed miles-per-degree constants, not a
//! great-circle distance. Only valid at moderate latitudes and short
//! ranges; callers must not rely on it beyond roughly 50 miles or near
//! the poles. Kept exact so distance-derived output stays reproducible.

use crate::models::Coordinate;

/// Miles per degree of latitude
const MILES_PER_DEGREE_LAT: f64 = 69.0;
/// Miles per degree of longitude at mid-latitudes
const MILES_PER_DEGREE_LNG: f64 = 54.6;

/// Fixed conversion constant used for upstream radius parameters
pub const METERS_PER_MILE: f64 = 1609.34;

/// Approximate straight-line distance between two coordinates in miles.
///
/// Symmetric and deterministic; no side effects.
#[must_use]
pub fn miles_between(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat_miles = (from.latitude - to.latitude) * MILES_PER_DEGREE_LAT;
    let lng_miles = (from.longitude - to.longitude) * MILES_PER_DEGREE_LNG;
    (lat_miles.powi(2) + lng_miles.powi(2)).sqrt()
}

/// Round a distance to the given number of decimal places.
#[must_use]
pub fn round_miles(miles: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (miles * factor).round() / factor
}

/// Convert a search radius in miles to meters.
#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}
