//! Predefined amenity criteria
//!
//! The criterion table is process-wide and read-only: each criterion key
//! maps to the place-search provider's category identifier.

use serde::Serialize;

/// Criterion keys and their provider place types, in presentation order.
pub const CRITERIA: &[(&str, &str)] = &[
    ("grocery_stores", "grocery_store"),
    ("restaurants", "restaurant"),
    ("coffee_shops", "cafe"),
    ("breweries", "brewery"),
    ("pharmacies", "pharmacy"),
    ("gyms", "gym"),
    ("parks", "park"),
    ("schools", "school"),
    ("hospitals", "hospital"),
    ("gas_stations", "gas_station"),
];

/// Provider place type for a criterion key, if the key is predefined.
#[must_use]
pub fn place_type_for(key: &str) -> Option<&'static str> {
    CRITERIA
        .iter()
        .find(|(criterion, _)| *criterion == key)
        .map(|(_, place_type)| *place_type)
}

/// All predefined criterion keys in presentation order.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    CRITERIA.iter().map(|(key, _)| *key)
}

/// One entry of the criteria catalog exposed to clients.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CriterionInfo {
    pub key: String,
    pub label: String,
    pub description: String,
}

/// Human-readable catalog of the predefined criteria.
#[must_use]
pub fn catalog() -> Vec<CriterionInfo> {
    CRITERIA
        .iter()
        .map(|(key, _)| {
            let spaced = key.replace('_', " ");
            CriterionInfo {
                key: (*key).to_string(),
                label: title_case(&spaced),
                description: format!("Count of {spaced} within radius"),
            }
        })
        .collect()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
