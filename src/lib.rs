//! Locale - location evaluation service
//!
//! This library resolves a free-text location, queries nearby points of
//! interest, historical climate statistics, and nearest-airport distance
//! within a configurable radius, and merges everything into one report.

pub mod airport;
pub mod api;
pub mod climate;
pub mod config;
pub mod criteria;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod geocoding;
pub mod models;
pub mod places;
pub mod web;

// Re-export core types for public API
pub use config::LocaleConfig;
pub use error::LocaleError;
pub use evaluation::{EvaluationRequest, Evaluator};
pub use models::{
    AirportInfo, ClimateSummary, Coordinate, CriterionResult, EvaluationOutcome, EvaluationReport,
    PlaceResult, ResolvedLocation,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LocaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
