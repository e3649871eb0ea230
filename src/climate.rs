//! Historical climate client
//!
//! Fetches the past year of daily temperature and precipitation from the
//! climate archive and reduces the series to display statistics. The
//! window ends "today" at call time, so repeated calls on different days
//! see different data.

use chrono::{Days, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::ClimateConfig;
use crate::error::LocaleError;
use crate::models::{ClimateSummary, Coordinate};

/// Days of history requested from the archive
const WINDOW_DAYS: u64 = 365;

/// Daily precipitation below this is counted as a sunny day (inches)
const SUNNY_DAY_PRECIP_INCHES: f64 = 0.1;

/// Client for the climate archive provider
pub struct ClimateClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: Option<DailySeries>,
}

#[derive(Debug, Deserialize, Default)]
struct DailySeries {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    precipitation_sum: Vec<f64>,
}

impl ClimateClient {
    /// Create a new client sharing the service-wide HTTP client
    pub fn new(client: Client, config: &ClimateConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Summarize the past year of climate data at a coordinate.
    ///
    /// Returns the all-"N/A" summary on any failure, including empty or
    /// missing daily series.
    pub async fn summarize(&self, coordinate: &Coordinate) -> ClimateSummary {
        match self.try_summarize(coordinate).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(
                    "Climate lookup failed for ({:.4}, {:.4}): {}",
                    coordinate.latitude, coordinate.longitude, e
                );
                ClimateSummary::unavailable()
            }
        }
    }

    async fn try_summarize(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ClimateSummary, LocaleError> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date
            .checked_sub_days(Days::new(WINDOW_DAYS))
            .ok_or_else(|| LocaleError::validation("archive window start out of range"))?;

        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum&temperature_unit=fahrenheit&precipitation_unit=inch&timezone=auto",
            self.base_url, coordinate.latitude, coordinate.longitude, start_date, end_date
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LocaleError::provider(format!(
                "climate archive returned HTTP {}",
                response.status()
            )));
        }

        let archive: ArchiveResponse = response.json().await?;
        let daily = archive.daily.unwrap_or_default();

        summarize_series(
            &daily.temperature_2m_max,
            &daily.temperature_2m_min,
            &daily.precipitation_sum,
        )
        .ok_or_else(|| LocaleError::parse("archive returned empty daily series"))
    }
}

/// Reduce equal-length daily series to display statistics.
///
/// Returns `None` when any series is empty; a partial summary is never
/// produced.
fn summarize_series(
    temp_max: &[f64],
    temp_min: &[f64],
    precip: &[f64],
) -> Option<ClimateSummary> {
    let sample_count = temp_max.len() + temp_min.len();
    if sample_count == 0 || precip.is_empty() {
        return None;
    }

    let temp_total: f64 = temp_max.iter().sum::<f64>() + temp_min.iter().sum::<f64>();
    let avg_temp = round1(temp_total / sample_count as f64);

    let total_precip = round1(precip.iter().sum());
    let sunny_days = precip
        .iter()
        .filter(|inches| **inches < SUNNY_DAY_PRECIP_INCHES)
        .count();

    Some(ClimateSummary {
        avg_temp_f: format!("{avg_temp:.1}°F"),
        annual_precipitation: format!("{total_precip:.1} in/yr"),
        sunny_days: format!("{sunny_days} days/yr"),
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
