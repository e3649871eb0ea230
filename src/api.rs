//! HTTP API surface
//!
//! JSON endpoints mounted under `/api`: a health check, the criteria
//! catalog, and the evaluate operation. Error mapping: a request without
//! a location is a 400 before any upstream call; an unresolvable location
//! is a 404 with an explicit error payload.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::criteria::{self, CriterionInfo};
use crate::evaluation::{EvaluationRequest, Evaluator};
use crate::models::EvaluationOutcome;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct CriteriaResponse {
    criteria: Vec<CriterionInfo>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Evaluate request body
#[derive(Debug, Deserialize)]
struct EvaluateBody {
    location: Option<String>,
    #[serde(default = "default_radius_miles")]
    radius_miles: f64,
    #[serde(default)]
    criteria: Option<Vec<String>>,
    #[serde(default)]
    custom_amenities: Vec<String>,
    #[serde(default)]
    restaurant_min_rating: f64,
}

fn default_radius_miles() -> f64 {
    3.0
}

pub fn router(evaluator: Arc<Evaluator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/criteria", get(list_criteria))
        .route("/evaluate", post(evaluate))
        .with_state(evaluator)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_criteria() -> Json<CriteriaResponse> {
    Json(CriteriaResponse {
        criteria: criteria::catalog(),
    })
}

async fn evaluate(
    State(evaluator): State<Arc<Evaluator>>,
    Json(body): Json<EvaluateBody>,
) -> Response {
    let Some(location) = body.location else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Location is required".to_string(),
            }),
        )
            .into_response();
    };

    let request = EvaluationRequest {
        location,
        radius_miles: body.radius_miles,
        criteria: body.criteria,
        custom_amenities: body.custom_amenities,
        restaurant_min_rating: body.restaurant_min_rating,
    };

    match evaluator.evaluate(&request).await {
        EvaluationOutcome::Report(report) => Json(*report).into_response(),
        EvaluationOutcome::LocationNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Location not found".to_string(),
            }),
        )
            .into_response(),
    }
}
