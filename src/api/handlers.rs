//! HTTP request handlers for the Retention Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analytics::compute_retention;
use crate::models::ExitEvent;

use super::request::RetentionRequest;
use super::response::{ApiError, ApiErrorResponse, RetentionReport};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/retention", post(retention_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /retention endpoint.
///
/// Accepts roster and exit feeds and returns the retention report.
async fn retention_handler(
    State(state): State<AppState>,
    payload: Result<Json<RetentionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing retention request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    // Validate the target year before touching the feeds
    let query = match request.query() {
        Ok(query) => query,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid retention query"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let measured_at = request.measured_at.unwrap_or_else(|| state.now());
    let employees = request.employees.unwrap_or_default();
    let all_exits = request.exits.unwrap_or_default();
    let received_exits = all_exits.len();

    // Only completed separations are part of the exit feed proper
    let exits: Vec<ExitEvent> = all_exits
        .into_iter()
        .filter(|exit| state.config().is_terminal(exit.status))
        .collect();
    if exits.len() < received_exits {
        debug!(
            correlation_id = %correlation_id,
            dropped = received_exits - exits.len(),
            "Dropped exit records in non-terminal status"
        );
    }

    let start_time = Instant::now();
    let analysis = compute_retention(
        &employees,
        &exits,
        &query,
        measured_at.naive_utc(),
        state.config().config(),
    );
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        target_year = %query.target_year,
        employees = employees.len(),
        exits = exits.len(),
        rows = analysis.rows.len(),
        issues = analysis.issues.len(),
        duration_us = duration.as_micros(),
        "Retention report completed successfully"
    );

    let report = RetentionReport {
        report_id: correlation_id,
        generated_at: state.now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        analysis,
    };
    json_response(StatusCode::OK, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/retention").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_retention(body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/retention")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let body = json!({
            "target_year": 2026,
            "measured_at": "2026-10-19T09:00:00Z",
            "employees": [{"id": "E1", "join_date": "2020-01-01", "department": "IT"}],
            "exits": []
        });

        let (status, result) = post_retention(body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let report: RetentionReport = serde_json::from_value(result).unwrap();
        assert_eq!(report.analysis.rows.len(), 1);
        assert_eq!(report.analysis.rows[0].display_rate(), "100.0%");
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_measurement_instant_defaults_to_state_clock() {
        let fixed = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let config = ConfigLoader::load("./config/retention").expect("Failed to load config");
        let router = create_router(AppState::with_clock(config, move || fixed));
        let body = json!({
            "target_year": 2026,
            "employees": [{"id": "E1", "join_date": "2020-01-01", "department": "IT"}]
        });

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/retention")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: RetentionReport = serde_json::from_slice(&body).unwrap();

        assert_eq!(report.generated_at, fixed);
        assert_eq!(report.analysis.measured_at, fixed.naive_utc());
    }

    #[tokio::test]
    async fn test_non_terminal_exits_are_ignored() {
        let body = json!({
            "target_year": 2026,
            "measured_at": "2026-10-19T09:00:00Z",
            "exits": [
                {
                    "employee": {"id": "E2", "join_date": "2019-05-01", "department": "HR"},
                    "effective_date": "2026-06-15",
                    "status": "pending"
                }
            ]
        });

        let (status, result) = post_retention(body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["analysis"]["totals"]["start_count"], 0);
        assert!(result["analysis"]["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, result) = post_retention("{invalid json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_target_year_returns_validation_error() {
        let (status, result) = post_retention(r#"{"employees": []}"#.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bad_year_returns_invalid_target_year() {
        let (status, result) = post_retention(r#"{"target_year": "20x6"}"#.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "INVALID_TARGET_YEAR");
    }

    #[tokio::test]
    async fn test_fractional_and_null_years_return_invalid_target_year() {
        for body in [r#"{"target_year": 2026.5}"#, r#"{"target_year": null}"#] {
            let (status, result) = post_retention(body.to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "Unexpected status for {}", body);
            assert_eq!(result["code"], "INVALID_TARGET_YEAR");
        }
    }

    #[tokio::test]
    async fn test_numeric_join_date_does_not_reject_request() {
        let body = json!({
            "target_year": 2026,
            "measured_at": "2026-10-19T09:00:00Z",
            "employees": [
                {"id": "E1", "join_date": "2020-01-01", "department": "IT"},
                {"id": "E2", "join_date": 20200101, "department": "IT"}
            ]
        });

        let (status, result) = post_retention(body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["analysis"]["totals"]["start_count"], 1);
        assert_eq!(result["analysis"]["issues"][0]["kind"], "unparseable_join_date");
        assert_eq!(result["analysis"]["issues"][0]["record_id"], "E2");
    }
}
