//! HTTP trigger for a places ingestion run.
//!
//! Unlike the read routes this endpoint answers with a flat
//! `{message, details}` / `{error, details}` body, which is what existing
//! callers of the import function parse.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::AppState;

const FAILURE_DETAILS: &str = "Failed to fetch places from Google Places API";

#[derive(Debug, Serialize)]
struct IngestResponse {
    message: String,
    details: Vec<String>,
}

#[derive(Debug, Serialize)]
struct IngestFailure {
    error: String,
    details: &'static str,
}

/// Runs one ingestion over the configured grid and reports the summary.
///
/// `OPTIONS` is answered with an empty 200; the CORS layer supplies the
/// headers.
pub(super) async fn trigger_places_ingest(
    State(state): State<AppState>,
    method: Method,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    match bizdir_ingest::run_places_ingest(&state.config, &state.pool, &state.grid).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(IngestResponse {
                message: summary.message(),
                details: summary.details,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "places ingestion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(IngestFailure {
                    error: e.to_string(),
                    details: FAILURE_DETAILS,
                }),
            )
                .into_response()
        }
    }
}
