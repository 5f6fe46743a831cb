use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::core::metrics;
use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: state.settings().api().project_name.clone(),
        version: state.settings().api().version.clone(),
    })
}

/// An empty corpus is reported as degraded: the stores fall back to empty lists on failure.
pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let loaded = state.corpus();
    let mut components = HashMap::new();

    components.insert("corpus_generation".to_string(), loaded.generation.to_string());
    components.insert("submissions".to_string(), loaded.corpus.submissions.len().to_string());
    components.insert("quizzes".to_string(), loaded.corpus.quizzes.len().to_string());

    let status = if loaded.corpus.submissions.is_empty() && loaded.corpus.quizzes.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse { service: "quizboard".to_string(), status: status.to_string(), components })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
