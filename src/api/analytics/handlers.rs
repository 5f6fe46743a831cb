use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;

use super::queries::{AnalyticsQuery, LeaderboardQuery};
use crate::api::errors::ApiError;
use crate::core::metrics::record_view;
use crate::core::state::AppState;
use crate::core::time::truncate_to_minute;
use crate::repositories::{self, JsonFileStore};
use crate::schemas::analytics::{AnalyticsView, QuizOption};
use crate::schemas::leaderboard::LeaderboardView;
use crate::schemas::CorpusReloadResponse;
use crate::services::analytics::pipeline;

pub(super) async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsView>, ApiError> {
    let filter = query.into_filter()?;
    let as_of = state.now();
    let loaded = state.corpus();
    let display_offset = state.settings().display_offset();

    let key = (loaded.generation, filter.clone(), truncate_to_minute(as_of));
    let (view, outcome) = state.analytics_cache().get_or_compute(key, || {
        pipeline::analytics_view(&loaded.corpus, &filter, as_of, display_offset)
    });
    record_view("analytics", outcome);

    Ok(Json(view.as_ref().clone()))
}

pub(super) async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardView>, ApiError> {
    query.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let filter = query.into_filter()?;
    let as_of = state.now();
    let loaded = state.corpus();

    let key = (loaded.generation, filter.clone(), truncate_to_minute(as_of));
    let (view, outcome) = state
        .leaderboard_cache()
        .get_or_compute(key, || pipeline::leaderboard_view(&loaded.corpus, &filter, as_of));
    record_view("leaderboard", outcome);

    Ok(Json(view.as_ref().clone()))
}

pub(super) async fn quizzes(State(state): State<AppState>) -> Json<Vec<QuizOption>> {
    Json(pipeline::quiz_options(&state.corpus().corpus))
}

pub(super) async fn reload_corpus(
    State(state): State<AppState>,
) -> Result<Json<CorpusReloadResponse>, ApiError> {
    let store = JsonFileStore::from_settings(state.settings());
    let corpus = tokio::task::spawn_blocking(move || repositories::load_corpus(&store, &store))
        .await
        .map_err(|e| ApiError::internal(e, "Corpus reload task failed"))?;

    let submissions = corpus.submissions.len();
    let quizzes = corpus.quizzes.len();
    let generation = state.replace_corpus(corpus);
    tracing::info!(generation, submissions, quizzes, "Corpus reloaded");

    Ok(Json(CorpusReloadResponse { generation, submissions, quizzes }))
}
