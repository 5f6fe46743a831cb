mod handlers;
mod queries;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(handlers::analytics))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/quizzes", get(handlers::quizzes))
        .route("/corpus/reload", post(handlers::reload_corpus))
}
