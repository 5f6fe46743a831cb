use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
};
use time::OffsetDateTime;

use crate::api;
use crate::core::{config::Settings, state::AppState, time::FixedClock};
use crate::db::models::Corpus;
use crate::services::analytics::fixtures;

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: api::router::App,
}

/// Router over an in-memory corpus, frozen at the fixture `as_of`.
pub(crate) fn setup_test_context(corpus: Corpus) -> TestContext {
    setup_test_context_with_settings(Settings::for_tests(), corpus)
}

pub(crate) fn setup_test_context_with_settings(settings: Settings, corpus: Corpus) -> TestContext {
    setup_test_context_at(settings, corpus, fixtures::as_of())
}

pub(crate) fn setup_test_context_at(
    settings: Settings,
    corpus: Corpus,
    now: OffsetDateTime,
) -> TestContext {
    let state = AppState::new(settings, corpus, Arc::new(FixedClock(now)));
    let app = api::router::router(state.clone());
    TestContext { state, app }
}

pub(crate) fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).expect("request body")
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
