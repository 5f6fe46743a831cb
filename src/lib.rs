pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod report;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{extract::Request, ServiceExt};

use crate::core::{config::Settings, state::AppState, telemetry, time::SystemClock};
use crate::repositories::JsonFileStore;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let store = JsonFileStore::from_settings(&settings);
    let corpus =
        tokio::task::spawn_blocking(move || repositories::load_corpus(&store, &store)).await?;

    let state = AppState::new(settings, corpus, Arc::new(SystemClock));
    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Quizboard API listening"
    );

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(core::shutdown::shutdown_signal())
        .await?;

    Ok(())
}

pub fn run_report() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_cli_tracing(&settings)?;

    report::run(&settings)
}
