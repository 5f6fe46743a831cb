use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod analytics;
pub(crate) mod leaderboard;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CorpusReloadResponse {
    pub(crate) generation: u64,
    pub(crate) submissions: usize,
    pub(crate) quizzes: usize,
}
