use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct LeaderboardEntry {
    pub(crate) rank: usize,
    pub(crate) participant_id: String,
    pub(crate) email: String,
    pub(crate) access_code: String,
    #[serde(flatten)]
    pub(crate) metric: LeaderboardMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub(crate) enum LeaderboardMetric {
    Overall {
        average_score: f64,
        attempts: usize,
    },
    QuestionSet {
        question_set_order: u32,
        best_score: f64,
        average_percentage: f64,
        total_attempts: usize,
        #[serde(with = "time::serde::rfc3339")]
        last_attempt_at: OffsetDateTime,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct LeaderboardView {
    pub(crate) entries: Vec<LeaderboardEntry>,
}
