use serde::Serialize;

use crate::db::types::QuestionType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SummaryStats {
    pub(crate) total_submissions: usize,
    pub(crate) completion_rate: f64,
    pub(crate) average_score: f64,
    pub(crate) average_time: u64,
    pub(crate) active_users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TimeBucket {
    /// ISO calendar date (`YYYY-MM-DD`) used for matching.
    pub(crate) date: String,
    pub(crate) label: String,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScoreBand {
    pub(crate) label: &'static str,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct QuizPerformanceEntry {
    pub(crate) quiz_id: String,
    pub(crate) quiz_title: String,
    pub(crate) avg_score: f64,
    pub(crate) attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CommonAnswer {
    pub(crate) value: String,
    pub(crate) count: usize,
    /// Share of all attempts on the question, skips included.
    pub(crate) share: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DifficultQuestionEntry {
    pub(crate) question_id: String,
    pub(crate) quiz_id: Option<String>,
    pub(crate) quiz_title: String,
    pub(crate) question_text: String,
    pub(crate) question_type: Option<QuestionType>,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: String,
    /// Point value of the question; 0 when it is not in the index.
    pub(crate) points: f64,
    pub(crate) total_attempts: usize,
    pub(crate) correct_count: usize,
    pub(crate) incorrect_count: usize,
    pub(crate) skipped_count: usize,
    pub(crate) correct_rate: u32,
    pub(crate) incorrect_rate: u32,
    pub(crate) skipped_rate: u32,
    pub(crate) difficulty: f64,
    pub(crate) most_common_answer: Option<CommonAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AnalyticsView {
    pub(crate) summary: SummaryStats,
    pub(crate) time_series: Vec<TimeBucket>,
    pub(crate) score_distribution: Vec<ScoreBand>,
    pub(crate) quiz_performance: Vec<QuizPerformanceEntry>,
    pub(crate) difficult_questions: Vec<DifficultQuestionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct QuizOption {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) question_count: usize,
    pub(crate) question_sets: Vec<u32>,
}
