use serde::Deserialize;
use validator::Validate;

use crate::services::analytics::filters::{
    AnalyticsFilter, FilterError, LeaderboardFilter, QuestionSetOrder, QuizScope,
};

fn default_window() -> String {
    "30d".to_string()
}

fn default_period() -> String {
    "all-time".to_string()
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyticsQuery {
    #[serde(default, alias = "quizId")]
    pub(super) quiz: Option<String>,
    #[serde(default = "default_window", alias = "timeRange")]
    pub(super) window: String,
}

impl AnalyticsQuery {
    pub(super) fn into_filter(self) -> Result<AnalyticsFilter, FilterError> {
        Ok(AnalyticsFilter {
            quiz_scope: QuizScope::parse(self.quiz.as_deref()),
            window: self.window.parse()?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(super) struct LeaderboardQuery {
    #[serde(default, alias = "quizId")]
    pub(super) quiz: Option<String>,
    #[serde(default = "default_period", alias = "timeFilter")]
    pub(super) period: String,
    #[serde(default, alias = "questionSet")]
    #[validate(range(min = 1, max = 4))]
    pub(super) question_set: Option<u32>,
}

impl LeaderboardQuery {
    pub(super) fn into_filter(self) -> Result<LeaderboardFilter, FilterError> {
        Ok(LeaderboardFilter {
            quiz_scope: QuizScope::parse(self.quiz.as_deref()),
            window: self.period.parse()?,
            question_set: self.question_set.map(QuestionSetOrder::try_from).transpose()?,
        })
    }
}
