use std::str::FromStr;

use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::db::models::SubmissionRecord;

pub(crate) const ALL_QUIZZES: &str = "all";
pub(crate) const MAX_QUESTION_SET_ORDER: u32 = 4;
/// Display horizon of the daily chart when the analytics window is unbounded.
pub(crate) const ALL_TIME_CHART_DAYS: u32 = 365;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum FilterError {
    #[error("unknown analytics window '{0}', expected 7d, 30d, 90d or all")]
    UnknownAnalyticsWindow(String),
    #[error("unknown leaderboard period '{0}', expected daily, weekly, monthly or all-time")]
    UnknownLeaderboardWindow(String),
    #[error("question set must be between 1 and {MAX_QUESTION_SET_ORDER}, got {0}")]
    QuestionSetOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum QuizScope {
    All,
    Quiz(String),
}

impl QuizScope {
    pub(crate) fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_QUIZZES) => Self::All,
            Some(id) => Self::Quiz(id.to_string()),
        }
    }

    /// Submissions without a quiz reference only match the unscoped view.
    pub(crate) fn matches(&self, submission: &SubmissionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Quiz(id) => submission.quiz_id() == Some(id.as_str()),
        }
    }
}

/// Trailing window selector of the analytics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AnalyticsWindow {
    Last7Days,
    Last30Days,
    Last90Days,
    AllTime,
}

impl AnalyticsWindow {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::AllTime => "all",
        }
    }

    /// `None` means no time truncation at all.
    pub(crate) fn retention_days(self) -> Option<u32> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::AllTime => None,
        }
    }

    pub(crate) fn chart_days(self) -> u32 {
        self.retention_days().unwrap_or(ALL_TIME_CHART_DAYS)
    }
}

impl FromStr for AnalyticsWindow {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            "all" => Ok(Self::AllTime),
            other => Err(FilterError::UnknownAnalyticsWindow(other.to_string())),
        }
    }
}

/// Trailing window selector of the leaderboard dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LeaderboardWindow {
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

impl LeaderboardWindow {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::AllTime => "all-time",
        }
    }

    pub(crate) fn retention_days(self) -> Option<u32> {
        match self {
            Self::Daily => Some(1),
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
            Self::AllTime => None,
        }
    }
}

impl FromStr for LeaderboardWindow {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "all-time" => Ok(Self::AllTime),
            other => Err(FilterError::UnknownLeaderboardWindow(other.to_string())),
        }
    }
}

/// One-based slot of a question set inside a multi-part exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct QuestionSetOrder(u32);

impl QuestionSetOrder {
    pub(crate) fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for QuestionSetOrder {
    type Error = FilterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (1..=MAX_QUESTION_SET_ORDER).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FilterError::QuestionSetOutOfRange(value))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct AnalyticsFilter {
    pub(crate) quiz_scope: QuizScope,
    pub(crate) window: AnalyticsWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct LeaderboardFilter {
    pub(crate) quiz_scope: QuizScope,
    pub(crate) window: LeaderboardWindow,
    pub(crate) question_set: Option<QuestionSetOrder>,
}

/// Restricts the corpus by quiz scope, then by a trailing window ending at `as_of`.
pub(crate) fn filter_submissions<'a>(
    corpus: &'a [SubmissionRecord],
    scope: &QuizScope,
    retention_days: Option<u32>,
    as_of: OffsetDateTime,
) -> Vec<&'a SubmissionRecord> {
    let cutoff = retention_days.map(|days| as_of - Duration::days(i64::from(days)));

    corpus
        .iter()
        .filter(|submission| scope.matches(submission))
        .filter(|submission| cutoff.map_or(true, |cutoff| submission.submitted_at >= cutoff))
        .collect()
}
