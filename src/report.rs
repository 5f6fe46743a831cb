//! One-shot rendering of a dashboard view to stdout, for cron exports and debugging.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::config::Settings;
use crate::core::time::{format_offset, Clock, SystemClock};
use crate::repositories::{self, JsonFileStore};
use crate::services::analytics::filters::{
    AnalyticsFilter, LeaderboardFilter, QuestionSetOrder, QuizScope,
};
use crate::services::analytics::pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportView {
    Analytics,
    Leaderboard,
    Quizzes,
}

#[derive(Debug, PartialEq)]
struct ReportArgs {
    view: ReportView,
    quiz: Option<String>,
    window: String,
    period: String,
    question_set: Option<u32>,
    submissions_path: Option<String>,
    quizzes_path: Option<String>,
}

pub(crate) fn run(settings: &Settings) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    let submissions_path = args
        .submissions_path
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.corpus().submissions_path.clone());
    let quizzes_path = args
        .quizzes_path
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.corpus().quizzes_path.clone());
    let store = JsonFileStore::new(submissions_path, quizzes_path);
    let corpus = repositories::load_corpus(&store, &store);
    let as_of = SystemClock.now();
    tracing::info!(view = ?args.view, as_of = %format_offset(as_of), "Rendering report");

    let rendered = match args.view {
        ReportView::Analytics => {
            let filter = AnalyticsFilter {
                quiz_scope: QuizScope::parse(args.quiz.as_deref()),
                window: args.window.parse()?,
            };
            serde_json::to_string_pretty(&pipeline::analytics_view(
                &corpus,
                &filter,
                as_of,
                settings.display_offset(),
            ))
        }
        ReportView::Leaderboard => {
            let filter = LeaderboardFilter {
                quiz_scope: QuizScope::parse(args.quiz.as_deref()),
                window: args.period.parse()?,
                question_set: args.question_set.map(QuestionSetOrder::try_from).transpose()?,
            };
            serde_json::to_string_pretty(&pipeline::leaderboard_view(&corpus, &filter, as_of))
        }
        ReportView::Quizzes => serde_json::to_string_pretty(&pipeline::quiz_options(&corpus)),
    }
    .context("Failed to serialize report")?;

    println!("{rendered}");
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<ReportArgs> {
    let mut parsed = ReportArgs {
        view: ReportView::Analytics,
        quiz: None,
        window: "30d".to_string(),
        period: "all-time".to_string(),
        question_set: None,
        submissions_path: None,
        quizzes_path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--view" => {
                let value = args.next().ok_or_else(|| anyhow!("--view missing value"))?;
                parsed.view = match value.as_str() {
                    "analytics" => ReportView::Analytics,
                    "leaderboard" => ReportView::Leaderboard,
                    "quizzes" => ReportView::Quizzes,
                    other => return Err(anyhow!("Unknown view: {other}")),
                };
            }
            "--quiz" => {
                parsed.quiz = Some(args.next().ok_or_else(|| anyhow!("--quiz missing value"))?);
            }
            "--window" => {
                parsed.window = args.next().ok_or_else(|| anyhow!("--window missing value"))?;
            }
            "--period" => {
                parsed.period = args.next().ok_or_else(|| anyhow!("--period missing value"))?;
            }
            "--question-set" => {
                let value = args.next().ok_or_else(|| anyhow!("--question-set missing value"))?;
                parsed.question_set = Some(
                    value.parse().with_context(|| format!("Invalid question set: {value}"))?,
                );
            }
            "--submissions" => {
                parsed.submissions_path =
                    Some(args.next().ok_or_else(|| anyhow!("--submissions missing value"))?);
            }
            "--quizzes" => {
                parsed.quizzes_path =
                    Some(args.next().ok_or_else(|| anyhow!("--quizzes missing value"))?);
            }
            _ => return Err(anyhow!("Unknown argument: {arg}")),
        }
    }

    Ok(parsed)
}
