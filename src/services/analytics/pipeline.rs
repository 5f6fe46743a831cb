use time::{OffsetDateTime, UtcOffset};

use crate::db::models::Corpus;
use crate::schemas::analytics::{AnalyticsView, QuizOption};
use crate::schemas::leaderboard::LeaderboardView;
use crate::services::analytics::filters::{filter_submissions, AnalyticsFilter, LeaderboardFilter};
use crate::services::analytics::question_index::QuestionIndex;
use crate::services::analytics::{
    leaderboard, question_difficulty, quiz_performance, score_histogram, summary, time_series,
};

/// Runs every analytics aggregator over one filtered subset.
///
/// `as_of` is the only notion of "now" used by the window cutoff and the
/// daily chart, so both always agree.
pub(crate) fn analytics_view(
    corpus: &Corpus,
    filter: &AnalyticsFilter,
    as_of: OffsetDateTime,
    display_offset: UtcOffset,
) -> AnalyticsView {
    let filtered = filter_submissions(
        &corpus.submissions,
        &filter.quiz_scope,
        filter.window.retention_days(),
        as_of,
    );
    let completed = summary::completed(&filtered);
    let index = QuestionIndex::build(&corpus.quizzes);

    tracing::debug!(
        window = filter.window.as_str(),
        filtered = filtered.len(),
        completed = completed.len(),
        indexed_questions = index.len(),
        "analytics pipeline"
    );

    AnalyticsView {
        summary: summary::summarize(&filtered),
        time_series: time_series::bucket_by_day(
            &filtered,
            filter.window.chart_days(),
            as_of,
            display_offset,
        ),
        score_distribution: score_histogram::distribute(&completed),
        quiz_performance: quiz_performance::per_quiz(&filtered),
        difficult_questions: question_difficulty::rank_difficult_questions(&filtered, &index),
    }
}

pub(crate) fn leaderboard_view(
    corpus: &Corpus,
    filter: &LeaderboardFilter,
    as_of: OffsetDateTime,
) -> LeaderboardView {
    let filtered = filter_submissions(
        &corpus.submissions,
        &filter.quiz_scope,
        filter.window.retention_days(),
        as_of,
    );

    tracing::debug!(
        period = filter.window.as_str(),
        question_set = filter.question_set.map(|order| order.get()),
        filtered = filtered.len(),
        "leaderboard pipeline"
    );

    LeaderboardView { entries: leaderboard::rank_participants(&filtered, filter.question_set) }
}

/// Quiz picker entries, in corpus order.
pub(crate) fn quiz_options(corpus: &Corpus) -> Vec<QuizOption> {
    corpus
        .quizzes
        .iter()
        .map(|quiz| QuizOption {
            id: quiz.id.clone(),
            title: quiz.display_title().to_string(),
            question_count: quiz.source.question_count(),
            question_sets: quiz.source.question_set_orders(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::SubmissionStatus;
    use crate::schemas::leaderboard::LeaderboardMetric;
    use crate::services::analytics::filters::{
        AnalyticsWindow, LeaderboardWindow, QuestionSetOrder, QuizScope,
    };
    use crate::services::analytics::fixtures::{
        as_of, batched_quiz, flat_quiz, question, submission, text,
    };

    fn all_time() -> AnalyticsFilter {
        AnalyticsFilter { quiz_scope: QuizScope::All, window: AnalyticsWindow::AllTime }
    }

    fn sample_corpus() -> Corpus {
        Corpus {
            submissions: vec![
                submission("s1")
                    .quiz("quiz-1", Some("Basics"))
                    .participant("u1")
                    .percentage(80.0)
                    .time_taken(100.0)
                    .days_ago(1)
                    .answer("q1", text("a"), true)
                    .answer("q2", text(""), false)
                    .build(),
                submission("s2")
                    .quiz("quiz-1", Some("Basics"))
                    .participant("u1")
                    .percentage(60.0)
                    .time_taken(140.0)
                    .days_ago(2)
                    .answer("q1", text("b"), false)
                    .build(),
                submission("s3")
                    .quiz("exam-1", Some("Finals"))
                    .participant("u2")
                    .status(SubmissionStatus::InProgress)
                    .days_ago(45)
                    .question_set(2, 8.0, 80.0, as_of())
                    .build(),
            ],
            quizzes: vec![
                flat_quiz("quiz-1", Some("Basics"), vec![question("q1", "One", None), question("q2", "Two", None)]),
                batched_quiz("exam-1", Some("Finals"), vec![(1, vec![question("e1", "E", None)])]),
            ],
        }
    }

    #[test]
    fn empty_corpus_produces_all_zero_views() {
        let corpus = Corpus::default();

        let view = analytics_view(&corpus, &all_time(), as_of(), UtcOffset::UTC);
        let board = leaderboard_view(
            &corpus,
            &LeaderboardFilter {
                quiz_scope: QuizScope::All,
                window: LeaderboardWindow::AllTime,
                question_set: None,
            },
            as_of(),
        );

        assert_eq!(view.summary.total_submissions, 0);
        assert_eq!(view.summary.completion_rate, 0.0);
        assert_eq!(view.summary.active_users, 0);
        assert!(view.score_distribution.iter().all(|band| band.count == 0));
        assert_eq!(view.time_series.len(), 365);
        assert!(view.quiz_performance.is_empty());
        assert!(view.difficult_questions.is_empty());
        assert!(board.entries.is_empty());
    }

    #[test]
    fn window_is_applied_before_every_aggregator() {
        let corpus = sample_corpus();
        let filter = AnalyticsFilter { quiz_scope: QuizScope::All, window: AnalyticsWindow::Last30Days };

        let view = analytics_view(&corpus, &filter, as_of(), UtcOffset::UTC);

        assert_eq!(view.summary.total_submissions, 2);
        assert_eq!(view.summary.completion_rate, 100.0);
        assert_eq!(view.summary.average_score, 70.0);
        assert_eq!(view.summary.average_time, 120);
        assert_eq!(view.summary.active_users, 1);
        assert_eq!(view.time_series.len(), 30);
        assert_eq!(view.time_series.iter().map(|bucket| bucket.count).sum::<usize>(), 2);
        assert_eq!(view.quiz_performance.len(), 1);
        assert_eq!(view.difficult_questions[0].question_id, "q2");
        assert_eq!(view.difficult_questions[0].quiz_title, "Basics");
    }

    #[test]
    fn all_time_keeps_old_submissions() {
        let view = analytics_view(&sample_corpus(), &all_time(), as_of(), UtcOffset::UTC);

        assert_eq!(view.summary.total_submissions, 3);
        assert_eq!(view.summary.active_users, 2);
        assert_eq!(
            view.score_distribution.iter().map(|band| band.count).sum::<usize>(),
            2,
            "only completed submissions are binned"
        );
    }

    #[test]
    fn identical_inputs_give_identical_views() {
        let corpus = sample_corpus();
        let first = analytics_view(&corpus, &all_time(), as_of(), UtcOffset::UTC);
        let second = analytics_view(&corpus, &all_time(), as_of(), UtcOffset::UTC);
        assert_eq!(first, second);
    }

    #[test]
    fn leaderboard_uses_its_own_window_and_scope() {
        let corpus = sample_corpus();

        let monthly = leaderboard_view(
            &corpus,
            &LeaderboardFilter {
                quiz_scope: QuizScope::All,
                window: LeaderboardWindow::Monthly,
                question_set: None,
            },
            as_of(),
        );
        assert_eq!(monthly.entries.len(), 1);
        assert_eq!(
            monthly.entries[0].metric,
            LeaderboardMetric::Overall { average_score: 70.0, attempts: 2 }
        );

        let scoped = leaderboard_view(
            &corpus,
            &LeaderboardFilter {
                quiz_scope: QuizScope::Quiz("exam-1".to_string()),
                window: LeaderboardWindow::AllTime,
                question_set: Some(QuestionSetOrder::try_from(2).expect("order")),
            },
            as_of(),
        );
        assert_eq!(scoped.entries.len(), 1);
        assert_eq!(scoped.entries[0].participant_id, "u2");
    }

    #[test]
    fn quiz_options_describe_both_shapes() {
        let options = quiz_options(&sample_corpus());

        assert_eq!(options.len(), 2);
        assert_eq!((options[0].question_count, options[0].question_sets.len()), (2, 0));
        assert_eq!((options[1].question_count, options[1].question_sets.clone()), (1, vec![1]));
    }
}
