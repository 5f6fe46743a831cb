use std::collections::HashMap;

use crate::db::models::{SubmissionRecord, UNTITLED_QUIZ};
use crate::schemas::analytics::QuizPerformanceEntry;
use crate::services::analytics::round1;

struct QuizTally<'a> {
    quiz_id: &'a str,
    title: Option<&'a str>,
    percentage_sum: f64,
    attempts: usize,
}

/// Average percentage and attempt count per quiz, in first-seen order.
pub(crate) fn per_quiz(filtered: &[&SubmissionRecord]) -> Vec<QuizPerformanceEntry> {
    let mut tallies: Vec<QuizTally<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for submission in filtered {
        let Some(quiz) = submission.quiz.as_ref() else {
            tracing::debug!(submission_id = %submission.id, "no quiz reference; left out of quiz performance");
            continue;
        };

        let slot = *positions.entry(quiz.id.as_str()).or_insert_with(|| {
            tallies.push(QuizTally {
                quiz_id: quiz.id.as_str(),
                title: quiz.title.as_deref(),
                percentage_sum: 0.0,
                attempts: 0,
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        if tally.title.is_none() {
            tally.title = quiz.title.as_deref();
        }
        tally.percentage_sum += submission.percentage;
        tally.attempts += 1;
    }

    tallies
        .into_iter()
        .map(|tally| QuizPerformanceEntry {
            quiz_id: tally.quiz_id.to_string(),
            quiz_title: tally.title.unwrap_or(UNTITLED_QUIZ).to_string(),
            avg_score: round1(tally.percentage_sum / tally.attempts as f64),
            attempts: tally.attempts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::fixtures::{submission, SubmissionBuilder};

    #[test]
    fn groups_by_quiz_and_averages_percentages() {
        let records = [
            submission("s1").quiz("quiz-1", Some("Basics")).percentage(80.0).build(),
            submission("s2").quiz("quiz-2", None).percentage(50.0).build(),
            submission("s3").quiz("quiz-1", Some("Renamed later")).percentage(65.0).build(),
            SubmissionBuilder::orphan("s4").percentage(100.0).build(),
        ];
        let filtered: Vec<_> = records.iter().collect();

        let entries = per_quiz(&filtered);

        assert_eq!(
            entries,
            vec![
                QuizPerformanceEntry {
                    quiz_id: "quiz-1".to_string(),
                    quiz_title: "Basics".to_string(),
                    avg_score: 72.5,
                    attempts: 2,
                },
                QuizPerformanceEntry {
                    quiz_id: "quiz-2".to_string(),
                    quiz_title: UNTITLED_QUIZ.to_string(),
                    avg_score: 50.0,
                    attempts: 1,
                },
            ]
        );
    }

    #[test]
    fn unpopulated_reference_takes_title_from_a_later_record() {
        let records = [
            submission("s1").quiz("quiz-1", None).percentage(40.0).build(),
            submission("s2").quiz("quiz-1", Some("Basics")).percentage(60.0).build(),
        ];
        let filtered: Vec<_> = records.iter().collect();

        let entries = per_quiz(&filtered);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quiz_title, "Basics");
        assert_eq!(entries[0].avg_score, 50.0);
    }

    #[test]
    fn no_submissions_means_no_rows() {
        assert!(per_quiz(&[]).is_empty());
    }
}
