use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::db::models::{SubmissionRecord, UNTITLED_QUIZ};
use crate::schemas::analytics::{CommonAnswer, DifficultQuestionEntry};
use crate::services::analytics::question_index::QuestionIndex;
use crate::services::analytics::{percent, round1, round_whole};

pub(crate) const DIFFICULT_QUESTION_LIMIT: usize = 10;
pub(crate) const UNKNOWN_QUESTION: &str = "Question unavailable";

#[derive(Default)]
struct QuestionTally {
    correct: usize,
    incorrect: usize,
    skipped: usize,
    picks: BTreeMap<String, usize>,
}

impl QuestionTally {
    fn total(&self) -> usize {
        self.correct + self.incorrect + self.skipped
    }

    fn difficulty(&self) -> f64 {
        percent(self.incorrect + self.skipped, self.total())
    }

    /// Most picked value; equal counts resolve to the lexicographically smallest value.
    fn mode(&self) -> Option<(&str, usize)> {
        self.picks.iter().fold(None, |best, (value, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((value.as_str(), *count)),
        })
    }
}

/// Hardest questions first, at most [`DIFFICULT_QUESTION_LIMIT`] of them.
///
/// Equal difficulty is ordered by question id so the list is stable across runs.
pub(crate) fn rank_difficult_questions(
    filtered: &[&SubmissionRecord],
    index: &QuestionIndex<'_>,
) -> Vec<DifficultQuestionEntry> {
    let mut tallies: HashMap<&str, QuestionTally> = HashMap::new();

    for answer in filtered.iter().flat_map(|submission| submission.answers.iter()) {
        let tally = tallies.entry(answer.question_id.as_str()).or_default();

        if answer.is_skipped() {
            tally.skipped += 1;
            continue;
        }

        if answer.is_correct {
            tally.correct += 1;
        } else {
            tally.incorrect += 1;
        }
        if let Some(value) = &answer.given_value {
            *tally.picks.entry(value.normalized()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, QuestionTally)> =
        tallies.into_iter().filter(|(_, tally)| tally.total() > 0).collect();
    ranked.sort_by(|(left_id, left), (right_id, right)| {
        right
            .difficulty()
            .partial_cmp(&left.difficulty())
            .unwrap_or(Ordering::Equal)
            .then_with(|| left_id.cmp(right_id))
    });
    ranked.truncate(DIFFICULT_QUESTION_LIMIT);

    ranked.into_iter().map(|(question_id, tally)| describe(question_id, &tally, index)).collect()
}

fn describe(question_id: &str, tally: &QuestionTally, index: &QuestionIndex<'_>) -> DifficultQuestionEntry {
    let total = tally.total();
    let indexed = index.get(question_id);

    DifficultQuestionEntry {
        question_id: question_id.to_string(),
        quiz_id: indexed.map(|entry| entry.quiz_id.to_string()),
        quiz_title: indexed.map_or(UNTITLED_QUIZ, |entry| entry.quiz_title).to_string(),
        question_text: indexed
            .map_or(UNKNOWN_QUESTION, |entry| entry.question.question_text.as_str())
            .to_string(),
        question_type: indexed.map(|entry| entry.question.question_type),
        options: indexed.map(|entry| entry.question.options.clone()).unwrap_or_default(),
        correct_answer: indexed
            .and_then(|entry| entry.question.correct_answer.as_ref())
            .map(|answer| answer.display())
            .unwrap_or_default(),
        points: indexed.map_or(0.0, |entry| entry.question.points),
        total_attempts: total,
        correct_count: tally.correct,
        incorrect_count: tally.incorrect,
        skipped_count: tally.skipped,
        correct_rate: round_whole(percent(tally.correct, total)),
        incorrect_rate: round_whole(percent(tally.incorrect, total)),
        skipped_rate: round_whole(percent(tally.skipped, total)),
        difficulty: round1(tally.difficulty()),
        most_common_answer: tally.mode().map(|(value, count)| CommonAnswer {
            value: value.to_string(),
            count,
            share: round_whole(percent(count, total)),
        }),
    }
}
