use std::cmp::Ordering;
use std::collections::HashMap;

use time::OffsetDateTime;

use crate::db::models::{ParticipantRecord, SubmissionRecord};
use crate::schemas::leaderboard::{LeaderboardEntry, LeaderboardMetric};
use crate::services::analytics::filters::QuestionSetOrder;
use crate::services::analytics::{mean, round1};

pub(crate) const LEADERBOARD_LIMIT: usize = 50;

struct ParticipantTally<'a> {
    participant: &'a ParticipantRecord,
    percentage_sum: f64,
    attempts: usize,
    set_scores: Vec<f64>,
    set_percentages: Vec<f64>,
    last_set_attempt: Option<OffsetDateTime>,
}

impl ParticipantTally<'_> {
    fn average_score(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.percentage_sum / self.attempts as f64
    }

    fn best_set_score(&self) -> f64 {
        self.set_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Ranks participants by average percentage, or by best score inside one
/// question set when `question_set` is given.
///
/// Equal sort keys fall back to participant id. Ranks are `1..=len` with no
/// shared positions.
pub(crate) fn rank_participants(
    filtered: &[&SubmissionRecord],
    question_set: Option<QuestionSetOrder>,
) -> Vec<LeaderboardEntry> {
    let mut tallies: HashMap<&str, ParticipantTally<'_>> = HashMap::new();

    for submission in filtered {
        let Some(participant) = submission.participant.as_ref() else {
            continue;
        };

        let tally = tallies.entry(participant.id.as_str()).or_insert_with(|| ParticipantTally {
            participant,
            percentage_sum: 0.0,
            attempts: 0,
            set_scores: Vec::new(),
            set_percentages: Vec::new(),
            last_set_attempt: None,
        });
        tally.percentage_sum += submission.percentage;
        tally.attempts += 1;

        let Some(order) = question_set else {
            continue;
        };
        if let Some(entry) = submission.question_set(order.get()) {
            tally.set_scores.push(entry.score);
            tally.set_percentages.push(entry.percentage);
            tally.last_set_attempt = Some(match tally.last_set_attempt {
                Some(latest) if latest >= entry.submitted_at => latest,
                _ => entry.submitted_at,
            });
        }
    }

    let mut ranked: Vec<(f64, LeaderboardMetric, &ParticipantRecord)> = tallies
        .into_values()
        .filter_map(|tally| rank_key(&tally, question_set).map(|(key, metric)| (key, metric, tally.participant)))
        .collect();

    ranked.sort_by(|(left_key, _, left), (right_key, _, right)| {
        right_key.partial_cmp(left_key).unwrap_or(Ordering::Equal).then_with(|| left.id.cmp(&right.id))
    });
    ranked.truncate(LEADERBOARD_LIMIT);

    ranked
        .into_iter()
        .enumerate()
        .map(|(position, (_, metric, participant))| LeaderboardEntry {
            rank: position + 1,
            participant_id: participant.id.clone(),
            email: participant.email.clone(),
            access_code: participant.access_code.clone(),
            metric,
        })
        .collect()
}

/// Sort key plus the metric to display; `None` drops the participant.
fn rank_key(
    tally: &ParticipantTally<'_>,
    question_set: Option<QuestionSetOrder>,
) -> Option<(f64, LeaderboardMetric)> {
    let Some(order) = question_set else {
        let average_score = tally.average_score();
        return Some((
            average_score,
            LeaderboardMetric::Overall { average_score: round1(average_score), attempts: tally.attempts },
        ));
    };

    let last_attempt_at = tally.last_set_attempt?;
    let best_score = tally.best_set_score();

    Some((
        best_score,
        LeaderboardMetric::QuestionSet {
            question_set_order: order.get(),
            best_score,
            average_percentage: round1(mean(tally.set_percentages.iter().copied())),
            total_attempts: tally.set_scores.len(),
            last_attempt_at,
        },
    ))
}
