use std::collections::HashSet;

use crate::db::models::SubmissionRecord;
use crate::schemas::analytics::SummaryStats;
use crate::services::analytics::{mean, percent, round1};

pub(crate) fn completed<'a>(filtered: &[&'a SubmissionRecord]) -> Vec<&'a SubmissionRecord> {
    filtered.iter().copied().filter(|submission| submission.status.is_completed()).collect()
}

/// Headline numbers. Active users count every participant in `filtered`, finished or not.
pub(crate) fn summarize(filtered: &[&SubmissionRecord]) -> SummaryStats {
    let completed = completed(filtered);

    let active_users: HashSet<&str> =
        filtered.iter().filter_map(|submission| submission.participant_id()).collect();

    SummaryStats {
        total_submissions: filtered.len(),
        completion_rate: round1(percent(completed.len(), filtered.len())),
        average_score: round1(mean(completed.iter().map(|submission| submission.percentage))),
        average_time: mean(completed.iter().map(|submission| submission.time_taken_seconds))
            .round()
            .max(0.0) as u64,
        active_users: active_users.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::SubmissionStatus;
    use crate::services::analytics::fixtures::submission;

    #[test]
    fn empty_input_yields_all_zero_summary() {
        let stats = summarize(&[]);
        assert_eq!(
            stats,
            SummaryStats {
                total_submissions: 0,
                completion_rate: 0.0,
                average_score: 0.0,
                average_time: 0,
                active_users: 0,
            }
        );
    }

    #[test]
    fn single_completed_submission() {
        let records = [submission("s1").percentage(75.0).time_taken(120.0).build()];
        let filtered: Vec<_> = records.iter().collect();

        let stats = summarize(&filtered);

        assert_eq!(stats.completion_rate, 100.0);
        assert_eq!(stats.average_score, 75.0);
        assert_eq!(stats.average_time, 120);
        assert_eq!(stats.active_users, 1);
    }

    #[test]
    fn averages_use_completed_only_but_active_users_use_everything() {
        let records = [
            submission("s1").participant("u1").percentage(90.0).time_taken(100.0).build(),
            submission("s2")
                .participant("u2")
                .status(SubmissionStatus::AutoGraded)
                .percentage(61.0)
                .time_taken(51.0)
                .build(),
            submission("s3")
                .participant("u3")
                .status(SubmissionStatus::InProgress)
                .percentage(10.0)
                .time_taken(5.0)
                .build(),
            submission("s4").no_participant().status(SubmissionStatus::Unknown).build(),
        ];
        let filtered: Vec<_> = records.iter().collect();

        let stats = summarize(&filtered);

        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(stats.average_score, 75.5);
        assert_eq!(stats.average_time, 76);
        assert_eq!(stats.active_users, 3);
    }

    #[test]
    fn completion_rate_is_rounded_to_one_decimal() {
        let records = [
            submission("s1").build(),
            submission("s2").status(SubmissionStatus::Abandoned).build(),
            submission("s3").status(SubmissionStatus::Scheduled).build(),
        ];
        let filtered: Vec<_> = records.iter().collect();

        let stats = summarize(&filtered);

        assert_eq!(stats.completion_rate, 33.3);
        assert!((0.0..=100.0).contains(&stats.completion_rate));
    }
}
