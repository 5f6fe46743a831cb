use crate::db::models::SubmissionRecord;
use crate::schemas::analytics::ScoreBand;

/// Inclusive upper bounds, checked in order; anything above the last goes to the top band.
const BANDS: [(&str, f64); 4] = [("0-20", 20.0), ("21-40", 40.0), ("41-60", 60.0), ("61-80", 80.0)];
const TOP_BAND: &str = "81-100";

/// Distribution of `percentage` over completed submissions.
pub(crate) fn distribute(completed: &[&SubmissionRecord]) -> Vec<ScoreBand> {
    let mut counts = [0usize; BANDS.len() + 1];

    for submission in completed {
        let slot = BANDS
            .iter()
            .position(|(_, upper)| submission.percentage <= *upper)
            .unwrap_or(BANDS.len());
        counts[slot] += 1;
    }

    BANDS
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(TOP_BAND))
        .zip(counts)
        .map(|(label, count)| ScoreBand { label, count })
        .collect()
}
