use std::collections::HashMap;

use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::core::time::{format_iso_date, format_short_date};
use crate::db::models::SubmissionRecord;
use crate::schemas::analytics::TimeBucket;

/// Dense per-day counts: exactly `days` buckets, oldest first, ending on the
/// display-local day of `as_of`.
pub(crate) fn bucket_by_day(
    filtered: &[&SubmissionRecord],
    days: u32,
    as_of: OffsetDateTime,
    offset: UtcOffset,
) -> Vec<TimeBucket> {
    if days == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<Date, usize> = HashMap::new();
    for submission in filtered {
        *counts.entry(submission.submitted_at.to_offset(offset).date()).or_default() += 1;
    }

    let today = as_of.to_offset(offset).date();
    let first = today - Duration::days(i64::from(days) - 1);

    (0..days)
        .map(|step| {
            let date = first + Duration::days(i64::from(step));
            TimeBucket {
                date: format_iso_date(date),
                label: format_short_date(date),
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
