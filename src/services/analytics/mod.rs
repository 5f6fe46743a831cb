//! Aggregation engine behind the analytics and leaderboard dashboards.
//!
//! Every function here is pure: it reads borrowed records plus a pinned
//! `as_of` instant and returns plain view models. Nothing is cached or
//! persisted at this level.

pub(crate) mod filters;
pub(crate) mod leaderboard;
pub(crate) mod pipeline;
pub(crate) mod question_difficulty;
pub(crate) mod question_index;
pub(crate) mod quiz_performance;
pub(crate) mod score_histogram;
pub(crate) mod summary;
pub(crate) mod time_series;

#[cfg(test)]
pub(crate) mod fixtures;

/// `part / total * 100`, or 0 when there is nothing to divide by.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values.into_iter().fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round_whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_guards_zero_denominator() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(Vec::new()), 0.0);
        assert_eq!(mean([80.0, 60.0]), 70.0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(12.04), 12.0);
        assert_eq!(round_whole(33.5), 34);
        assert_eq!(round_whole(-0.2), 0);
    }
}
