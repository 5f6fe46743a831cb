use time::macros::format_description;
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

/// Source of the single "now" captured per pipeline invocation.
pub(crate) trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) OffsetDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Drops seconds and below so that requests within the same minute share one `as_of`.
pub(crate) fn truncate_to_minute(value: OffsetDateTime) -> OffsetDateTime {
    value.replace_second(0).and_then(|value| value.replace_nanosecond(0)).unwrap_or(value)
}

pub(crate) fn format_iso_date(value: Date) -> String {
    value.format(format_description!("[year]-[month]-[day]")).unwrap_or_else(|_| value.to_string())
}

/// Short dashboard label, e.g. `Jan 5`.
pub(crate) fn format_short_date(value: Date) -> String {
    value
        .format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| format_iso_date(value))
}

pub(crate) fn format_offset(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::UtcOffset;

    #[test]
    fn short_date_has_no_day_padding() {
        assert_eq!(format_short_date(date!(2026 - 01 - 05)), "Jan 5");
        assert_eq!(format_short_date(date!(2026 - 10 - 14)), "Oct 14");
    }

    #[test]
    fn iso_date_is_zero_padded() {
        assert_eq!(format_iso_date(date!(2026 - 03 - 07)), "2026-03-07");
    }

    #[test]
    fn truncate_to_minute_keeps_offset() {
        let value = datetime!(2026-10-14 09:41:27.5 +03:00);
        assert_eq!(truncate_to_minute(value), datetime!(2026-10-14 09:41:00 +03:00));
    }

    #[test]
    fn format_offset_preserves_offset() {
        let utc = datetime!(2025-01-02 10:20:30 UTC);
        let shifted = utc.to_offset(UtcOffset::from_hms(3, 0, 0).unwrap());
        assert_eq!(format_offset(shifted), "2025-01-02T13:20:30+03:00");
    }

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let pinned = datetime!(2026-10-14 12:00 UTC);
        assert_eq!(FixedClock(pinned).now(), pinned);
    }
}
