//! Pure aggregation and formatting over execution history.
//!
//! Everything here is deterministic given its inputs and never mutates the
//! record list it is handed. The views call into these; nothing here touches
//! a data source.

use chrono::{DateTime, Utc};

use super::models::{EtlExecution, ExecutionStatus};

/// Per-status execution counts. Statuses absent from the input stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub success: u64,
    pub warning: u64,
    pub error: u64,
    pub running: u64,
}

impl StatusCounts {
    pub fn of(&self, status: ExecutionStatus) -> u64 {
        match status {
            ExecutionStatus::Success => self.success,
            ExecutionStatus::Warning => self.warning,
            ExecutionStatus::Error => self.error,
            ExecutionStatus::Running => self.running,
        }
    }
}

pub fn count_by_status(records: &[EtlExecution]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for record in records {
        match record.status {
            ExecutionStatus::Success => counts.success += 1,
            ExecutionStatus::Warning => counts.warning += 1,
            ExecutionStatus::Error => counts.error += 1,
            ExecutionStatus::Running => counts.running += 1,
        }
    }
    counts
}

/// Sum of `records_processed` across the given runs. Zero when empty.
pub fn total_processed(records: &[EtlExecution]) -> u64 {
    records.iter().map(|r| r.records_processed).sum()
}

/// Header-row statistics for the execution-history view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodStats {
    pub total: u64,
    pub successful: u64,
    /// Runs that ended with errors or warnings.
    pub with_errors: u64,
    pub total_records: u64,
}

pub fn period_stats(records: &[EtlExecution]) -> PeriodStats {
    let counts = count_by_status(records);
    PeriodStats {
        total: records.len() as u64,
        successful: counts.success,
        with_errors: counts.error + counts.warning,
        total_records: total_processed(records),
    }
}

/// Render seconds as `"<m>m <s>s"`. Minutes never roll over into hours.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Render a timestamp relative to `now` for recent events, absolute otherwise.
///
/// Under an hour: "N minute(s) ago". Under a day: "N hour(s) ago". Both
/// boundaries are half-open, so exactly 60 minutes renders as "1 hour ago"
/// and exactly 1440 minutes switches to the absolute form.
pub fn format_last_execution(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);

    if minutes < 60 {
        format!("{} {} ago", minutes, pluralize(minutes, "minute"))
    } else if minutes < 1440 {
        let hours = minutes / 60;
        format!("{} {} ago", hours, pluralize(hours, "hour"))
    } else {
        timestamp.format("%-d %B %H:%M").to_string()
    }
}

fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Render a count with thousands separators, e.g. 80601 -> "80,601".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixture::Fixture;
    use chrono::{Duration, TimeZone};

    #[test]
    fn count_by_status_empty_is_all_zero() {
        let counts = count_by_status(&[]);
        assert_eq!(counts, StatusCounts::default());
        for status in [
            ExecutionStatus::Success,
            ExecutionStatus::Warning,
            ExecutionStatus::Error,
            ExecutionStatus::Running,
        ] {
            assert_eq!(counts.of(status), 0);
        }
    }

    #[test]
    fn count_by_status_over_demo_fixture() {
        let fixture = Fixture::demo();
        let counts = count_by_status(&fixture.executions);
        assert_eq!(counts.success, 4);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.running, 0);
    }

    #[test]
    fn total_processed_sums_and_splits_consistently() {
        let fixture = Fixture::demo();
        let records = &fixture.executions;

        let success: u64 = records.iter().map(|r| r.records_success).sum();
        let error: u64 = records.iter().map(|r| r.records_error).sum();

        assert_eq!(total_processed(records), 80601);
        assert_eq!(total_processed(records), success + error);
        assert_eq!(total_processed(&[]), 0);
    }

    #[test]
    fn period_stats_over_demo_fixture() {
        let fixture = Fixture::demo();
        let stats = period_stats(&fixture.executions);
        assert_eq!(
            stats,
            PeriodStats {
                total: 6,
                successful: 4,
                with_errors: 2,
                total_records: 80601,
            }
        );
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(65), "1m 5s");
        assert_eq!(format_duration(3599), "59m 59s");
        assert_eq!(format_duration(3600), "60m 0s");
    }

    #[test]
    fn relative_time_minute_tier() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();

        assert_eq!(format_last_execution(now, now), "0 minutes ago");
        assert_eq!(
            format_last_execution(now - Duration::minutes(1), now),
            "1 minute ago"
        );
        assert_eq!(
            format_last_execution(now - Duration::minutes(59), now),
            "59 minutes ago"
        );
    }

    #[test]
    fn relative_time_hour_tier_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();

        assert_eq!(
            format_last_execution(now - Duration::minutes(60), now),
            "1 hour ago"
        );
        assert_eq!(
            format_last_execution(now - Duration::minutes(119), now),
            "1 hour ago"
        );
        assert_eq!(
            format_last_execution(now - Duration::minutes(120), now),
            "2 hours ago"
        );
        assert_eq!(
            format_last_execution(now - Duration::minutes(1439), now),
            "23 hours ago"
        );
    }

    #[test]
    fn relative_time_switches_to_absolute_after_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
        let day_ago = now - Duration::minutes(1440);

        assert_eq!(format_last_execution(day_ago, now), "9 February 12:00");
    }

    #[test]
    fn count_formatting() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(80601), "80,601");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
