//! Completion and throughput math for project statistics.

use crate::types::Timestamp;

/// Completion percentage of a project, rounded to two decimal places.
///
/// Returns `0.0` for a project with no rows.
pub fn completion_percentage(annotated: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (annotated as f64 / total as f64) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Mean annotations per day over the project's annotation span.
///
/// `first` is the earliest validation timestamp among annotated rows, or
/// `None` when no timestamps exist (the span then collapses to `now`).
/// The elapsed span is floored to one day so a project annotated within a
/// single day reports its full count.
pub fn mean_annotations_per_day(
    annotated: i64,
    first: Option<Timestamp>,
    now: Timestamp,
) -> i32 {
    let first = first.unwrap_or(now);
    let days = (now - first).num_days().max(1);
    (annotated as f64 / days as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_completion_zero_rows_is_zero() {
        assert_eq!(completion_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_completion_rounds_to_two_decimals() {
        // 1/3 = 33.333... -> 33.33
        assert_eq!(completion_percentage(1, 3), 33.33);
        // 2/3 = 66.666... -> 66.67
        assert_eq!(completion_percentage(2, 3), 66.67);
    }

    #[test]
    fn test_completion_bounds() {
        assert_eq!(completion_percentage(0, 10), 0.0);
        assert_eq!(completion_percentage(10, 10), 100.0);
        assert_eq!(completion_percentage(5, 10), 50.0);
    }

    #[test]
    fn test_mean_same_day_floors_to_one_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 18, 0, 0).unwrap();
        let first = now - Duration::hours(3);
        assert_eq!(mean_annotations_per_day(12, Some(first), now), 12);
    }

    #[test]
    fn test_mean_over_multiple_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let first = now - Duration::days(4);
        // 10 annotations over 4 days -> 2.5, rounded half-away-from-zero.
        assert_eq!(mean_annotations_per_day(10, Some(first), now), 3);
        assert_eq!(mean_annotations_per_day(8, Some(first), now), 2);
    }

    #[test]
    fn test_mean_no_dates_uses_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(mean_annotations_per_day(0, None, now), 0);
        assert_eq!(mean_annotations_per_day(5, None, now), 5);
    }
}
