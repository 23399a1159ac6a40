//! Statistics derived from the entity store.
//!
//! # Responsibility
//! - Compute dashboard counters and calendar-month series on demand.
//! - Provide report breakdowns (status, sector, per-assignee, per-customer).
//!
//! # Invariants
//! - Every call scans the current store contents; nothing is cached.
//! - Month buckets compare calendar (year, month) pairs in UTC, never a
//!   rolling day window.
//! - Empty stores produce zero counts, never errors.

pub mod dashboard;
pub mod report;

use chrono::{DateTime, Datelike, Utc};

pub use dashboard::{
    customer_growth, customer_stats, task_stats, CustomerStats, DashboardStats, TaskStats,
    GROWTH_MONTHS,
};
pub use report::{
    customer_sector_breakdown, customer_status_breakdown, monthly_customer_series,
    recent_customers, task_growth, tasks_per_assignee, tasks_per_customer, upcoming_tasks,
    yearly_customer_series, RankedCount, SectorCount, StatusBreakdown,
};

/// Absolute month number, so month arithmetic never clamps or overflows days.
pub(crate) fn month_index(instant: DateTime<Utc>) -> i64 {
    i64::from(instant.year()) * 12 + i64::from(instant.month0())
}

/// Counts `instants` into `months` calendar-month buckets ending with the
/// month of `now`, oldest bucket first.
pub fn monthly_series(
    instants: impl IntoIterator<Item = DateTime<Utc>>,
    now: DateTime<Utc>,
    months: usize,
) -> Vec<usize> {
    let mut buckets = vec![0; months];
    let current = month_index(now);
    let oldest = current - months as i64 + 1;

    for instant in instants {
        let index = month_index(instant);
        if (oldest..=current).contains(&index) {
            buckets[(index - oldest) as usize] += 1;
        }
    }

    buckets
}

/// Counts `instants` into `years` calendar-year buckets ending with the
/// year of `now`, oldest first.
pub fn yearly_series(
    instants: impl IntoIterator<Item = DateTime<Utc>>,
    now: DateTime<Utc>,
    years: usize,
) -> Vec<usize> {
    let mut buckets = vec![0; years];
    let current = i64::from(now.year());
    let oldest = current - years as i64 + 1;

    for instant in instants {
        let year = i64::from(instant.year());
        if (oldest..=current).contains(&year) {
            buckets[(year - oldest) as usize] += 1;
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::{month_index, monthly_series, yearly_series};
    use chrono::{TimeZone, Utc};

    #[test]
    fn month_index_crosses_year_boundary() {
        let january = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let december = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(month_index(january) - month_index(december), 1);
    }

    #[test]
    fn monthly_series_buckets_by_calendar_month() {
        let now = Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap();
        let instants = [
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 31, 23, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            // Outside the six-month window.
            Utc.with_ymd_and_hms(2024, 8, 31, 0, 0, 0).unwrap(),
            // Future months are ignored too.
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        ];

        assert_eq!(monthly_series(instants, now, 6), vec![1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn monthly_series_with_zero_months_is_empty() {
        let now = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
        assert!(monthly_series([now], now, 0).is_empty());
    }

    #[test]
    fn month_end_does_not_skip_short_months() {
        // Five months before the 31st of March must still land on October.
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 8, 0, 0).unwrap();
        let february = Utc.with_ymd_and_hms(2025, 2, 28, 8, 0, 0).unwrap();
        let october = Utc.with_ymd_and_hms(2024, 10, 31, 8, 0, 0).unwrap();

        assert_eq!(
            monthly_series([february, october], now, 6),
            vec![1, 0, 0, 0, 1, 0]
        );
    }

    #[test]
    fn yearly_series_counts_last_years() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let instants = [
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ];
        assert_eq!(yearly_series(instants, now, 5), vec![1, 0, 0, 0, 1]);
    }
}
