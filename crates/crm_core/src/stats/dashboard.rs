//! Dashboard counters: customer totals, task status partition, growth series.

use crate::model::task::TaskStatus;
use crate::repo::Storage;
use crate::stats::{month_index, monthly_series};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of calendar months in the dashboard growth series.
pub const GROWTH_MONTHS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: usize,
    pub active_customers: usize,
    /// Customers created in the calendar month of the reference instant.
    pub monthly_new_customers: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub postponed_tasks: usize,
}

impl TaskStats {
    pub fn total(&self) -> usize {
        self.pending_tasks + self.completed_tasks + self.postponed_tasks
    }
}

/// Flat dashboard payload combining customer and task counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(flatten)]
    pub customers: CustomerStats,
    #[serde(flatten)]
    pub tasks: TaskStats,
}

pub fn customer_stats<S: Storage + ?Sized>(store: &S, now: DateTime<Utc>) -> CustomerStats {
    let current = month_index(now);
    let customers = store.list_customers();

    CustomerStats {
        total_customers: customers.len(),
        active_customers: customers.iter().filter(|c| c.is_active()).count(),
        monthly_new_customers: customers
            .iter()
            .filter(|c| month_index(c.created_at) == current)
            .count(),
    }
}

pub fn task_stats<S: Storage + ?Sized>(store: &S) -> TaskStats {
    store
        .list_tasks()
        .iter()
        .fold(TaskStats::default(), |mut stats, task| {
            match task.status {
                TaskStatus::Pending => stats.pending_tasks += 1,
                TaskStatus::Completed => stats.completed_tasks += 1,
                TaskStatus::Postponed => stats.postponed_tasks += 1,
            }
            stats
        })
}

/// New customers per calendar month for the current month and the five
/// before it, oldest first.
pub fn customer_growth<S: Storage + ?Sized>(store: &S, now: DateTime<Utc>) -> Vec<usize> {
    monthly_series(
        store.list_customers().iter().map(|c| c.created_at),
        now,
        GROWTH_MONTHS,
    )
}
