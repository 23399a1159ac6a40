//! Report views over customers and tasks.
//!
//! Lookups through foreign keys tolerate dangling references: an unresolved
//! user or customer yields `label: None` instead of dropping the row.

use crate::model::customer::{Customer, CustomerStatus};
use crate::model::task::Task;
use crate::repo::Storage;
use crate::stats::{monthly_series, yearly_series};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

const REPORT_MONTHS: usize = 12;
const TASK_REPORT_MONTHS: usize = 6;
const REPORT_YEARS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub active: usize,
    pub inactive: usize,
}

/// Customer count for one sector. `sector: None` groups customers with no
/// or blank sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorCount {
    pub sector: Option<String>,
    pub count: usize,
}

/// Task count grouped by a referenced entity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    pub id: u64,
    /// Display name of the referenced record, `None` when it no longer exists.
    pub label: Option<String>,
    pub count: usize,
}

/// New customers per month for the last twelve calendar months.
pub fn monthly_customer_series<S: Storage + ?Sized>(store: &S, now: DateTime<Utc>) -> Vec<usize> {
    monthly_series(
        store.list_customers().iter().map(|c| c.created_at),
        now,
        REPORT_MONTHS,
    )
}

/// New customers per year for the last five calendar years.
pub fn yearly_customer_series<S: Storage + ?Sized>(store: &S, now: DateTime<Utc>) -> Vec<usize> {
    yearly_series(
        store.list_customers().iter().map(|c| c.created_at),
        now,
        REPORT_YEARS,
    )
}

/// Tasks created per month for the last six calendar months.
pub fn task_growth<S: Storage + ?Sized>(store: &S, now: DateTime<Utc>) -> Vec<usize> {
    monthly_series(
        store.list_tasks().iter().map(|t| t.created_at),
        now,
        TASK_REPORT_MONTHS,
    )
}

pub fn customer_status_breakdown<S: Storage + ?Sized>(store: &S) -> StatusBreakdown {
    store
        .list_customers()
        .iter()
        .fold(StatusBreakdown::default(), |mut breakdown, customer| {
            match customer.status {
                CustomerStatus::Active => breakdown.active += 1,
                CustomerStatus::Inactive => breakdown.inactive += 1,
            }
            breakdown
        })
}

/// Customer counts per sector, in order of first appearance.
pub fn customer_sector_breakdown<S: Storage + ?Sized>(store: &S) -> Vec<SectorCount> {
    let mut counts: Vec<SectorCount> = Vec::new();

    for customer in store.list_customers() {
        let sector = customer
            .sector
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        match counts.iter_mut().find(|entry| entry.sector == sector) {
            Some(entry) => entry.count += 1,
            None => counts.push(SectorCount { sector, count: 1 }),
        }
    }

    counts
}

/// Most recently created customers, newest first.
pub fn recent_customers<S: Storage + ?Sized>(store: &S, limit: usize) -> Vec<Customer> {
    let mut customers = store.list_customers();
    // Same-instant customers keep insertion order.
    customers.sort_by_key(|customer| (Reverse(customer.created_at), customer.id));
    customers.truncate(limit);
    customers
}

/// Open tasks ordered by due date, soonest first; undated tasks go last.
pub fn upcoming_tasks<S: Storage + ?Sized>(store: &S, limit: usize) -> Vec<Task> {
    let mut tasks: Vec<Task> = store
        .list_tasks()
        .into_iter()
        .filter(Task::is_open)
        .collect();
    tasks.sort_by(|a, b| {
        let due = match (a.due_date, b.due_date) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        due.then_with(|| a.id.cmp(&b.id))
    });
    tasks.truncate(limit);
    tasks
}

/// Assignees with the most tasks, labelled with the user's full name.
pub fn tasks_per_assignee<S: Storage + ?Sized>(store: &S, limit: usize) -> Vec<RankedCount> {
    let counts = count_by(store.list_tasks().iter().filter_map(|t| t.assigned_to));
    rank(counts, limit, |id| store.get_user(id).map(|u| u.full_name))
}

/// Customers with the most tasks, labelled with the company name.
pub fn tasks_per_customer<S: Storage + ?Sized>(store: &S, limit: usize) -> Vec<RankedCount> {
    let counts = count_by(store.list_tasks().iter().filter_map(|t| t.customer_id));
    let company = |id| store.get_customer(id).map(|c| c.company_name);
    rank(counts, limit, company)
}

/// Counts ids in order of first appearance.
fn count_by(ids: impl Iterator<Item = u64>) -> Vec<(u64, usize)> {
    let mut counts: Vec<(u64, usize)> = Vec::new();
    for id in ids {
        match counts.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, count)) => *count += 1,
            None => counts.push((id, 1)),
        }
    }
    counts
}

fn rank(
    mut counts: Vec<(u64, usize)>,
    limit: usize,
    label: impl Fn(u64) -> Option<String>,
) -> Vec<RankedCount> {
    // Stable, so equal counts stay in first-appearance order.
    counts.sort_by_key(|&(_, count)| Reverse(count));
    counts
        .into_iter()
        .take(limit)
        .map(|(id, count)| RankedCount {
            id,
            label: label(id),
            count,
        })
        .collect()
}
