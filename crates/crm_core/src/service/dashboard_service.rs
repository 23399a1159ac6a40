//! Dashboard use-case service.
//!
//! Reads the store's clock once per call so every figure in one overview
//! refers to the same "current month".

use crate::model::customer::Customer;
use crate::model::task::Task;
use crate::repo::Storage;
use crate::stats::{self, CustomerStats, DashboardStats, TaskStats};
use serde::Serialize;

const DASHBOARD_LIST_LIMIT: usize = 3;

/// Everything the dashboard screen shows in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub customer_growth: Vec<usize>,
    pub recent_customers: Vec<Customer>,
    pub upcoming_tasks: Vec<Task>,
}

pub struct DashboardService<'a, S: Storage + ?Sized> {
    store: &'a S,
}

impl<'a, S: Storage + ?Sized> DashboardService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn customer_stats(&self) -> CustomerStats {
        stats::customer_stats(self.store, self.store.now())
    }

    pub fn task_stats(&self) -> TaskStats {
        stats::task_stats(self.store)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            customers: self.customer_stats(),
            tasks: self.task_stats(),
        }
    }

    pub fn overview(&self) -> DashboardOverview {
        let now = self.store.now();
        DashboardOverview {
            stats: DashboardStats {
                customers: stats::customer_stats(self.store, now),
                tasks: stats::task_stats(self.store),
            },
            customer_growth: stats::customer_growth(self.store, now),
            recent_customers: stats::recent_customers(self.store, DASHBOARD_LIST_LIMIT),
            upcoming_tasks: stats::upcoming_tasks(self.store, DASHBOARD_LIST_LIMIT),
        }
    }
}
