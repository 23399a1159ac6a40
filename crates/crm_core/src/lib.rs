//! Core domain logic for the CRM.
//! Owns the entity store, statistics and the use-case rules layered on them.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CrmConfig, LogSettings};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerPatch, CustomerStatus, ImportedCustomer, NewCustomer};
pub use model::note::{NewNote, Note};
pub use model::permission::{NewPermission, UserCustomerPermission};
pub use model::task::{NewTask, Task, TaskPatch, TaskStatus};
pub use model::user::{NewUser, PublicUser, User, UserPatch, UserRole};
pub use model::{
    CustomerId, ModelValidationError, NoteId, ParseEnumError, PermissionId, TaskId, UserId,
};
pub use repo::mem_storage::MemStorage;
pub use repo::Storage;
pub use service::account_service::{require_admin, AccountService, AccountServiceError};
pub use service::customer_service::{CustomerService, CustomerServiceError};
pub use service::dashboard_service::{DashboardOverview, DashboardService};
pub use service::task_service::{TaskService, TaskServiceError};
pub use stats::{CustomerStats, DashboardStats, TaskStats};

/// Builds the process store from configuration, seeding the admin account.
pub fn open_store(config: &CrmConfig) -> MemStorage {
    MemStorage::with_admin(config.admin.clone())
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, open_store, CrmConfig, Storage, UserRole};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn open_store_seeds_configured_admin_as_first_user() {
        let store = open_store(&CrmConfig::default());
        let admin = store.get_user_by_username("admin").expect("seeded admin");
        assert_eq!(admin.id, 1);
        assert_eq!(admin.role, UserRole::Admin);
    }
}
