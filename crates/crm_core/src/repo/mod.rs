//! Entity store contract and in-memory implementation.
//!
//! # Responsibility
//! - Define the per-entity CRUD contract consumed by services and statistics.
//! - Keep storage details (maps, id counters, clock) behind that contract.
//!
//! # Invariants
//! - Store operations never fail: missing ids yield `None` / `false`.
//! - The store performs no validation; callers pass already-checked input.
//! - Deleting a customer is the only cascading delete.

pub mod mem_storage;

use crate::model::customer::{Customer, CustomerPatch, NewCustomer};
use crate::model::note::{NewNote, Note};
use crate::model::permission::{NewPermission, UserCustomerPermission};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::user::{NewUser, User, UserPatch};
use crate::model::{CustomerId, NoteId, PermissionId, TaskId, UserId};
use chrono::{DateTime, Utc};

/// Storage contract for all CRM entities.
///
/// `list_*` and foreign-key queries return records in ascending id order
/// unless stated otherwise.
pub trait Storage {
    /// Instant stamped onto records created now.
    fn now(&self) -> DateTime<Utc>;

    fn list_users(&self) -> Vec<User>;
    fn get_user(&self, id: UserId) -> Option<User>;
    /// First user with exactly this username. Uniqueness is not enforced here.
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&mut self, user: NewUser) -> User;
    fn update_user(&mut self, id: UserId, patch: UserPatch) -> Option<User>;
    /// Removes the user only; records referencing it keep the dangling id.
    fn delete_user(&mut self, id: UserId) -> bool;

    fn list_customers(&self) -> Vec<Customer>;
    fn get_customer(&self, id: CustomerId) -> Option<Customer>;
    fn create_customer(&mut self, customer: NewCustomer) -> Customer;
    fn update_customer(&mut self, id: CustomerId, patch: CustomerPatch) -> Option<Customer>;
    /// Removes the customer with all of its tasks, notes and permissions.
    fn delete_customer(&mut self, id: CustomerId) -> bool;

    fn list_tasks(&self) -> Vec<Task>;
    fn get_task(&self, id: TaskId) -> Option<Task>;
    fn get_tasks_by_customer(&self, customer_id: CustomerId) -> Vec<Task>;
    fn create_task(&mut self, task: NewTask) -> Task;
    fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task>;
    fn delete_task(&mut self, id: TaskId) -> bool;

    fn list_notes(&self) -> Vec<Note>;
    fn get_note(&self, id: NoteId) -> Option<Note>;
    /// Notes of one customer, newest `created_at` first; same-instant notes keep insertion order.
    fn get_notes_by_customer(&self, customer_id: CustomerId) -> Vec<Note>;
    fn create_note(&mut self, note: NewNote) -> Note;
    fn delete_note(&mut self, id: NoteId) -> bool;

    fn list_permissions(&self) -> Vec<UserCustomerPermission>;
    fn get_permission(&self, id: PermissionId) -> Option<UserCustomerPermission>;
    fn get_user_customer_permissions(&self, user_id: UserId) -> Vec<UserCustomerPermission>;
    fn create_user_customer_permission(
        &mut self,
        permission: NewPermission,
    ) -> UserCustomerPermission;
    fn delete_user_customer_permission(&mut self, id: PermissionId) -> bool;
}
