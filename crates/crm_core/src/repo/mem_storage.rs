//! In-memory entity store.
//!
//! # Responsibility
//! - Keep one keyed table per entity with its own id counter.
//! - Stamp `created_at` from the injected clock.
//! - Apply the customer cascade on delete.
//!
//! # Invariants
//! - Id counters start at 1 and only move forward, so deleted ids are never reused.
//! - Patches never touch `id` or `created_at`.
//! - Data lives for the lifetime of the value; nothing is persisted.

use crate::clock::{Clock, SystemClock};
use crate::model::customer::{Customer, CustomerPatch, NewCustomer};
use crate::model::note::{NewNote, Note};
use crate::model::permission::{NewPermission, UserCustomerPermission};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::user::{NewUser, User, UserPatch};
use crate::model::{CustomerId, NoteId, PermissionId, TaskId, UserId};
use crate::repo::Storage;
use chrono::{DateTime, Utc};
use log::debug;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Keyed rows plus the next id to hand out.
#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: u64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| keep(row))
            .cloned()
            .collect()
    }

    fn find(&self, matches: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| matches(row)).cloned()
    }

    fn modify(&mut self, id: u64, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    fn remove(&mut self, id: u64) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Removes every row matching `doomed`, returning how many went.
    fn remove_where(&mut self, doomed: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !doomed(row));
        before - self.rows.len()
    }
}

/// Memory-resident CRM store.
///
/// Constructed once by the process owner and passed by reference to
/// services; there is no shared global instance.
#[derive(Debug, Clone)]
pub struct MemStorage<C: Clock = SystemClock> {
    clock: C,
    users: Table<User>,
    customers: Table<Customer>,
    tasks: Table<Task>,
    notes: Table<Note>,
    permissions: Table<UserCustomerPermission>,
}

impl MemStorage<SystemClock> {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a store holding the default admin account as user 1.
    pub fn seeded() -> Self {
        Self::with_admin(NewUser::default_admin())
    }

    /// Creates a store holding `admin` as user 1.
    pub fn with_admin(admin: NewUser) -> Self {
        let mut store = Self::new();
        store.create_user(admin);
        store
    }
}

impl Default for MemStorage<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemStorage<C> {
    /// Creates an empty store that stamps records with `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            users: Table::default(),
            customers: Table::default(),
            tasks: Table::default(),
            notes: Table::default(),
            permissions: Table::default(),
        }
    }
}

impl<C: Clock> Storage for MemStorage<C> {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn list_users(&self) -> Vec<User> {
        self.users.all()
    }

    fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(id)
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|user| user.username == username)
    }

    fn create_user(&mut self, user: NewUser) -> User {
        let created = self.users.insert_with(|id| User::from_new(id, user));
        debug!(
            "event=user_create module=store status=ok id={} role={}",
            created.id,
            created.role.as_str()
        );
        created
    }

    fn update_user(&mut self, id: UserId, patch: UserPatch) -> Option<User> {
        let updated = self.users.modify(id, |user| patch.apply_to(user));
        debug!(
            "event=user_update module=store status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    fn delete_user(&mut self, id: UserId) -> bool {
        let removed = self.users.remove(id);
        debug!(
            "event=user_delete module=store status={} id={id}",
            found_status(removed)
        );
        removed
    }

    fn list_customers(&self) -> Vec<Customer> {
        self.customers.all()
    }

    fn get_customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(id)
    }

    fn create_customer(&mut self, customer: NewCustomer) -> Customer {
        let created_at = self.clock.now();
        let created = self
            .customers
            .insert_with(|id| Customer::from_new(id, customer, created_at));
        debug!(
            "event=customer_create module=store status=ok id={}",
            created.id
        );
        created
    }

    fn update_customer(&mut self, id: CustomerId, patch: CustomerPatch) -> Option<Customer> {
        let updated = self
            .customers
            .modify(id, |customer| patch.apply_to(customer));
        debug!(
            "event=customer_update module=store status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    fn delete_customer(&mut self, id: CustomerId) -> bool {
        let tasks = self.tasks.remove_where(|task| task.customer_id == Some(id));
        let notes = self.notes.remove_where(|note| note.customer_id == id);
        let permissions = self
            .permissions
            .remove_where(|permission| permission.customer_id == id);
        let removed = self.customers.remove(id);
        debug!(
            "event=customer_delete module=store status={} id={id} cascade_tasks={tasks} cascade_notes={notes} cascade_permissions={permissions}",
            found_status(removed)
        );
        removed
    }

    fn list_tasks(&self) -> Vec<Task> {
        self.tasks.all()
    }

    fn get_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(id)
    }

    fn get_tasks_by_customer(&self, customer_id: CustomerId) -> Vec<Task> {
        self.tasks.filter(|task| task.customer_id == Some(customer_id))
    }

    fn create_task(&mut self, task: NewTask) -> Task {
        let created_at = self.clock.now();
        let created = self
            .tasks
            .insert_with(|id| Task::from_new(id, task, created_at));
        debug!(
            "event=task_create module=store status=ok id={} status_value={}",
            created.id,
            created.status.as_str()
        );
        created
    }

    fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let updated = self.tasks.modify(id, |task| patch.apply_to(task));
        debug!(
            "event=task_update module=store status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    fn delete_task(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(id);
        debug!(
            "event=task_delete module=store status={} id={id}",
            found_status(removed)
        );
        removed
    }

    fn list_notes(&self) -> Vec<Note> {
        self.notes.all()
    }

    fn get_note(&self, id: NoteId) -> Option<Note> {
        self.notes.get(id)
    }

    fn get_notes_by_customer(&self, customer_id: CustomerId) -> Vec<Note> {
        let mut notes = self.notes.filter(|note| note.customer_id == customer_id);
        // Same-instant notes keep insertion order.
        notes.sort_by_key(|note| (Reverse(note.created_at), note.id));
        notes
    }

    fn create_note(&mut self, note: NewNote) -> Note {
        let created_at = self.clock.now();
        let created = self
            .notes
            .insert_with(|id| Note::from_new(id, note, created_at));
        debug!(
            "event=note_create module=store status=ok id={} customer_id={}",
            created.id, created.customer_id
        );
        created
    }

    fn delete_note(&mut self, id: NoteId) -> bool {
        let removed = self.notes.remove(id);
        debug!(
            "event=note_delete module=store status={} id={id}",
            found_status(removed)
        );
        removed
    }

    fn list_permissions(&self) -> Vec<UserCustomerPermission> {
        self.permissions.all()
    }

    fn get_permission(&self, id: PermissionId) -> Option<UserCustomerPermission> {
        self.permissions.get(id)
    }

    fn get_user_customer_permissions(&self, user_id: UserId) -> Vec<UserCustomerPermission> {
        self.permissions.filter(|permission| permission.user_id == user_id)
    }

    fn create_user_customer_permission(
        &mut self,
        permission: NewPermission,
    ) -> UserCustomerPermission {
        let created = self
            .permissions
            .insert_with(|id| UserCustomerPermission::from_new(id, permission));
        debug!(
            "event=permission_create module=store status=ok id={} user_id={} customer_id={}",
            created.id, created.user_id, created.customer_id
        );
        created
    }

    fn delete_user_customer_permission(&mut self, id: PermissionId) -> bool {
        let removed = self.permissions.remove(id);
        debug!(
            "event=permission_delete module=store status={} id={id}",
            found_status(removed)
        );
        removed
    }
}

fn found_status(found: bool) -> &'static str {
    if found {
        "ok"
    } else {
        "not_found"
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn table_ids_keep_increasing_after_removal() {
        let mut table: Table<u64> = Table::default();
        let first = table.insert_with(|id| id);
        assert!(table.remove(first));
        let second = table.insert_with(|id| id);
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn remove_where_reports_removed_count() {
        let mut table: Table<u64> = Table::default();
        for _ in 0..5 {
            table.insert_with(|id| id % 2);
        }
        assert_eq!(table.remove_where(|row| *row == 1), 3);
        assert_eq!(table.all(), vec![0, 0]);
    }

    #[test]
    fn modify_missing_row_returns_none() {
        let mut table: Table<String> = Table::default();
        assert!(table.modify(7, |row| row.push('x')).is_none());
        assert!(table.all().is_empty());
    }
}
