//! Customer use-case service.
//!
//! # Responsibility
//! - Stamp the acting user as creator on customers and notes.
//! - Apply import defaults and drop blank patch fields.
//! - Manage per-user customer access grants.
//!
//! # Invariants
//! - A note can only be attached to an existing customer.
//! - Customer deletion cascades through the store.

use crate::model::customer::{Customer, CustomerPatch, ImportedCustomer, NewCustomer};
use crate::model::note::{NewNote, Note};
use crate::model::permission::{NewPermission, UserCustomerPermission};
use crate::model::user::PublicUser;
use crate::model::{CustomerId, ModelValidationError, NoteId, PermissionId, UserId};
use crate::repo::Storage;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerServiceError {
    CustomerNotFound(CustomerId),
    NoteNotFound(NoteId),
    UserNotFound(UserId),
    PermissionNotFound(PermissionId),
    Validation(ModelValidationError),
}

impl Display for CustomerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CustomerNotFound(id) => write!(f, "customer not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::PermissionNotFound(id) => write!(f, "permission not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CustomerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for CustomerServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type CustomerResult<T> = Result<T, CustomerServiceError>;

pub struct CustomerService<'a, S: Storage> {
    store: &'a mut S,
}

impl<'a, S: Storage> CustomerService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        self.store.list_customers()
    }

    pub fn get_customer(&self, id: CustomerId) -> CustomerResult<Customer> {
        self.store
            .get_customer(id)
            .ok_or(CustomerServiceError::CustomerNotFound(id))
    }

    /// Creates a customer owned by `actor`, overriding any given creator.
    pub fn create_customer(
        &mut self,
        actor: &PublicUser,
        customer: NewCustomer,
    ) -> CustomerResult<Customer> {
        let customer = NewCustomer {
            created_by: Some(actor.id),
            ..customer
        };
        customer.validate()?;
        Ok(self.store.create_customer(customer))
    }

    /// Creates a customer from an imported spreadsheet row.
    pub fn import_customer(
        &mut self,
        actor: &PublicUser,
        row: ImportedCustomer,
    ) -> CustomerResult<Customer> {
        let customer = row.into_new_customer(actor.id);
        customer.validate()?;
        let created = self.store.create_customer(customer);
        info!(
            "event=customer_import module=customer status=ok actor_id={} customer_id={}",
            actor.id, created.id
        );
        Ok(created)
    }

    /// Applies the non-blank fields of `patch` to customer `id`.
    pub fn update_customer(
        &mut self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> CustomerResult<Customer> {
        let patch = patch.without_blank_fields();
        patch.validate()?;
        self.store
            .update_customer(id, patch)
            .ok_or(CustomerServiceError::CustomerNotFound(id))
    }

    /// Deletes customer `id` together with its tasks, notes and grants.
    pub fn delete_customer(&mut self, id: CustomerId) -> CustomerResult<()> {
        if !self.store.delete_customer(id) {
            return Err(CustomerServiceError::CustomerNotFound(id));
        }
        info!("event=customer_delete module=customer status=ok customer_id={id}");
        Ok(())
    }

    pub fn add_note(
        &mut self,
        actor: &PublicUser,
        customer_id: CustomerId,
        content: impl Into<String>,
    ) -> CustomerResult<Note> {
        if self.store.get_customer(customer_id).is_none() {
            return Err(CustomerServiceError::CustomerNotFound(customer_id));
        }
        let note = NewNote {
            content: content.into(),
            customer_id,
            created_by: Some(actor.id),
        };
        note.validate()?;
        Ok(self.store.create_note(note))
    }

    /// Notes of `customer_id`, newest first. Unknown customers have none.
    pub fn notes_for_customer(&self, customer_id: CustomerId) -> Vec<Note> {
        self.store.get_notes_by_customer(customer_id)
    }

    pub fn delete_note(&mut self, id: NoteId) -> CustomerResult<()> {
        if self.store.delete_note(id) {
            Ok(())
        } else {
            Err(CustomerServiceError::NoteNotFound(id))
        }
    }

    /// Grants `user_id` access to `customer_id`; both must exist.
    pub fn grant_access(
        &mut self,
        user_id: UserId,
        customer_id: CustomerId,
    ) -> CustomerResult<UserCustomerPermission> {
        if self.store.get_user(user_id).is_none() {
            return Err(CustomerServiceError::UserNotFound(user_id));
        }
        if self.store.get_customer(customer_id).is_none() {
            return Err(CustomerServiceError::CustomerNotFound(customer_id));
        }
        let permission = NewPermission {
            user_id,
            customer_id,
        };
        Ok(self.store.create_user_customer_permission(permission))
    }

    pub fn revoke_access(&mut self, permission_id: PermissionId) -> CustomerResult<()> {
        if self.store.delete_user_customer_permission(permission_id) {
            Ok(())
        } else {
            Err(CustomerServiceError::PermissionNotFound(permission_id))
        }
    }

    /// Customers `user_id` has been granted, skipping grants whose
    /// customer no longer resolves.
    pub fn customers_for_user(&self, user_id: UserId) -> Vec<Customer> {
        self.store
            .get_user_customer_permissions(user_id)
            .into_iter()
            .filter_map(|permission| self.store.get_customer(permission.customer_id))
            .collect()
    }
}
