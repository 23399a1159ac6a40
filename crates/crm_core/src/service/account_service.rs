//! Account use-case service.
//!
//! # Responsibility
//! - Check login credentials.
//! - Gate user administration behind the admin role.
//! - Keep usernames unique across create and rename.
//!
//! # Invariants
//! - Passwords are compared as stored (plaintext) and never returned.
//! - An admin cannot delete their own account.

use crate::model::user::{NewUser, PublicUser, UserPatch};
use crate::model::{ModelValidationError, UserId};
use crate::repo::Storage;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from account operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountServiceError {
    /// Unknown username or password mismatch.
    InvalidCredentials,
    /// Acting user lacks the admin role.
    Forbidden,
    UserNotFound(UserId),
    UsernameTaken(String),
    CannotDeleteSelf,
    Validation(ModelValidationError),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Forbidden => write!(f, "admin access required"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::UsernameTaken(name) => write!(f, "username already exists: `{name}`"),
            Self::CannotDeleteSelf => write!(f, "cannot delete your own account"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for AccountServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type AccountResult<T> = Result<T, AccountServiceError>;

/// Fails with `Forbidden` unless `actor` has the admin role.
pub fn require_admin(actor: &PublicUser) -> AccountResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AccountServiceError::Forbidden)
    }
}

/// Account service over a borrowed store.
pub struct AccountService<'a, S: Storage> {
    store: &'a mut S,
}

impl<'a, S: Storage> AccountService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Returns the matching account when `password` equals the stored one.
    pub fn login(&self, username: &str, password: &str) -> AccountResult<PublicUser> {
        if username.trim().is_empty() {
            return Err(ModelValidationError::BlankField("username").into());
        }
        if password.is_empty() {
            return Err(ModelValidationError::BlankField("password").into());
        }

        match self.store.get_user_by_username(username) {
            Some(user) if user.password == password => {
                info!("event=login module=account status=ok user_id={}", user.id);
                Ok(PublicUser::from(user))
            }
            _ => {
                warn!("event=login module=account status=error reason=invalid_credentials");
                Err(AccountServiceError::InvalidCredentials)
            }
        }
    }

    pub fn list_users(&self) -> Vec<PublicUser> {
        self.store
            .list_users()
            .into_iter()
            .map(PublicUser::from)
            .collect()
    }

    pub fn get_user(&self, id: UserId) -> AccountResult<PublicUser> {
        self.store
            .get_user(id)
            .map(PublicUser::from)
            .ok_or(AccountServiceError::UserNotFound(id))
    }

    pub fn create_user(&mut self, actor: &PublicUser, user: NewUser) -> AccountResult<PublicUser> {
        require_admin(actor)?;
        user.validate()?;
        if self.store.get_user_by_username(&user.username).is_some() {
            return Err(AccountServiceError::UsernameTaken(user.username));
        }

        let created = self.store.create_user(user);
        info!(
            "event=user_create module=account status=ok actor_id={} user_id={}",
            actor.id, created.id
        );
        Ok(created.into())
    }

    /// Applies the non-blank fields of `patch` to user `id`.
    pub fn update_user(
        &mut self,
        actor: &PublicUser,
        id: UserId,
        patch: UserPatch,
    ) -> AccountResult<PublicUser> {
        require_admin(actor)?;
        let patch = patch.without_blank_fields();

        if let Some(username) = patch.username.as_deref() {
            if let Some(existing) = self.store.get_user_by_username(username) {
                if existing.id != id {
                    return Err(AccountServiceError::UsernameTaken(username.to_string()));
                }
            }
        }

        self.store
            .update_user(id, patch)
            .map(PublicUser::from)
            .ok_or(AccountServiceError::UserNotFound(id))
    }

    /// Deletes user `id`. Records created by or assigned to it keep the id.
    pub fn delete_user(&mut self, actor: &PublicUser, id: UserId) -> AccountResult<()> {
        require_admin(actor)?;
        if actor.id == id {
            return Err(AccountServiceError::CannotDeleteSelf);
        }
        if !self.store.delete_user(id) {
            return Err(AccountServiceError::UserNotFound(id));
        }
        info!(
            "event=user_delete module=account status=ok actor_id={} user_id={id}",
            actor.id
        );
        Ok(())
    }
}
