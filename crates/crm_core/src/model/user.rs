//! User account model.
//!
//! # Invariants
//! - `password` is stored as given (plaintext); callers must not expose it.
//! - `PublicUser` is the only user shape meant to leave the core.

use crate::model::{non_blank, require_text, ModelValidationError, ParseEnumError, UserId};
use serde::{Deserialize, Serialize};

/// Access role for a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Standard,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "standard" => Ok(Self::Standard),
            other => Err(ParseEnumError {
                kind: "user role",
                value: other.to_string(),
            }),
        }
    }
}

/// Stored user account, including its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            password: new.password,
            full_name: new.full_name,
            role: new.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Creation input for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            full_name: full_name.into(),
            role,
        }
    }

    /// Account seeded into a fresh store: `admin` / `admin123`.
    pub fn default_admin() -> Self {
        Self::new("admin", "admin123", "Admin User", UserRole::Admin)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)?;
        require_text("fullName", &self.full_name)
    }
}

/// Mutable user fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl UserPatch {
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }

    /// Returns the patch with empty text fields removed.
    pub fn without_blank_fields(self) -> Self {
        Self {
            username: non_blank(self.username),
            full_name: non_blank(self.full_name),
            password: non_blank(self.password),
            role: self.role,
        }
    }
}

/// Password-free projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
        }
    }
}

impl PublicUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
