//! Environment-driven process configuration.
//!
//! Every key has a default, so a bare environment still boots a usable
//! store with the stock admin account and logging off.

use crate::logging::default_log_level;
use crate::model::user::{NewUser, UserRole};
use std::env;

pub const ENV_ADMIN_USERNAME: &str = "CRM_ADMIN_USERNAME";
pub const ENV_ADMIN_PASSWORD: &str = "CRM_ADMIN_PASSWORD";
pub const ENV_ADMIN_FULL_NAME: &str = "CRM_ADMIN_FULL_NAME";
pub const ENV_LOG_LEVEL: &str = "CRM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CRM_LOG_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrmConfig {
    /// Account created as user 1 when the store is built.
    pub admin: NewUser,
    pub logging: LogSettings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<String>,
}

impl CrmConfig {
    /// Reads configuration from the process environment, after loading a
    /// `.env` file when one is present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let default_admin = NewUser::default_admin();

        CrmConfig {
            admin: NewUser {
                username: get(ENV_ADMIN_USERNAME).unwrap_or(default_admin.username),
                password: get(ENV_ADMIN_PASSWORD).unwrap_or(default_admin.password),
                full_name: get(ENV_ADMIN_FULL_NAME).unwrap_or(default_admin.full_name),
                role: UserRole::Admin,
            },
            logging: LogSettings {
                level: get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
                log_dir: get(ENV_LOG_DIR),
            },
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
