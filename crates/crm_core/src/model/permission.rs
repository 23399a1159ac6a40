//! User-to-customer access grant.

use crate::model::{CustomerId, PermissionId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCustomerPermission {
    pub id: PermissionId,
    pub user_id: UserId,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    pub user_id: UserId,
    pub customer_id: CustomerId,
}

impl UserCustomerPermission {
    pub fn from_new(id: PermissionId, new: NewPermission) -> Self {
        Self {
            id,
            user_id: new.user_id,
            customer_id: new.customer_id,
        }
    }
}
