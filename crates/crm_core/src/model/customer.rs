//! Customer record model.
//!
//! # Invariants
//! - `created_at` is set by the store on creation and never patched.
//! - Deleting a customer removes its tasks, notes and permissions.

use crate::model::{
    check_email, non_blank, require_text, CustomerId, ModelValidationError, ParseEnumError, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ParseEnumError {
                kind: "customer status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub company_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub sector: Option<String>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    /// Creating user. May dangle after that user is deleted.
    pub created_by: Option<UserId>,
}

impl Customer {
    pub fn from_new(id: CustomerId, new: NewCustomer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            company_name: new.company_name,
            contact_name: new.contact_name,
            phone: new.phone,
            email: new.email,
            address: new.address,
            sector: new.sector,
            status: new.status,
            created_at,
            created_by: new.created_by,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub company_name: String,
    pub contact_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl NewCustomer {
    pub fn new(company_name: impl Into<String>, contact_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            contact_name: contact_name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("companyName", &self.company_name)?;
        require_text("contactName", &self.contact_name)?;
        check_email(self.email.as_deref())
    }
}

/// Loosely shaped customer row coming from a spreadsheet import.
///
/// Missing status falls back to `active`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportedCustomer {
    pub company_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub sector: Option<String>,
    pub status: Option<CustomerStatus>,
}

impl ImportedCustomer {
    pub fn into_new_customer(self, created_by: UserId) -> NewCustomer {
        NewCustomer {
            company_name: self.company_name,
            contact_name: self.contact_name,
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            address: non_blank(self.address),
            sector: non_blank(self.sector),
            status: self.status.unwrap_or_default(),
            created_by: Some(created_by),
        }
    }
}

/// Mutable customer fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerPatch {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub sector: Option<String>,
    pub status: Option<CustomerStatus>,
}

impl CustomerPatch {
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(company_name) = self.company_name {
            customer.company_name = company_name;
        }
        if let Some(contact_name) = self.contact_name {
            customer.contact_name = contact_name;
        }
        if self.phone.is_some() {
            customer.phone = self.phone;
        }
        if self.email.is_some() {
            customer.email = self.email;
        }
        if self.address.is_some() {
            customer.address = self.address;
        }
        if self.sector.is_some() {
            customer.sector = self.sector;
        }
        if let Some(status) = self.status {
            customer.status = status;
        }
    }

    pub fn without_blank_fields(self) -> Self {
        Self {
            company_name: non_blank(self.company_name),
            contact_name: non_blank(self.contact_name),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            address: non_blank(self.address),
            sector: non_blank(self.sector),
            status: self.status,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_email(self.email.as_deref())
    }
}
