//! Task record model.

use crate::model::{
    non_blank, require_text, CustomerId, ModelValidationError, ParseEnumError, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task lifecycle state. Every task is in exactly one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Postponed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Postponed => "postponed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "postponed" => Ok(Self::Postponed),
            other => Err(ParseEnumError {
                kind: "task status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub customer_id: Option<CustomerId>,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
}

impl Task {
    pub fn from_new(id: TaskId, new: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            status: new.status,
            due_date: new.due_date,
            customer_id: new.customer_id,
            assigned_to: new.assigned_to,
            created_at,
            created_by: new.created_by,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn for_customer(title: impl Into<String>, customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::new(title)
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("title", &self.title)
    }
}

/// Mutable task fields. `None` leaves the stored value untouched.
///
/// `description` may be set to an empty string; every other text field
/// treats blank input as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub customer_id: Option<CustomerId>,
    pub assigned_to: Option<UserId>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if self.description.is_some() {
            task.description = self.description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if self.due_date.is_some() {
            task.due_date = self.due_date;
        }
        if self.customer_id.is_some() {
            task.customer_id = self.customer_id;
        }
        if self.assigned_to.is_some() {
            task.assigned_to = self.assigned_to;
        }
    }

    pub fn without_blank_fields(self) -> Self {
        Self {
            title: non_blank(self.title),
            ..self
        }
    }
}
