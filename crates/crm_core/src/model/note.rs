//! Customer note model. Notes are append-only: created and deleted, never edited.

use crate::model::{require_text, CustomerId, ModelValidationError, NoteId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
}

impl Note {
    pub fn from_new(id: NoteId, new: NewNote, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: new.content,
            customer_id: new.customer_id,
            created_at,
            created_by: new.created_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub content: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl NewNote {
    pub fn new(customer_id: CustomerId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            customer_id,
            created_by: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("content", &self.content)
    }
}
