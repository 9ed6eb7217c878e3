//! Bank domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub id: Uuid,
    pub name: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Bank {
    pub fn new(payload: CreateBank, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    pub fn apply(&mut self, update: UpdateBank, updated_by: Uuid) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// New bank payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBank {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
}

/// Partial bank update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBank {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
}
