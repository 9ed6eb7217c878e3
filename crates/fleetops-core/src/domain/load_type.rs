//! Load type domain entity (cargo classification)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadType {
    pub id: Uuid,
    pub name: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl LoadType {
    pub fn new(payload: CreateLoadType, created_by: Option<Uuid>) -> Self {
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

    pub fn apply(&mut self, update: UpdateLoadType, updated_by: Uuid) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// New load type payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLoadType {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
}

/// Partial load type update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateLoadType {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
}
