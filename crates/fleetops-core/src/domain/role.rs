//! Role domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::permission::Permission;

/// Named bundle of permissions; many-to-many with users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Role {
    pub fn new(payload: &CreateRole, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            display_name: payload.display_name.clone(),
            description: payload.description.clone(),
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    pub fn apply(&mut self, update: &UpdateRole, updated_by: Uuid) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(display_name) = &update.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// Role together with its permission bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDetail {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<Permission>,
}

/// New role payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(length(max = 255, message = "display name is too long"))]
    pub display_name: Option<String>,

    #[validate(length(max = 1024, message = "description is too long"))]
    pub description: Option<String>,

    #[serde(default)]
    pub permission_ids: Vec<Uuid>,
}

/// Partial role update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(max = 255, message = "display name is too long"))]
    pub display_name: Option<String>,

    #[validate(length(max = 1024, message = "description is too long"))]
    pub description: Option<String>,

    pub permission_ids: Option<Vec<Uuid>>,
}
