//! User domain entity and the acting principal

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,

    // Never serialized; defaults to empty when a response is decoded back.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl User {
    pub fn new(payload: &CreateUser, password_hash: String, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            password_hash,
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    pub fn apply(&mut self, update: &UpdateUser, updated_by: Uuid) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// User together with assigned roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<Role>,
}

/// Authenticated actor: user identity plus the union of permissions across
/// all held roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub permissions: HashSet<String>,
}

/// New user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 20, message = "phone is too long"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128, message = "password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub role_ids: Vec<Uuid>,
}

/// Partial user update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "phone is too long"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128, message = "password must be at least 8 characters"))]
    pub password: Option<String>,

    pub role_ids: Option<Vec<Uuid>>,
}
