//! User resource service

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_security::PasswordService;
use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{CreateUser, Principal, UpdateUser, User, UserDetail};
use crate::error::DomainError;
use crate::repositories::{ListQuery, RoleRepository, UserRepository};
use crate::services::AccessGate;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<User>, PageMeta), DomainError> {
        AccessGate::require(actor, names::USER_VIEW)?;
        let (items, total) = self.users.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<UserDetail, DomainError> {
        AccessGate::require(actor, names::USER_VIEW)?;
        self.users
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateUser,
    ) -> Result<UserDetail, DomainError> {
        AccessGate::require(actor, names::USER_CREATE)?;
        payload.validate()?;

        if self.users.find_by_email(&payload.email).await?.is_some() {
            warn!("User creation failed: email already exists: {}", payload.email);
            return Err(DomainError::EmailAlreadyExists(payload.email));
        }
        self.ensure_roles_exist(&payload.role_ids).await?;

        let password_hash = PasswordService::hash(&payload.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = User::new(&payload, password_hash, Some(actor.id));
        let created = self.users.create(&user, &payload.role_ids).await?;
        info!("Created User #{}", created.user.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateUser,
    ) -> Result<UserDetail, DomainError> {
        AccessGate::require(actor, names::USER_UPDATE)?;
        update.validate()?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if let Some(email) = &update.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user.id {
                    return Err(DomainError::EmailAlreadyExists(email.clone()));
                }
            }
        }
        if let Some(role_ids) = &update.role_ids {
            self.ensure_roles_exist(role_ids).await?;
        }

        if let Some(password) = &update.password {
            user.password_hash = PasswordService::hash(password)
                .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        }

        let role_ids = update.role_ids.clone();
        user.apply(&update, actor.id);
        let updated = self.users.update(&user, role_ids.as_deref()).await?;
        info!("Updated User #{}", updated.user.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::USER_DELETE)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;
        self.users.delete(id).await?;
        info!("Deleted User #{}", id);
        Ok(())
    }

    async fn ensure_roles_exist(&self, ids: &[Uuid]) -> Result<(), DomainError> {
        for id in ids {
            if self.roles.find_by_id(id).await?.is_none() {
                return Err(DomainError::invalid_field(
                    "role_ids",
                    "one or more selected roles do not exist",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::role_repository::MockRoleRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::services::test_support::actor_with;

    fn payload() -> CreateUser {
        CreateUser {
            name: "Dispatch Don".into(),
            email: "don@example.com".into(),
            phone: None,
            password: "a-long-password".into(),
            role_ids: vec![],
        }
    }

    #[tokio::test]
    async fn password_is_hashed_before_persisting() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|user, _| {
            assert_ne!(user.password_hash, "a-long-password");
            assert!(user.password_hash.starts_with("$argon2"));
            Ok(UserDetail {
                user: user.clone(),
                roles: vec![],
            })
        });
        let roles = MockRoleRepository::new();

        let service = UserService::new(Arc::new(users), Arc::new(roles));
        let actor = actor_with(&[names::USER_CREATE]);

        let created = service.create(&actor, payload()).await.unwrap();
        assert_eq!(created.user.created_by, Some(actor.id));
    }

    #[tokio::test]
    async fn short_password_fails_validation() {
        let mut bad = payload();
        bad.password = "short".into();

        let mut users = MockUserRepository::new();
        users.expect_find_by_email().never();
        users.expect_create().never();
        let roles = MockRoleRepository::new();

        let service = UserService::new(Arc::new(users), Arc::new(roles));
        let actor = actor_with(&[names::USER_CREATE]);

        match service.create(&actor, bad).await.unwrap_err() {
            DomainError::Validation(errors) => assert!(errors.contains_key("password")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
