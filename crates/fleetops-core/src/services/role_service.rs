//! Role resource service

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{CreateRole, Permission, Principal, Role, RoleDetail, UpdateRole};
use crate::error::DomainError;
use crate::repositories::{ListQuery, PermissionRepository, RoleRepository};
use crate::services::AccessGate;

pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, permissions: Arc<dyn PermissionRepository>) -> Self {
        Self { roles, permissions }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<Role>, PageMeta), DomainError> {
        AccessGate::require(actor, names::ROLE_VIEW)?;
        let (items, total) = self.roles.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<RoleDetail, DomainError> {
        AccessGate::require(actor, names::ROLE_VIEW)?;
        self.roles
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", id))
    }

    /// The seeded permission catalogue, for role forms.
    pub async fn list_permissions(&self, actor: &Principal) -> Result<Vec<Permission>, DomainError> {
        AccessGate::require(actor, names::ROLE_VIEW)?;
        self.permissions.list_all().await
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateRole,
    ) -> Result<RoleDetail, DomainError> {
        AccessGate::require(actor, names::ROLE_CREATE)?;
        payload.validate()?;

        if self.roles.find_by_name(&payload.name).await?.is_some() {
            warn!("Role creation failed: name already exists: {}", payload.name);
            return Err(DomainError::NameAlreadyExists {
                entity: "Role",
                name: payload.name,
            });
        }
        self.ensure_permissions_exist(&payload.permission_ids).await?;

        let role = Role::new(&payload, Some(actor.id));
        let created = self.roles.create(&role, &payload.permission_ids).await?;
        info!("Created Role #{}", created.role.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateRole,
    ) -> Result<RoleDetail, DomainError> {
        AccessGate::require(actor, names::ROLE_UPDATE)?;
        update.validate()?;

        let mut role = self
            .roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", id))?;

        if let Some(name) = &update.name {
            if let Some(existing) = self.roles.find_by_name(name).await? {
                if existing.id != role.id {
                    return Err(DomainError::NameAlreadyExists {
                        entity: "Role",
                        name: name.clone(),
                    });
                }
            }
        }
        if let Some(permission_ids) = &update.permission_ids {
            self.ensure_permissions_exist(permission_ids).await?;
        }

        let permission_ids = update.permission_ids.clone();
        role.apply(&update, actor.id);
        let updated = self.roles.update(&role, permission_ids.as_deref()).await?;
        info!("Updated Role #{}", updated.role.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::ROLE_DELETE)?;
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", id))?;
        self.roles.delete(id).await?;
        info!("Deleted Role #{}", id);
        Ok(())
    }

    async fn ensure_permissions_exist(&self, ids: &[Uuid]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }
        let known: HashSet<Uuid> = self
            .permissions
            .list_all()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        if ids.iter().any(|id| !known.contains(id)) {
            return Err(DomainError::invalid_field(
                "permission_ids",
                "one or more selected permissions do not exist",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::permission_repository::MockPermissionRepository;
    use crate::repositories::role_repository::MockRoleRepository;
    use crate::services::test_support::actor_with;

    fn catalogue() -> Vec<Permission> {
        names::ALL
            .iter()
            .map(|name| Permission {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn unknown_permission_ids_are_rejected() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|_| Ok(None));
        roles.expect_create().never();

        let mut permissions = MockPermissionRepository::new();
        let known = catalogue();
        permissions
            .expect_list_all()
            .returning(move || Ok(known.clone()));

        let service = RoleService::new(Arc::new(roles), Arc::new(permissions));
        let actor = actor_with(&[names::ROLE_CREATE]);

        let err = service
            .create(
                &actor,
                CreateRole {
                    name: "dispatcher".into(),
                    display_name: None,
                    description: None,
                    permission_ids: vec![Uuid::new_v4()],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_attaches_selected_permissions() {
        let known = catalogue();
        let selected: Vec<Uuid> = known.iter().take(2).map(|p| p.id).collect();
        let attached: Vec<Permission> = known.iter().take(2).cloned().collect();

        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|_| Ok(None));
        let attached_clone = attached.clone();
        roles.expect_create().returning(move |role, ids| {
            assert_eq!(ids.len(), 2);
            Ok(RoleDetail {
                role: role.clone(),
                permissions: attached_clone.clone(),
            })
        });

        let mut permissions = MockPermissionRepository::new();
        let known_clone = known.clone();
        permissions
            .expect_list_all()
            .returning(move || Ok(known_clone.clone()));

        let service = RoleService::new(Arc::new(roles), Arc::new(permissions));
        let actor = actor_with(&[names::ROLE_CREATE]);

        let created = service
            .create(
                &actor,
                CreateRole {
                    name: "dispatcher".into(),
                    display_name: Some("Dispatcher".into()),
                    description: None,
                    permission_ids: selected,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.permissions.len(), 2);
        assert_eq!(created.role.created_by, Some(actor.id));
    }
}
