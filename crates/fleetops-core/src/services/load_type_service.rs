//! Load type resource service

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{CreateLoadType, LoadType, Principal, UpdateLoadType};
use crate::error::DomainError;
use crate::repositories::{ListQuery, LoadTypeRepository};
use crate::services::AccessGate;

pub struct LoadTypeService {
    repo: Arc<dyn LoadTypeRepository>,
}

impl LoadTypeService {
    pub fn new(repo: Arc<dyn LoadTypeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<LoadType>, PageMeta), DomainError> {
        AccessGate::require(actor, names::LOAD_TYPE_VIEW)?;
        let (items, total) = self.repo.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<LoadType, DomainError> {
        AccessGate::require(actor, names::LOAD_TYPE_VIEW)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("LoadType", id))
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateLoadType,
    ) -> Result<LoadType, DomainError> {
        AccessGate::require(actor, names::LOAD_TYPE_CREATE)?;
        payload.validate()?;

        if self.repo.find_by_name(&payload.name).await?.is_some() {
            warn!("LoadType creation failed: name already exists: {}", payload.name);
            return Err(DomainError::NameAlreadyExists {
                entity: "LoadType",
                name: payload.name,
            });
        }

        let load_type = LoadType::new(payload, Some(actor.id));
        let created = self.repo.create(&load_type).await?;
        info!("Created LoadType #{}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateLoadType,
    ) -> Result<LoadType, DomainError> {
        AccessGate::require(actor, names::LOAD_TYPE_UPDATE)?;
        update.validate()?;

        let mut load_type = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("LoadType", id))?;

        if let Some(name) = &update.name {
            if let Some(existing) = self.repo.find_by_name(name).await? {
                if existing.id != load_type.id {
                    return Err(DomainError::NameAlreadyExists {
                        entity: "LoadType",
                        name: name.clone(),
                    });
                }
            }
        }

        load_type.apply(update, actor.id);
        let updated = self.repo.update(&load_type).await?;
        info!("Updated LoadType #{}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::LOAD_TYPE_DELETE)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("LoadType", id))?;
        self.repo.delete(id).await?;
        info!("Deleted LoadType #{}", id);
        Ok(())
    }
}
