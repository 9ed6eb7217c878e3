//! Bank resource service

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{Bank, CreateBank, Principal, UpdateBank};
use crate::error::DomainError;
use crate::repositories::{BankRepository, IncomeRepository, ListQuery};
use crate::services::AccessGate;

pub struct BankService {
    banks: Arc<dyn BankRepository>,
    incomes: Arc<dyn IncomeRepository>,
}

impl BankService {
    pub fn new(banks: Arc<dyn BankRepository>, incomes: Arc<dyn IncomeRepository>) -> Self {
        Self { banks, incomes }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<Bank>, PageMeta), DomainError> {
        AccessGate::require(actor, names::BANK_VIEW)?;
        let (items, total) = self.banks.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<Bank, DomainError> {
        AccessGate::require(actor, names::BANK_VIEW)?;
        self.banks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bank", id))
    }

    pub async fn create(&self, actor: &Principal, payload: CreateBank) -> Result<Bank, DomainError> {
        AccessGate::require(actor, names::BANK_CREATE)?;
        payload.validate()?;

        if self.banks.find_by_name(&payload.name).await?.is_some() {
            warn!("Bank creation failed: name already exists: {}", payload.name);
            return Err(DomainError::NameAlreadyExists {
                entity: "Bank",
                name: payload.name,
            });
        }

        let bank = Bank::new(payload, Some(actor.id));
        let created = self.banks.create(&bank).await?;
        info!("Created Bank #{}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateBank,
    ) -> Result<Bank, DomainError> {
        AccessGate::require(actor, names::BANK_UPDATE)?;
        update.validate()?;

        let mut bank = self
            .banks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bank", id))?;

        if let Some(name) = &update.name {
            if let Some(existing) = self.banks.find_by_name(name).await? {
                if existing.id != bank.id {
                    return Err(DomainError::NameAlreadyExists {
                        entity: "Bank",
                        name: name.clone(),
                    });
                }
            }
        }

        bank.apply(update, actor.id);
        let updated = self.banks.update(&bank).await?;
        info!("Updated Bank #{}", updated.id);
        Ok(updated)
    }

    /// Deletion is restricted while incomes still reference the bank.
    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::BANK_DELETE)?;
        self.banks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bank", id))?;

        if self.incomes.count_by_bank(id).await? > 0 {
            return Err(DomainError::Conflict {
                entity: "Bank",
                referencing: "incomes",
            });
        }

        self.banks.delete(id).await?;
        info!("Deleted Bank #{}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::bank_repository::MockBankRepository;
    use crate::repositories::income_repository::MockIncomeRepository;
    use crate::services::test_support::actor_with;

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let existing = Bank::new(CreateBank { name: "Acme".into() }, None);

        let mut banks = MockBankRepository::new();
        banks
            .expect_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));
        banks.expect_create().never();
        let incomes = MockIncomeRepository::new();

        let service = BankService::new(Arc::new(banks), Arc::new(incomes));
        let actor = actor_with(&[names::BANK_CREATE]);

        let err = service
            .create(&actor, CreateBank { name: "Acme".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NameAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn referenced_bank_cannot_be_deleted() {
        let existing = Bank::new(CreateBank { name: "Acme".into() }, None);
        let id = existing.id;

        let mut banks = MockBankRepository::new();
        banks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        banks.expect_delete().never();

        let mut incomes = MockIncomeRepository::new();
        incomes.expect_count_by_bank().returning(|_| Ok(1));

        let service = BankService::new(Arc::new(banks), Arc::new(incomes));
        let actor = actor_with(&[names::BANK_DELETE]);

        let err = service.delete(&actor, &id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict {
                entity: "Bank",
                referencing: "incomes"
            }
        ));
    }
}
