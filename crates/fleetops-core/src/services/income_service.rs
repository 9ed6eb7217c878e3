//! Income resource service
//!
//! Attachment writes are two-phase (stage, commit row, promote) so a failed
//! row write never leaves a permanent blob behind.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::constants::{
    ALLOWED_ATTACHMENT_EXTENSIONS, INCOME_ATTACHMENT_PREFIX, MAX_ATTACHMENT_BYTES,
};
use fleetops_shared::types::PageMeta;
use fleetops_shared::utils::file_extension;

use crate::domain::permission::names;
use crate::domain::{CreateIncome, Income, Principal, UpdateIncome};
use crate::error::DomainError;
use crate::repositories::{
    AttachmentStore, AttachmentUpload, BankRepository, IncomeRepository, ListQuery,
    OrderRepository,
};
use crate::services::AccessGate;

pub struct IncomeService {
    incomes: Arc<dyn IncomeRepository>,
    orders: Arc<dyn OrderRepository>,
    banks: Arc<dyn BankRepository>,
    attachments: Arc<dyn AttachmentStore>,
}

impl IncomeService {
    pub fn new(
        incomes: Arc<dyn IncomeRepository>,
        orders: Arc<dyn OrderRepository>,
        banks: Arc<dyn BankRepository>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            incomes,
            orders,
            banks,
            attachments,
        }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<Income>, PageMeta), DomainError> {
        AccessGate::require(actor, names::INCOME_VIEW)?;
        let (items, total) = self.incomes.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<Income, DomainError> {
        AccessGate::require(actor, names::INCOME_VIEW)?;
        self.incomes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Income", id))
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateIncome,
        upload: Option<AttachmentUpload>,
    ) -> Result<Income, DomainError> {
        AccessGate::require(actor, names::INCOME_CREATE)?;
        payload.validate()?;
        self.ensure_order_exists(&payload.order_id).await?;
        self.ensure_bank_exists(&payload.bank_id).await?;

        let mut income = Income::new(payload, Some(actor.id));

        let Some(upload) = upload else {
            let created = self.incomes.create(&income).await?;
            info!("Created Income #{}", created.id);
            return Ok(created);
        };

        validate_upload(&upload)?;
        let staged = self
            .attachments
            .stage(INCOME_ATTACHMENT_PREFIX, &upload.file_name, &upload.bytes)
            .await?;
        income.attachment = Some(staged.final_key.clone());

        let created = match self.incomes.create(&income).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(discard_err) = self.attachments.discard(&staged).await {
                    warn!("Failed to discard staged attachment: {}", discard_err);
                }
                return Err(e);
            }
        };

        if let Err(e) = self.attachments.promote(&staged).await {
            // Compensate: a committed row must not reference a missing blob.
            error!("Failed to promote attachment for Income #{}: {}", created.id, e);
            if let Err(delete_err) = self.incomes.delete(&created.id).await {
                error!("Compensating row delete failed: {}", delete_err);
            }
            let _ = self.attachments.discard(&staged).await;
            return Err(e);
        }

        info!("Created Income #{}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateIncome,
        upload: Option<AttachmentUpload>,
    ) -> Result<Income, DomainError> {
        AccessGate::require(actor, names::INCOME_UPDATE)?;
        update.validate()?;

        let mut income = self
            .incomes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Income", id))?;

        if let Some(order_id) = &update.order_id {
            self.ensure_order_exists(order_id).await?;
        }
        if let Some(bank_id) = &update.bank_id {
            self.ensure_bank_exists(bank_id).await?;
        }

        let previous_attachment = income.attachment.clone();
        income.apply(update, actor.id);

        let Some(upload) = upload else {
            let updated = self.incomes.update(&income).await?;
            info!("Updated Income #{}", updated.id);
            return Ok(updated);
        };

        validate_upload(&upload)?;
        let staged = self
            .attachments
            .stage(INCOME_ATTACHMENT_PREFIX, &upload.file_name, &upload.bytes)
            .await?;
        income.attachment = Some(staged.final_key.clone());

        let updated = match self.incomes.update(&income).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(discard_err) = self.attachments.discard(&staged).await {
                    warn!("Failed to discard staged attachment: {}", discard_err);
                }
                return Err(e);
            }
        };

        self.attachments.promote(&staged).await?;

        // The replaced blob is removed last, best-effort.
        if let Some(old) = previous_attachment {
            if Some(&old) != updated.attachment.as_ref() {
                if let Err(e) = self.attachments.delete(&old).await {
                    warn!("Failed to delete replaced attachment {}: {}", old, e);
                }
            }
        }

        info!("Updated Income #{}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::INCOME_DELETE)?;
        let income = self
            .incomes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Income", id))?;

        self.incomes.delete(id).await?;

        // Row first, then blob: a failed blob delete orphans a file (logged),
        // never a row pointing at nothing.
        if let Some(key) = income.attachment {
            if let Err(e) = self.attachments.delete(&key).await {
                warn!("Failed to delete attachment {}: {}", key, e);
            }
        }

        info!("Deleted Income #{}", id);
        Ok(())
    }

    async fn ensure_order_exists(&self, order_id: &Uuid) -> Result<(), DomainError> {
        if self.orders.find_by_id(order_id).await?.is_none() {
            return Err(DomainError::invalid_field(
                "order_id",
                "the selected order does not exist",
            ));
        }
        Ok(())
    }

    async fn ensure_bank_exists(&self, bank_id: &Uuid) -> Result<(), DomainError> {
        if self.banks.find_by_id(bank_id).await?.is_none() {
            return Err(DomainError::invalid_field(
                "bank_id",
                "the selected bank does not exist",
            ));
        }
        Ok(())
    }
}

fn validate_upload(upload: &AttachmentUpload) -> Result<(), DomainError> {
    let Some(ext) = file_extension(&upload.file_name) else {
        return Err(DomainError::invalid_field(
            "attachment",
            "file must have an extension",
        ));
    };
    if !ALLOWED_ATTACHMENT_EXTENSIONS.contains(&ext.as_str()) {
        return Err(DomainError::invalid_field(
            "attachment",
            "must be a jpg, jpeg, png, or pdf file",
        ));
    }
    if upload.bytes.is_empty() {
        return Err(DomainError::invalid_field("attachment", "file is empty"));
    }
    if upload.bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(DomainError::invalid_field(
            "attachment",
            "must not be larger than 2 MiB",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bank, CreateBank, CreateOrder, Order};
    use crate::repositories::attachment_store::{MockAttachmentStore, StagedAttachment};
    use crate::repositories::bank_repository::MockBankRepository;
    use crate::repositories::income_repository::MockIncomeRepository;
    use crate::repositories::order_repository::MockOrderRepository;
    use crate::services::test_support::actor_with;
    use chrono::NaiveDate;

    fn order() -> Order {
        Order::new(
            CreateOrder {
                order_name: "Gravel run".into(),
                amount: 1500.0,
                status: None,
            },
            None,
        )
    }

    fn bank() -> Bank {
        Bank::new(CreateBank { name: "Acme Bank".into() }, None)
    }

    fn payload(order_id: Uuid, bank_id: Uuid) -> CreateIncome {
        CreateIncome {
            order_id,
            amount: 250.0,
            received_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            bank_id,
            account_number: "0001-0002".into(),
            payment_type: None,
            remark: None,
        }
    }

    fn upload(name: &str) -> AttachmentUpload {
        AttachmentUpload {
            file_name: name.into(),
            bytes: vec![1, 2, 3],
        }
    }

    fn staged() -> StagedAttachment {
        StagedAttachment {
            staging_key: ".staging/abc.pdf".into(),
            final_key: "attachments/incomes/abc.pdf".into(),
        }
    }

    fn service_with(
        incomes: MockIncomeRepository,
        attachments: MockAttachmentStore,
        order: Order,
        bank: Bank,
    ) -> IncomeService {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        let mut banks = MockBankRepository::new();
        banks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(bank.clone())));
        IncomeService::new(
            Arc::new(incomes),
            Arc::new(orders),
            Arc::new(banks),
            Arc::new(attachments),
        )
    }

    #[tokio::test]
    async fn create_with_attachment_stages_then_promotes() {
        let order = order();
        let bank = bank();

        let mut incomes = MockIncomeRepository::new();
        incomes.expect_create().returning(|income| Ok(income.clone()));

        let mut attachments = MockAttachmentStore::new();
        attachments
            .expect_stage()
            .times(1)
            .returning(|_, _, _| Ok(staged()));
        attachments.expect_promote().times(1).returning(|_| Ok(()));
        attachments.expect_discard().never();

        let service = service_with(incomes, attachments, order.clone(), bank.clone());
        let actor = actor_with(&[names::INCOME_CREATE]);

        let created = service
            .create(&actor, payload(order.id, bank.id), Some(upload("receipt.pdf")))
            .await
            .unwrap();

        assert_eq!(created.attachment.as_deref(), Some("attachments/incomes/abc.pdf"));
        assert_eq!(created.created_by, Some(actor.id));
    }

    #[tokio::test]
    async fn failed_row_write_discards_staging() {
        let order = order();
        let bank = bank();

        let mut incomes = MockIncomeRepository::new();
        incomes
            .expect_create()
            .returning(|_| Err(DomainError::DatabaseError("insert failed".into())));

        let mut attachments = MockAttachmentStore::new();
        attachments.expect_stage().returning(|_, _, _| Ok(staged()));
        attachments.expect_discard().times(1).returning(|_| Ok(()));
        attachments.expect_promote().never();

        let service = service_with(incomes, attachments, order.clone(), bank.clone());
        let actor = actor_with(&[names::INCOME_CREATE]);

        let err = service
            .create(&actor, payload(order.id, bank.id), Some(upload("receipt.pdf")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn rejected_extension_never_touches_the_store() {
        let order = order();
        let bank = bank();

        let mut incomes = MockIncomeRepository::new();
        incomes.expect_create().never();

        let mut attachments = MockAttachmentStore::new();
        attachments.expect_stage().never();

        let service = service_with(incomes, attachments, order.clone(), bank.clone());
        let actor = actor_with(&[names::INCOME_CREATE]);

        match service
            .create(&actor, payload(order.id, bank.id), Some(upload("malware.exe")))
            .await
            .unwrap_err()
        {
            DomainError::Validation(errors) => assert!(errors.contains_key("attachment")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_order_is_a_field_error() {
        let mut incomes = MockIncomeRepository::new();
        incomes.expect_create().never();

        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|_| Ok(None));
        let banks = MockBankRepository::new();
        let attachments = MockAttachmentStore::new();

        let service = IncomeService::new(
            Arc::new(incomes),
            Arc::new(orders),
            Arc::new(banks),
            Arc::new(attachments),
        );
        let actor = actor_with(&[names::INCOME_CREATE]);

        match service
            .create(&actor, payload(Uuid::new_v4(), Uuid::new_v4()), None)
            .await
            .unwrap_err()
        {
            DomainError::Validation(errors) => assert!(errors.contains_key("order_id")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_removes_row_then_blob() {
        let order = order();
        let bank = bank();
        let mut income = Income::new(payload(order.id, bank.id), None);
        income.attachment = Some("attachments/incomes/old.pdf".into());
        let id = income.id;
        let found = income.clone();

        let mut incomes = MockIncomeRepository::new();
        incomes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        incomes.expect_delete().times(1).returning(|_| Ok(()));

        let mut attachments = MockAttachmentStore::new();
        attachments
            .expect_delete()
            .withf(|key| key == "attachments/incomes/old.pdf")
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(incomes, attachments, order, bank);
        let actor = actor_with(&[names::INCOME_DELETE]);

        service.delete(&actor, &id).await.unwrap();
    }

    #[tokio::test]
    async fn replacing_attachment_deletes_previous_blob() {
        let order = order();
        let bank = bank();
        let mut income = Income::new(payload(order.id, bank.id), None);
        income.attachment = Some("attachments/incomes/old.pdf".into());
        let id = income.id;
        let found = income.clone();

        let mut incomes = MockIncomeRepository::new();
        incomes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        incomes.expect_update().returning(|income| Ok(income.clone()));

        let mut attachments = MockAttachmentStore::new();
        attachments.expect_stage().returning(|_, _, _| Ok(staged()));
        attachments.expect_promote().times(1).returning(|_| Ok(()));
        attachments
            .expect_delete()
            .withf(|key| key == "attachments/incomes/old.pdf")
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(incomes, attachments, order, bank);
        let actor = actor_with(&[names::INCOME_UPDATE]);

        let updated = service
            .update(&actor, &id, UpdateIncome::default(), Some(upload("new.pdf")))
            .await
            .unwrap();
        assert_eq!(updated.attachment.as_deref(), Some("attachments/incomes/abc.pdf"));
    }
}
