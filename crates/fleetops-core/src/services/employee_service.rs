//! Employee resource service

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{CreateEmployee, Employee, Principal, UpdateEmployee};
use crate::error::DomainError;
use crate::repositories::{EmployeeRepository, ListQuery};
use crate::services::AccessGate;

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<Employee>, PageMeta), DomainError> {
        AccessGate::require(actor, names::EMPLOYEE_VIEW)?;
        let (items, total) = self.repo.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<Employee, DomainError> {
        AccessGate::require(actor, names::EMPLOYEE_VIEW)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateEmployee,
    ) -> Result<Employee, DomainError> {
        AccessGate::require(actor, names::EMPLOYEE_CREATE)?;
        payload.validate()?;

        if self.repo.find_by_email(&payload.email).await?.is_some() {
            warn!("Employee creation failed: email already exists: {}", payload.email);
            return Err(DomainError::EmailAlreadyExists(payload.email));
        }

        let employee = Employee::new(payload, Some(actor.id));
        let created = self.repo.create(&employee).await?;
        info!("Created Employee #{}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateEmployee,
    ) -> Result<Employee, DomainError> {
        AccessGate::require(actor, names::EMPLOYEE_UPDATE)?;
        update.validate()?;

        let mut employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))?;

        if let Some(email) = &update.email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != employee.id {
                    return Err(DomainError::EmailAlreadyExists(email.clone()));
                }
            }
        }

        employee.apply(update, actor.id);
        let updated = self.repo.update(&employee).await?;
        info!("Updated Employee #{}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::EMPLOYEE_DELETE)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", id))?;
        self.repo.delete(id).await?;
        info!("Deleted Employee #{}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeType;
    use crate::repositories::employee_repository::MockEmployeeRepository;
    use crate::services::test_support::actor_with;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn payload() -> CreateEmployee {
        CreateEmployee {
            first_name: "A".into(),
            last_name: "B".into(),
            email: SafeEmail().fake(),
            phone: "123".into(),
            employee_type: EmployeeType::Driver,
            hire_date: None,
        }
    }

    #[tokio::test]
    async fn create_stamps_acting_principal() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|employee| Ok(employee.clone()));

        let actor = actor_with(&[names::EMPLOYEE_CREATE]);
        let service = EmployeeService::new(Arc::new(repo));

        let created = service.create(&actor, payload()).await.unwrap();
        assert_eq!(created.created_by, Some(actor.id));
        assert_eq!(created.updated_by, Some(actor.id));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let duplicate = payload();
        let existing = Employee::new(duplicate.clone(), None);

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let actor = actor_with(&[names::EMPLOYEE_CREATE]);
        let service = EmployeeService::new(Arc::new(repo));

        let err = service.create(&actor, duplicate).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn create_without_permission_is_denied_before_any_io() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let actor = actor_with(&[names::EMPLOYEE_VIEW]);
        let service = EmployeeService::new(Arc::new(repo));

        let err = service.create(&actor, payload()).await.unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_mutates_nothing() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let actor = actor_with(&[names::EMPLOYEE_UPDATE]);
        let service = EmployeeService::new(Arc::new(repo));

        let err = service
            .update(&actor, &Uuid::new_v4(), UpdateEmployee::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_keeps_created_by() {
        let creator = Uuid::new_v4();
        let mut original = Employee::new(payload(), Some(creator));
        original.created_by = Some(creator);
        let found = original.clone();

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update()
            .returning(|employee| Ok(employee.clone()));

        let actor = actor_with(&[names::EMPLOYEE_UPDATE]);
        let service = EmployeeService::new(Arc::new(repo));

        let updated = service
            .update(
                &actor,
                &original.id,
                UpdateEmployee {
                    phone: Some("987".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.created_by, Some(creator));
        assert_eq!(updated.updated_by, Some(actor.id));
        assert_eq!(updated.phone, "987");
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let actor = actor_with(&[names::EMPLOYEE_DELETE]);
        let service = EmployeeService::new(Arc::new(repo));

        let err = service.delete(&actor, &Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_payload_reports_field_errors() {
        let mut bad = payload();
        bad.email = "not-an-email".into();
        bad.first_name = "".into();

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let actor = actor_with(&[names::EMPLOYEE_CREATE]);
        let service = EmployeeService::new(Arc::new(repo));

        match service.create(&actor, bad).await.unwrap_err() {
            DomainError::Validation(errors) => {
                assert!(errors.contains_key("email"));
                assert!(errors.contains_key("first_name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
