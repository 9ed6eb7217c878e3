//! Order resource service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use fleetops_shared::types::PageMeta;

use crate::domain::permission::names;
use crate::domain::{CreateOrder, Order, Principal, UpdateOrder};
use crate::error::DomainError;
use crate::repositories::{IncomeRepository, ListQuery, OrderRepository};
use crate::services::AccessGate;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    incomes: Arc<dyn IncomeRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, incomes: Arc<dyn IncomeRepository>) -> Self {
        Self { orders, incomes }
    }

    pub async fn list(
        &self,
        actor: &Principal,
        query: &ListQuery,
    ) -> Result<(Vec<Order>, PageMeta), DomainError> {
        AccessGate::require(actor, names::ORDER_VIEW)?;
        let (items, total) = self.orders.list(query).await?;
        Ok((items, PageMeta::new(&query.pagination, total)))
    }

    pub async fn get(&self, actor: &Principal, id: &Uuid) -> Result<Order, DomainError> {
        AccessGate::require(actor, names::ORDER_VIEW)?;
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    pub async fn create(
        &self,
        actor: &Principal,
        payload: CreateOrder,
    ) -> Result<Order, DomainError> {
        AccessGate::require(actor, names::ORDER_CREATE)?;
        payload.validate()?;

        let order = Order::new(payload, Some(actor.id));
        let created = self.orders.create(&order).await?;
        info!("Created Order #{}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Principal,
        id: &Uuid,
        update: UpdateOrder,
    ) -> Result<Order, DomainError> {
        AccessGate::require(actor, names::ORDER_UPDATE)?;
        update.validate()?;

        let mut order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        order.apply(update, actor.id);
        let updated = self.orders.update(&order).await?;
        info!("Updated Order #{}", updated.id);
        Ok(updated)
    }

    /// Deletion is restricted while incomes still reference the order.
    pub async fn delete(&self, actor: &Principal, id: &Uuid) -> Result<(), DomainError> {
        AccessGate::require(actor, names::ORDER_DELETE)?;
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        if self.incomes.count_by_order(id).await? > 0 {
            return Err(DomainError::Conflict {
                entity: "Order",
                referencing: "incomes",
            });
        }

        self.orders.delete(id).await?;
        info!("Deleted Order #{}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::income_repository::MockIncomeRepository;
    use crate::repositories::order_repository::MockOrderRepository;
    use crate::services::test_support::actor_with;

    fn payload() -> CreateOrder {
        CreateOrder {
            order_name: "Timber haul".into(),
            amount: 900.0,
            status: None,
        }
    }

    #[tokio::test]
    async fn delete_is_restricted_while_referenced() {
        let existing = Order::new(payload(), None);
        let id = existing.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        orders.expect_delete().never();

        let mut incomes = MockIncomeRepository::new();
        incomes.expect_count_by_order().returning(|_| Ok(3));

        let service = OrderService::new(Arc::new(orders), Arc::new(incomes));
        let actor = actor_with(&[names::ORDER_DELETE]);

        let err = service.delete(&actor, &id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn unreferenced_order_deletes() {
        let existing = Order::new(payload(), None);
        let id = existing.id;

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        orders.expect_delete().times(1).returning(|_| Ok(()));

        let mut incomes = MockIncomeRepository::new();
        incomes.expect_count_by_order().returning(|_| Ok(0));

        let service = OrderService::new(Arc::new(orders), Arc::new(incomes));
        let actor = actor_with(&[names::ORDER_DELETE]);

        service.delete(&actor, &id).await.unwrap();
    }

    #[tokio::test]
    async fn create_defaults_status_to_pending() {
        let mut orders = MockOrderRepository::new();
        orders.expect_create().returning(|order| Ok(order.clone()));
        let incomes = MockIncomeRepository::new();

        let service = OrderService::new(Arc::new(orders), Arc::new(incomes));
        let actor = actor_with(&[names::ORDER_CREATE]);

        let created = service.create(&actor, payload()).await.unwrap();
        assert_eq!(created.status, crate::domain::OrderStatus::Pending);
    }
}
