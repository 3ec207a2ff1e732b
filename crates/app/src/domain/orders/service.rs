//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};
use vitrine::{
    duplicates::{find_duplicates, pending_annotations},
    orders::{Order, OrderId},
};

use crate::{
    database::Db,
    domain::orders::{
        data::{FlaggedOrder, NewOrder, OrderUpdate},
        errors::OrdersServiceError,
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.list_flagged_orders",
        skip(self),
        fields(
            order_count = tracing::field::Empty,
            duplicate_count = tracing::field::Empty,
            marked_count = tracing::field::Empty
        ),
        err
    )]
    async fn list_flagged_orders(&self) -> Result<Vec<FlaggedOrder>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders_for_update(&mut tx).await?;

        let duplicates = find_duplicates(&orders);
        let annotations = pending_annotations(&orders, &duplicates);
        let marked_count = annotations.len();

        for (order_id, observation) in annotations {
            self.repository
                .update_observation(&mut tx, order_id, &observation)
                .await?;

            if let Some(order) = orders.iter_mut().find(|order| order.id == order_id) {
                order.observation = observation;
            }
        }

        tx.commit().await?;

        let span = Span::current();

        span.record("order_count", tracing::field::display(orders.len()));
        span.record("duplicate_count", tracing::field::display(duplicates.len()));
        span.record("marked_count", tracing::field::display(marked_count));

        if marked_count > 0 {
            info!(marked_count, "marked duplicate orders");
        }

        Ok(orders
            .into_iter()
            .map(|order| FlaggedOrder {
                duplicate: duplicates.contains(&order.id),
                order,
            })
            .collect())
    }

    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(order_id = tracing::field::Empty, item_count = order.items.len()),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let order = Order::place(
            order.customer,
            order.items,
            order.customer_status,
            Timestamp::now(),
        );

        Span::current().record("order_id", tracing::field::display(order.id));

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_order(&mut tx, &order).await?;

        tx.commit().await?;

        info!(order_id = %created.id, total_price = created.total_price, "created order");

        Ok(created)
    }

    #[tracing::instrument(
        name = "orders.service.update_order",
        skip(self, update),
        fields(order_id = %order),
        err
    )]
    async fn update_order(
        &self,
        order: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_order(&mut tx, order, &update).await?;

        tx.commit().await?;

        info!(order_id = %order, "updated order");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.delete_order",
        skip(self),
        fields(order_id = %order),
        err
    )]
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_id = %order, "deleted order");

        Ok(())
    }

    async fn has_orders_for(&self, national_id: String) -> Result<bool, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let exists = self
            .repository
            .order_exists_for_cpf(&mut tx, &national_id)
            .await?;

        tx.commit().await?;

        Ok(exists)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves all orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieves all orders, newest first, with duplicate flags.
    ///
    /// Flagged orders whose observation is not yet marked get the duplicate marker persisted
    /// before the list is returned.
    async fn list_flagged_orders(&self) -> Result<Vec<FlaggedOrder>, OrdersServiceError>;

    /// Records a new open order placed now.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Changes the status, observation or registration status of an order.
    async fn update_order(
        &self,
        order: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes an order.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;

    /// Whether any order was placed with this CPF.
    async fn has_orders_for(&self, national_id: String) -> Result<bool, OrdersServiceError>;
}
