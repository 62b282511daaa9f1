//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rand::{SeedableRng, rngs::StdRng};
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use storefront::order_numbers::{OrderNumber, OrderNumberAllocator};
use tracing::info;

use crate::{
    database::Db,
    domain::orders::{
        data::NewOrder,
        errors::OrdersServiceError,
        records::{OrderItemRecord, OrderRecord, OrderStats, OrderUuid},
        registry::PgOrderNumberRegistry,
        repositories::{PgOrderItemsRepository, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    allocator: OrderNumberAllocator,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            allocator: OrderNumberAllocator::default(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in self.items_repository.get_order_items(tx, &uuids).await? {
            items.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;
        let mut rng = StdRng::from_entropy();

        let order_number = {
            let mut registry = PgOrderNumberRegistry::new(&mut tx, &self.orders_repository);

            self.allocator.allocate(&mut rng, &mut registry).await?
        };

        let mut created = self
            .orders_repository
            .create_order(&mut tx, &order, order_number)
            .await?;

        for item in &order.items {
            let item = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, item)
                .await?;

            created.items.push(item);
        }

        tx.commit().await?;

        info!(
            order_number = %created.order_number,
            order_uuid = %created.uuid,
            items = created.items.len(),
            total = created.total,
            "order stored"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;
        let mut orders = self.with_items(&mut tx, vec![order]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn get_order_by_number(
        &self,
        order_number: OrderNumber,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders_repository
            .get_order_by_number(&mut tx, order_number)
            .await?;

        let mut orders = self.with_items(&mut tx, vec![order]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn find_orders_by_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .find_orders_by_phone(&mut tx, phone)
            .await?;

        let orders = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders_repository.list_orders(&mut tx).await?;
        let orders = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn set_paid(
        &self,
        order: OrderUuid,
        is_paid: bool,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders_repository
            .set_paid(&mut tx, order, is_paid)
            .await?;

        let mut orders = self.with_items(&mut tx, vec![order]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn order_stats(&self) -> Result<OrderStats, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = self.orders_repository.order_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Store an order and its items under a freshly allocated order number.
    ///
    /// Either the order and every item are stored, or nothing is.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve the order carrying `order_number`.
    async fn get_order_by_number(
        &self,
        order_number: OrderNumber,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed with exactly this phone number, newest first.
    async fn find_orders_by_phone(&self, phone: &str)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Mark an order paid or unpaid.
    async fn set_paid(
        &self,
        order: OrderUuid,
        is_paid: bool,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order together with its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Dashboard figures.
    async fn order_stats(&self) -> Result<OrderStats, OrdersServiceError>;
}
