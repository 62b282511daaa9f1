//! Order number registry backed by the orders table.

use rustc_hash::FxHashSet;
use sqlx::{Postgres, Transaction};
use storefront::order_numbers::{OrderNumber, OrderNumberRegistry};

use crate::domain::orders::repositories::PgOrdersRepository;

/// Reads taken order numbers inside the transaction that will store the new order.
pub(crate) struct PgOrderNumberRegistry<'a, 'c> {
    tx: &'a mut Transaction<'c, Postgres>,
    repository: &'a PgOrdersRepository,
}

impl<'a, 'c> PgOrderNumberRegistry<'a, 'c> {
    pub(crate) fn new(
        tx: &'a mut Transaction<'c, Postgres>,
        repository: &'a PgOrdersRepository,
    ) -> Self {
        Self { tx, repository }
    }
}

impl OrderNumberRegistry for PgOrderNumberRegistry<'_, '_> {
    type Error = sqlx::Error;

    async fn is_taken(&mut self, number: OrderNumber) -> Result<bool, sqlx::Error> {
        self.repository.is_order_number_taken(self.tx, number).await
    }

    async fn taken_numbers(&mut self) -> Result<FxHashSet<OrderNumber>, sqlx::Error> {
        self.repository.taken_order_numbers(self.tx).await
    }
}
