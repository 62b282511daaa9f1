//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashSet;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use storefront::{order_numbers::OrderNumber, payments::PaymentMethod, promotions::PromoCodeName};

use crate::{
    database::{decode_amount, encode_amount},
    domain::orders::{
        data::NewOrder,
        records::{OrderRecord, OrderStats, OrderUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const GET_ORDER_BY_NUMBER_SQL: &str = include_str!("../sql/get_order_by_number.sql");
const FIND_ORDERS_BY_PHONE_SQL: &str = include_str!("../sql/find_orders_by_phone.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const SET_PAID_SQL: &str = include_str!("../sql/set_paid.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");
const ORDER_NUMBER_TAKEN_SQL: &str = include_str!("../sql/order_number_taken.sql");
const TAKEN_ORDER_NUMBERS_SQL: &str = include_str!("../sql/taken_order_numbers.sql");
const ORDER_STATS_SQL: &str = include_str!("../sql/order_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        order_number: OrderNumber,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order_number.to_string())
            .bind(&order.customer_name)
            .bind(&order.customer_email)
            .bind(&order.customer_phone)
            .bind(&order.customer_address)
            .bind(order.payment_method.as_str())
            .bind(order.promo_code.as_ref().map(PromoCodeName::as_str))
            .bind(encode_amount("discount_amount", order.discount_amount)?)
            .bind(encode_amount("total", order.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: OrderNumber,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_BY_NUMBER_SQL)
            .bind(order_number.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_orders_by_phone(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        phone: &str,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(FIND_ORDERS_BY_PHONE_SQL)
            .bind(phone)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        is_paid: bool,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_PAID_SQL)
            .bind(order.into_uuid())
            .bind(is_paid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn is_order_number_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: OrderNumber,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(ORDER_NUMBER_TAKEN_SQL)
            .bind(order_number.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn taken_order_numbers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<FxHashSet<OrderNumber>, sqlx::Error> {
        let numbers: Vec<String> = query_scalar(TAKEN_ORDER_NUMBERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        numbers
            .iter()
            .map(String::as_str)
            .map(decode_order_number)
            .collect()
    }

    pub(crate) async fn order_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<OrderStats, sqlx::Error> {
        let row = query(ORDER_STATS_SQL).fetch_one(&mut **tx).await?;

        Ok(OrderStats {
            total_orders: decode_amount("total_orders", row.try_get("total_orders")?)?,
            paid_orders: decode_amount("paid_orders", row.try_get("paid_orders")?)?,
            pending_orders: decode_amount("pending_orders", row.try_get("pending_orders")?)?,
            paid_revenue: decode_amount("paid_revenue", row.try_get("paid_revenue")?)?,
        })
    }
}

fn decode_order_number(value: &str) -> Result<OrderNumber, sqlx::Error> {
    OrderNumber::from_str(value).map_err(|error| sqlx::Error::ColumnDecode {
        index: "order_number".to_string(),
        source: Box::new(error),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let order_number: String = row.try_get("order_number")?;
        let payment_method: String = row.try_get("payment_method")?;
        let promo_code: Option<String> = row.try_get("promo_code")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: decode_order_number(&order_number)?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            customer_address: row.try_get("customer_address")?,
            payment_method: PaymentMethod::from_str(&payment_method).map_err(|message| {
                sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: message.into(),
                }
            })?,
            promo_code: promo_code
                .as_deref()
                .map(PromoCodeName::new)
                .transpose()
                .map_err(|error| sqlx::Error::ColumnDecode {
                    index: "promo_code".to_string(),
                    source: Box::new(error),
                })?,
            discount_amount: decode_amount("discount_amount", row.try_get("discount_amount")?)?,
            total: decode_amount("total", row.try_get("total")?)?,
            is_paid: row.try_get("is_paid")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
