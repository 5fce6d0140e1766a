//! Order repository for the back-office.
//!
//! Orders are written by the storefront at checkout; this repository reads
//! and manages them. Listings filter on the decomposed delivery columns
//! (`delivery_year`, `delivery_month`, `delivery_day`) and sort on
//! `sequence_in_month`, so ordering stays numeric past sequence 99.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fournil_core::{ClientId, DeliveryDate, OrderId, OrderNumber, OrderStatus, Price};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// Internal row type for order queries (joined with the client).
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    delivery_year: i32,
    delivery_month: i32,
    delivery_day: i32,
    status: OrderStatus,
    client_id: i32,
    client_name: String,
    client_email: String,
    items: serde_json::Value,
    total_cents: i64,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let number = OrderNumber::parse(&row.order_number).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid order number {:?} in database: {e}",
                row.order_number
            ))
        })?;

        let delivery = u16::try_from(row.delivery_year)
            .ok()
            .zip(u8::try_from(row.delivery_month).ok())
            .zip(u8::try_from(row.delivery_day).ok())
            .and_then(|((y, m), d)| DeliveryDate::from_parts(y, m, d).ok())
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "invalid delivery date {}-{}-{} in database",
                    row.delivery_year, row.delivery_month, row.delivery_day
                ))
            })?;

        let items: Vec<OrderItem> = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order items: {e}")))?;

        Ok(Self {
            id: OrderId::new(row.id),
            number,
            delivery,
            status: row.status,
            client_id: ClientId::new(row.client_id),
            client_name: row.client_name,
            client_email: row.client_email,
            items,
            total: Price::from_cents(row.total_cents),
            note: row.note,
            created_at: row.created_at,
        })
    }
}

const ORDER_SELECT: &str = r"
    SELECT o.id, o.order_number,
           o.delivery_year, o.delivery_month, o.delivery_day,
           o.status, o.client_id,
           c.name AS client_name, c.email AS client_email,
           o.items, o.total_cents, o.note, o.created_at
    FROM customer_order o
    JOIN client c ON c.id = o.client_id
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders for a delivery month, newest sequence first, optionally
    /// filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_month(
        &self,
        year: u16,
        month: u8,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "{ORDER_SELECT}
            WHERE o.delivery_year = $1 AND o.delivery_month = $2
              AND ($3::order_status IS NULL OR o.status = $3)
            ORDER BY o.sequence_in_month DESC"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(i32::from(year))
            .bind(i32::from(month))
            .bind(status)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List orders to produce for one delivery day, cancelled excluded,
    /// in allocation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_delivery_day(
        &self,
        delivery: DeliveryDate,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "{ORDER_SELECT}
            WHERE o.delivery_year = $1 AND o.delivery_month = $2 AND o.delivery_day = $3
              AND o.status <> 'cancelled'
            ORDER BY o.sequence_in_month"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(i32::from(delivery.year()))
            .bind(i32::from(delivery.month()))
            .bind(i32::from(delivery.day()))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Recent orders of one client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "{ORDER_SELECT}
            WHERE o.client_id = $1
            ORDER BY o.created_at DESC
            LIMIT 20"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(client_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = $1");

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Update an order's status.
    ///
    /// Transition legality is the caller's concern; this only persists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE customer_order SET status = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(status)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Search orders by number or client name/email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn search(&self, query: &str) -> Result<Vec<Order>, RepositoryError> {
        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
        let sql = format!(
            "{ORDER_SELECT}
            WHERE o.order_number ILIKE $1 OR c.name ILIKE $1 OR c.email ILIKE $1
            ORDER BY o.created_at DESC
            LIMIT 25"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(pattern)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Number of orders for a delivery month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_month(&self, year: u16, month: u8) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM customer_order
            WHERE delivery_year = $1 AND delivery_month = $2
            ",
        )
        .bind(i32::from(year))
        .bind(i32::from(month))
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
