//! Order repository: persistence plus order-number allocation.
//!
//! Order numbers are `DD-MM-NN` with the sequence scoped to the delivery
//! month. The number is stored formatted for display and search, but the
//! source of truth is the decomposed `(delivery_year, delivery_month,
//! sequence_in_month)` columns: a unique index over them makes allocation
//! safe under concurrent checkouts, and sorting on the integer column
//! keeps ordering numeric past sequence 99.
//!
//! Allocation is read-max-then-insert. Two concurrent checkouts for the
//! same month can read the same maximum; the unique index rejects the
//! second insert, which re-reads and retries. A store failure during the
//! read aborts the allocation - the sequence never silently restarts at 1
//! because the database was erroring.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use fournil_core::{
    ClientId, DeliveryDate, OrderId, OrderNumber, OrderStatus, Price, next_sequence,
};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderItem};

/// Attempts before giving up on a contended month.
const MAX_ALLOCATION_ATTEMPTS: u32 = 3;

/// Name of the unique index guarding `(year, month, sequence)`.
const MONTH_SEQUENCE_CONSTRAINT: &str = "customer_order_month_sequence_idx";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    delivery_year: i32,
    delivery_month: i32,
    delivery_day: i32,
    status: OrderStatus,
    client_id: i32,
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
            items,
            total: Price::from_cents(row.total_cents),
            note: row.note,
            created_at: row.created_at,
        })
    }
}

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

    /// Highest sequence already allocated for a delivery month, if any.
    ///
    /// `MAX` over an empty month comes back as NULL, which is the
    /// "no prior order" case and distinct from a failing query.
    async fn current_max_sequence(
        &self,
        delivery: DeliveryDate,
    ) -> Result<Option<u32>, RepositoryError> {
        let max: Option<i32> = sqlx::query_scalar(
            r"
            SELECT MAX(sequence_in_month)
            FROM customer_order
            WHERE delivery_year = $1 AND delivery_month = $2
            ",
        )
        .bind(i32::from(delivery.year()))
        .bind(i32::from(delivery.month()))
        .fetch_one(self.pool)
        .await?;

        max.map(|m| {
            u32::try_from(m).map_err(|_| {
                RepositoryError::DataCorruption(format!("negative sequence {m} in database"))
            })
        })
        .transpose()
    }

    /// Persist an order, allocating its number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store fails - allocation
    /// fails closed rather than guessing a sequence.
    /// Returns `RepositoryError::Conflict` if the month stays contended
    /// after retries.
    #[instrument(skip(self, new_order), fields(delivery = %new_order.delivery))]
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let delivery = new_order.delivery;
        let items = serde_json::to_value(&new_order.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable items: {e}")))?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let sequence = next_sequence(self.current_max_sequence(delivery).await?);
            let number = OrderNumber::new(delivery, sequence);

            let inserted = sqlx::query_as::<_, OrderRow>(
                r"
                INSERT INTO customer_order
                    (order_number, delivery_year, delivery_month, delivery_day,
                     sequence_in_month, status, client_id, items, total_cents,
                     payment_intent_id, note)
                VALUES ($1, $2, $3, $4, $5, 'new', $6, $7, $8, $9, $10)
                RETURNING id, order_number,
                          delivery_year, delivery_month, delivery_day,
                          status, client_id, items, total_cents, note, created_at
                ",
            )
            .bind(number.to_string())
            .bind(i32::from(delivery.year()))
            .bind(i32::from(delivery.month()))
            .bind(i32::from(delivery.day()))
            .bind(i64::from(sequence))
            .bind(new_order.client_id.as_i32())
            .bind(&items)
            .bind(new_order.total.cents())
            .bind(&new_order.payment_intent_id)
            .bind(new_order.note.as_deref())
            .fetch_one(self.pool)
            .await;

            match inserted {
                Ok(row) => return row.try_into(),
                Err(sqlx::Error::Database(db))
                    if db.constraint() == Some(MONTH_SEQUENCE_CONSTRAINT) =>
                {
                    // Lost the race for this sequence; re-read and retry.
                    tracing::debug!(%number, attempt, "sequence taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RepositoryError::Conflict(format!(
            "order number allocation for {:02}/{} still contended after {MAX_ALLOCATION_ATTEMPTS} attempts",
            delivery.month(),
            delivery.year()
        )))
    }

    /// Fetch an order by its number, for the confirmation page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_number(
        &self,
        number: &OrderNumber,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, order_number,
                   delivery_year, delivery_month, delivery_day,
                   status, client_id, items, total_cents, note, created_at
            FROM customer_order
            WHERE order_number = $1
            ",
        )
        .bind(number.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Whether a payment intent has already been consumed by an order.
    ///
    /// Guards against a double-submitted completion form creating two
    /// orders for one payment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, order_number,
                   delivery_year, delivery_month, delivery_day,
                   status, client_id, items, total_cents, note, created_at
            FROM customer_order
            WHERE payment_intent_id = $1
            ",
        )
        .bind(payment_intent_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
