//! Accounting entry repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use fournil_core::{AccountingEntryId, AccountingKind};

use super::RepositoryError;
use crate::models::{AccountingEntry, MonthSummary, NewAccountingEntry};

/// Internal row type for accounting queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountingEntryRow {
    id: i32,
    entry_date: NaiveDate,
    label: String,
    amount: Decimal,
    kind: AccountingKind,
}

impl From<AccountingEntryRow> for AccountingEntry {
    fn from(row: AccountingEntryRow) -> Self {
        Self {
            id: AccountingEntryId::new(row.id),
            entry_date: row.entry_date,
            label: row.label,
            amount: row.amount,
            kind: row.kind,
        }
    }
}

/// Repository for accounting database operations.
pub struct AccountingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountingRepository<'a> {
    /// Create a new accounting repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List entries for a calendar month, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_month(
        &self,
        year: i32,
        month: u8,
    ) -> Result<Vec<AccountingEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountingEntryRow>(
            r"
            SELECT id, entry_date, label, amount, kind
            FROM accounting_entry
            WHERE date_part('year', entry_date) = $1
              AND date_part('month', entry_date) = $2
            ORDER BY entry_date DESC, id DESC
            ",
        )
        .bind(f64::from(year))
        .bind(f64::from(month))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Income and expense totals for a calendar month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn month_summary(
        &self,
        year: i32,
        month: u8,
    ) -> Result<MonthSummary, RepositoryError> {
        #[derive(Debug, sqlx::FromRow)]
        struct SummaryRow {
            income: Option<Decimal>,
            expense: Option<Decimal>,
        }

        let row = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT
                SUM(amount) FILTER (WHERE kind = 'income') AS income,
                SUM(amount) FILTER (WHERE kind = 'expense') AS expense
            FROM accounting_entry
            WHERE date_part('year', entry_date) = $1
              AND date_part('month', entry_date) = $2
            ",
        )
        .bind(f64::from(year))
        .bind(f64::from(month))
        .fetch_one(self.pool)
        .await?;

        Ok(MonthSummary {
            income: row.income.unwrap_or_default(),
            expense: row.expense.unwrap_or_default(),
        })
    }

    /// Create an accounting entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        entry: &NewAccountingEntry,
    ) -> Result<AccountingEntry, RepositoryError> {
        let row = sqlx::query_as::<_, AccountingEntryRow>(
            r"
            INSERT INTO accounting_entry (entry_date, label, amount, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, entry_date, label, amount, kind
            ",
        )
        .bind(entry.entry_date)
        .bind(&entry.label)
        .bind(entry.amount)
        .bind(entry.kind)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete an accounting entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry does not exist.
    pub async fn delete(&self, id: AccountingEntryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM accounting_entry WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
