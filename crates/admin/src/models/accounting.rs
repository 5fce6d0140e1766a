//! Accounting domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fournil_core::{AccountingEntryId, AccountingKind};

/// A dated accounting entry.
#[derive(Debug, Clone)]
pub struct AccountingEntry {
    /// Unique entry ID.
    pub id: AccountingEntryId,
    /// Date the entry applies to.
    pub entry_date: NaiveDate,
    /// What the entry is for.
    pub label: String,
    /// Amount in euros. Always positive; direction comes from `kind`.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: AccountingKind,
}

/// Data for creating an accounting entry.
#[derive(Debug, Clone)]
pub struct NewAccountingEntry {
    /// Date the entry applies to.
    pub entry_date: NaiveDate,
    /// What the entry is for.
    pub label: String,
    /// Amount in euros (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: AccountingKind,
}

/// Income, expense and net totals for one calendar month.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthSummary {
    /// Sum of income entries.
    pub income: Decimal,
    /// Sum of expense entries.
    pub expense: Decimal,
}

impl MonthSummary {
    /// Net result for the month.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}
