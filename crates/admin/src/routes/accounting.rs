//! Accounting route handlers (owner only).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use fournil_core::{AccountingEntryId, AccountingKind};

use crate::db::AccountingRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::OwnerPage;
use crate::models::NewAccountingEntry;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One entry in the accounting table.
struct EntryLineView {
    id: i32,
    date: String,
    label: String,
    amount: String,
    kind: String,
}

/// Accounting page template.
#[derive(Template)]
#[template(path = "accounting/index.html")]
struct AccountingTemplate {
    staff: StaffView,
    current_path: String,
    month_label: String,
    entries: Vec<EntryLineView>,
    income: String,
    expense: String,
    net: String,
}

/// Build the accounting router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accounting", get(index).post(create))
        .route("/accounting/{id}/delete", post(delete))
}

/// Accounting query parameters.
#[derive(Debug, Deserialize)]
struct AccountingQuery {
    /// Month as `YYYY-MM`; defaults to the current month.
    month: Option<String>,
}

/// Parse a `YYYY-MM` month parameter.
fn parse_month(raw: Option<&str>) -> Option<(i32, u8)> {
    let raw = raw?;
    let (y, m) = raw.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    Some((y.parse().ok()?, m.parse().ok()?)).filter(|&(_, m)| (1..=12).contains(&m))
}

/// Entries and totals for one month.
///
/// GET /accounting
#[instrument(skip(staff, state))]
async fn index(
    OwnerPage(staff): OwnerPage,
    State(state): State<AppState>,
    Query(query): Query<AccountingQuery>,
) -> Result<Html<String>, AppError> {
    let today = Utc::now().date_naive();
    #[allow(clippy::cast_possible_truncation)]
    let (year, month) =
        parse_month(query.month.as_deref()).unwrap_or((today.year(), today.month() as u8));

    let repo = AccountingRepository::new(state.pool());
    let entries = repo.list_for_month(year, month).await?;
    let summary = repo.month_summary(year, month).await?;

    let html = AccountingTemplate {
        staff: StaffView::from(&staff),
        current_path: "/accounting".to_string(),
        month_label: format!("{year:04}-{month:02}"),
        entries: entries
            .iter()
            .map(|e| EntryLineView {
                id: e.id.as_i32(),
                date: e.entry_date.format("%d/%m/%Y").to_string(),
                label: e.label.clone(),
                amount: format!("{} €", e.amount),
                kind: e.kind.to_string(),
            })
            .collect(),
        income: format!("{} €", summary.income),
        expense: format!("{} €", summary.expense),
        net: format!("{} €", summary.net()),
    }
    .render()?;

    Ok(Html(html))
}

/// New entry form data.
#[derive(Debug, Deserialize)]
struct EntryForm {
    entry_date: String,
    label: String,
    amount: String,
    kind: String,
}

/// Create an accounting entry.
///
/// POST /accounting
#[instrument(skip(_staff, state))]
async fn create(
    OwnerPage(_staff): OwnerPage,
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<impl IntoResponse, AppError> {
    let entry_date = NaiveDate::parse_from_str(&form.entry_date, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("invalid date: {e}")))?;

    let label = form.label.trim();
    if label.is_empty() {
        return Err(AppError::BadRequest("label cannot be empty".to_string()));
    }

    let amount: Decimal = form
        .amount
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::BadRequest("invalid amount".to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("amount must be positive".to_string()));
    }

    let kind = match form.kind.as_str() {
        "income" => AccountingKind::Income,
        "expense" => AccountingKind::Expense,
        other => {
            return Err(AppError::BadRequest(format!("invalid kind: {other}")));
        }
    };

    AccountingRepository::new(state.pool())
        .create(&NewAccountingEntry {
            entry_date,
            label: label.to_string(),
            amount,
            kind,
        })
        .await?;

    let month = format!("{:04}-{:02}", entry_date.year(), entry_date.month());
    Ok(Redirect::to(&format!("/accounting?month={month}")))
}

/// Delete an accounting entry.
///
/// POST /accounting/{id}/delete
#[instrument(skip(_staff, state))]
async fn delete(
    OwnerPage(_staff): OwnerPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AccountingRepository::new(state.pool())
        .delete(AccountingEntryId::new(id))
        .await?;

    Ok(Redirect::to("/accounting"))
}
