//! Production planning route handler.
//!
//! The cook's landing page: everything to bake for one delivery day,
//! cancelled orders excluded, in allocation order.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::instrument;

use fournil_core::DeliveryDate;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::StaffPage;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One order on the production sheet.
struct ProductionLineView {
    number: String,
    status: String,
    client_name: String,
    items: Vec<String>,
    note: Option<String>,
}

/// Production sheet template.
#[derive(Template)]
#[template(path = "production/index.html")]
struct ProductionTemplate {
    staff: StaffView,
    current_path: String,
    date_label: String,
    orders: Vec<ProductionLineView>,
}

/// Build the production router.
pub fn router() -> Router<AppState> {
    Router::new().route("/production", get(index))
}

/// Production query parameters.
#[derive(Debug, Deserialize)]
struct ProductionQuery {
    /// Delivery day as `YYYY-MM-DD`; defaults to today.
    date: Option<String>,
}

/// Production sheet for one delivery day.
///
/// GET /production
#[instrument(skip(staff, state))]
async fn index(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
    Query(query): Query<ProductionQuery>,
) -> Result<Html<String>, AppError> {
    let delivery = match query.date.as_deref() {
        Some(raw) => DeliveryDate::parse(raw)
            .map_err(|e| AppError::BadRequest(format!("invalid date: {e}")))?,
        None => {
            let today = Utc::now().date_naive();
            #[allow(clippy::cast_possible_truncation)]
            DeliveryDate::from_parts(
                u16::try_from(today.year()).unwrap_or(1970),
                today.month() as u8,
                today.day() as u8,
            )
            .map_err(|e| AppError::Internal(format!("invalid current date: {e}")))?
        }
    };

    let orders = OrderRepository::new(state.pool())
        .list_for_delivery_day(delivery)
        .await?;

    let html = ProductionTemplate {
        staff: StaffView::from(&staff),
        current_path: "/production".to_string(),
        date_label: delivery.to_string(),
        orders: orders
            .iter()
            .map(|order| ProductionLineView {
                number: order.number.to_string(),
                status: order.status.to_string(),
                client_name: order.client_name.clone(),
                items: order
                    .items
                    .iter()
                    .map(|item| format!("{} x {}", item.quantity, item.name))
                    .collect(),
                note: order.note.clone(),
            })
            .collect(),
    }
    .render()?;

    Ok(Html(html))
}
