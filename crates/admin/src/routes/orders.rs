//! Order management route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::instrument;

use fournil_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::StaffPage;
use crate::models::Order;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One order in the listing table.
pub struct OrderLineView {
    pub id: i32,
    pub number: String,
    pub delivery: String,
    pub client_name: String,
    pub status: String,
    pub total_cents: i64,
}

impl From<&Order> for OrderLineView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            number: order.number.to_string(),
            delivery: order.delivery.to_string(),
            client_name: order.client_name.clone(),
            status: order.status.to_string(),
            total_cents: order.total.cents(),
        }
    }
}

/// Order listing template.
#[derive(Template)]
#[template(path = "orders/index.html")]
struct OrdersIndexTemplate {
    staff: StaffView,
    current_path: String,
    month_label: String,
    status_filter: Option<String>,
    orders: Vec<OrderLineView>,
}

/// One item line on the order detail page.
struct ItemLineView {
    name: String,
    quantity: u32,
    line_total_cents: i64,
}

/// Order detail template.
#[derive(Template)]
#[template(path = "orders/show.html")]
struct OrderShowTemplate {
    staff: StaffView,
    current_path: String,
    order_id: i32,
    number: String,
    delivery: String,
    status: String,
    client_name: String,
    client_email: String,
    note: Option<String>,
    items: Vec<ItemLineView>,
    total_cents: i64,
    next_statuses: Vec<String>,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/{id}", get(show))
        .route("/orders/{id}/status", post(update_status))
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
struct OrdersQuery {
    /// Delivery month as `YYYY-MM`; defaults to the current month.
    month: Option<String>,
    status: Option<String>,
}

/// Parse a `YYYY-MM` month parameter.
fn parse_month(raw: Option<&str>) -> Option<(u16, u8)> {
    let raw = raw?;
    let (y, m) = raw.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    Some((y.parse().ok()?, m.parse().ok()?)).filter(|&(_, m)| (1..=12).contains(&m))
}

/// Order listing by delivery month.
///
/// GET /orders
#[instrument(skip(staff, state))]
async fn index(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Html<String>, AppError> {
    let today = Utc::now().date_naive();
    #[allow(clippy::cast_possible_truncation)]
    let (year, month) = parse_month(query.month.as_deref()).unwrap_or((
        u16::try_from(today.year()).unwrap_or(1970),
        today.month() as u8,
    ));

    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(AppError::BadRequest)?,
        ),
    };

    let orders = OrderRepository::new(state.pool())
        .list_for_month(year, month, status)
        .await?;

    let html = OrdersIndexTemplate {
        staff: StaffView::from(&staff),
        current_path: "/orders".to_string(),
        month_label: format!("{year:04}-{month:02}"),
        status_filter: status.map(|s| s.to_string()),
        orders: orders.iter().map(OrderLineView::from).collect(),
    }
    .render()?;

    Ok(Html(html))
}

/// Order detail.
///
/// GET /orders/{id}
#[instrument(skip(staff, state))]
async fn show(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let next_statuses = [
        OrderStatus::InPreparation,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ]
    .into_iter()
    .filter(|next| order.status.can_transition_to(*next))
    .map(|s| s.to_string())
    .collect();

    let html = OrderShowTemplate {
        staff: StaffView::from(&staff),
        current_path: "/orders".to_string(),
        order_id: order.id.as_i32(),
        number: order.number.to_string(),
        delivery: order.delivery.to_string(),
        status: order.status.to_string(),
        client_name: order.client_name.clone(),
        client_email: order.client_email.clone(),
        note: order.note.clone(),
        items: order
            .items
            .iter()
            .map(|item| ItemLineView {
                name: item.name.clone(),
                quantity: item.quantity,
                line_total_cents: item.line_total().cents(),
            })
            .collect(),
        total_cents: order.total.cents(),
        next_statuses,
    }
    .render()?;

    Ok(Html(html))
}

/// Status update form data.
#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

/// Move an order through its lifecycle.
///
/// POST /orders/{id}/status
#[instrument(skip(_staff, state))]
async fn update_status(
    StaffPage(_staff): StaffPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<impl IntoResponse, AppError> {
    let next = form
        .status
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !order.status.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "cannot move order from {} to {next}",
            order.status
        )));
    }

    repo.update_status(order.id, next).await?;
    tracing::info!(order = %order.number, from = %order.status, to = %next, "order status updated");

    Ok(Redirect::to(&format!("/orders/{id}")))
}
