//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use chrono::{Datelike, Utc};
use tracing::instrument;

use fournil_core::{DeliveryDate, StaffRole};

use crate::db::{ClientRepository, MeetingRepository, OrderRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::StaffPage;
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Staff view for templates.
///
/// `is_owner` drives the navigation: clients, accounting and staff links
/// are hidden from non-owner roles.
#[derive(Debug, Clone)]
pub struct StaffView {
    pub name: String,
    pub is_owner: bool,
}

impl From<&CurrentStaff> for StaffView {
    fn from(staff: &CurrentStaff) -> Self {
        Self {
            name: staff.name.clone(),
            is_owner: staff.role == StaffRole::Owner,
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    staff: StaffView,
    current_path: String,
    orders_today: usize,
    orders_this_month: i64,
    client_count: i64,
    upcoming_meetings: Vec<MeetingLine>,
}

/// One upcoming meeting on the dashboard.
struct MeetingLine {
    title: String,
    starts_at: String,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Dashboard overview.
///
/// GET /
#[instrument(skip_all)]
async fn index(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let orders = OrderRepository::new(state.pool());
    let clients = ClientRepository::new(state.pool());
    let meetings = MeetingRepository::new(state.pool());

    let now = Utc::now();
    let today = now.date_naive();
    #[allow(clippy::cast_possible_truncation)]
    let delivery_today = DeliveryDate::from_parts(
        u16::try_from(today.year()).unwrap_or(1970),
        today.month() as u8,
        today.day() as u8,
    )
    .map_err(|e| AppError::Internal(format!("invalid current date: {e}")))?;

    let orders_today = orders.list_for_delivery_day(delivery_today).await?.len();
    #[allow(clippy::cast_possible_truncation)]
    let orders_this_month = orders
        .count_for_month(u16::try_from(today.year()).unwrap_or(1970), today.month() as u8)
        .await?;
    let client_count = clients.count().await?;

    let upcoming_meetings = meetings
        .upcoming(now)
        .await?
        .into_iter()
        .take(3)
        .map(|m| MeetingLine {
            title: m.title,
            starts_at: m.starts_at.format("%d/%m/%Y %H:%M").to_string(),
        })
        .collect();

    let html = DashboardTemplate {
        staff: StaffView::from(&staff),
        current_path: "/".to_string(),
        orders_today,
        orders_this_month,
        client_count,
        upcoming_meetings,
    }
    .render()?;

    Ok(Html(html))
}
