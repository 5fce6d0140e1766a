//! Order search API.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::StaffApi;
use crate::state::AppState;

/// Build the orders API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/orders/search", get(search))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// One order in a search response.
#[derive(Debug, Serialize)]
pub struct OrderSearchResult {
    pub id: i32,
    pub number: String,
    pub delivery_date: String,
    pub status: String,
    pub client_name: String,
    pub total_cents: i64,
}

/// Search orders by number or client.
///
/// GET /api/orders/search?q=...
#[instrument(skip(_staff, state))]
async fn search(
    StaffApi(_staff): StaffApi,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<OrderSearchResult>>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let orders = OrderRepository::new(state.pool()).search(q).await?;

    Ok(Json(
        orders
            .into_iter()
            .map(|o| OrderSearchResult {
                id: o.id.as_i32(),
                number: o.number.to_string(),
                delivery_date: o.delivery.to_string(),
                status: o.status.to_string(),
                client_name: o.client_name,
                total_cents: o.total.cents(),
            })
            .collect(),
    ))
}
