//! Client search API (owner only).

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::ClientRepository;
use crate::error::AppError;
use crate::middleware::OwnerApi;
use crate::state::AppState;

/// Build the clients API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/clients/search", get(search))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// One client in a search response.
#[derive(Debug, Serialize)]
pub struct ClientSearchResult {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Search clients by name or email.
///
/// GET /api/clients/search?q=...
#[instrument(skip(_staff, state))]
async fn search(
    OwnerApi(_staff): OwnerApi,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ClientSearchResult>>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let clients = ClientRepository::new(state.pool()).search(q).await?;

    Ok(Json(
        clients
            .into_iter()
            .map(|c| ClientSearchResult {
                id: c.id.as_i32(),
                name: c.name,
                email: c.email.to_string(),
                phone: c.phone,
            })
            .collect(),
    ))
}
