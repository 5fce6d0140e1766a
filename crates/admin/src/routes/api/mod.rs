//! JSON API route handlers.
//!
//! All routes here gate through the API flavor of the access guard:
//! missing/invalid session is `401`, valid session with a disallowed role
//! is `403`, both with an `{"error": ...}` body.

pub mod clients;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(orders::router()).merge(clients::router())
}
