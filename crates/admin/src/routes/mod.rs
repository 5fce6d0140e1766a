//! HTTP route handlers for the back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Email + password login
//! POST /logout                  - Logout
//!
//! # Dashboard (any staff)
//! GET  /                        - Overview
//!
//! # Orders (any staff)
//! GET  /orders                  - Order listing (by delivery month)
//! GET  /orders/{id}             - Order detail
//! POST /orders/{id}/status      - Move an order through its lifecycle
//!
//! # Production (any staff)
//! GET  /production              - Orders to bake for one delivery day
//!
//! # Clients (owner only)
//! GET  /clients                 - Client listing
//! GET  /clients/{id}            - Client detail with recent orders
//! POST /clients/{id}            - Update contact details
//! POST /clients/{id}/delete     - Remove a client record
//!
//! # Accounting (owner only)
//! GET  /accounting              - Entries + summary for a month
//! POST /accounting              - Create an entry
//! POST /accounting/{id}/delete  - Delete an entry
//!
//! # Meetings (any staff)
//! GET  /meetings                - Upcoming meetings
//! POST /meetings                - Schedule a meeting
//! POST /meetings/{id}/cancel    - Cancel a meeting
//!
//! # Staff (owner only)
//! GET  /staff                   - Staff listing
//! POST /staff/{id}/delete       - Remove a staff account
//!
//! # APIs (JSON; 401/403 on denial)
//! GET  /api/orders/search       - Order search (any staff)
//! GET  /api/clients/search      - Client search (owner only)
//! ```

pub mod accounting;
pub mod api;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod meetings;
pub mod orders;
pub mod production;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the full back-office router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(production::router())
        .merge(clients::router())
        .merge(accounting::router())
        .merge(meetings::router())
        .merge(staff::router())
        .merge(api::router())
}
