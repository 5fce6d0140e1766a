//! Client management route handlers (owner only).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use fournil_core::ClientId;

use crate::db::{ClientRepository, OrderRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::OwnerPage;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One client in the listing.
struct ClientLineView {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
}

/// Client listing template.
#[derive(Template)]
#[template(path = "clients/index.html")]
struct ClientsIndexTemplate {
    staff: StaffView,
    current_path: String,
    clients: Vec<ClientLineView>,
}

/// One past order on the client detail page.
struct ClientOrderView {
    id: i32,
    number: String,
    delivery: String,
    status: String,
    total_cents: i64,
}

/// Client detail template.
#[derive(Template)]
#[template(path = "clients/show.html")]
struct ClientShowTemplate {
    staff: StaffView,
    current_path: String,
    client_id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    orders: Vec<ClientOrderView>,
}

/// Build the clients router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(index))
        .route("/clients/{id}", get(show).post(update))
        .route("/clients/{id}/delete", post(delete))
}

/// Client listing.
///
/// GET /clients
#[instrument(skip(staff, state))]
async fn index(
    OwnerPage(staff): OwnerPage,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let clients = ClientRepository::new(state.pool()).list_all().await?;

    let html = ClientsIndexTemplate {
        staff: StaffView::from(&staff),
        current_path: "/clients".to_string(),
        clients: clients
            .iter()
            .map(|c| ClientLineView {
                id: c.id.as_i32(),
                name: c.name.clone(),
                email: c.email.to_string(),
                phone: c.phone.clone(),
            })
            .collect(),
    }
    .render()?;

    Ok(Html(html))
}

/// Client detail with recent orders.
///
/// GET /clients/{id}
#[instrument(skip(staff, state))]
async fn show(
    OwnerPage(staff): OwnerPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let client_id = ClientId::new(id);
    let client = ClientRepository::new(state.pool())
        .get(client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("client {id}")))?;

    let orders = OrderRepository::new(state.pool())
        .list_for_client(client_id)
        .await?;

    let html = ClientShowTemplate {
        staff: StaffView::from(&staff),
        current_path: "/clients".to_string(),
        client_id: client.id.as_i32(),
        name: client.name.clone(),
        email: client.email.to_string(),
        phone: client.phone.clone(),
        orders: orders
            .iter()
            .map(|o| ClientOrderView {
                id: o.id.as_i32(),
                number: o.number.to_string(),
                delivery: o.delivery.to_string(),
                status: o.status.to_string(),
                total_cents: o.total.cents(),
            })
            .collect(),
    }
    .render()?;

    Ok(Html(html))
}

/// Contact details form data.
#[derive(Debug, Deserialize)]
struct ClientForm {
    name: String,
    phone: Option<String>,
}

/// Update a client's contact details.
///
/// POST /clients/{id}
#[instrument(skip(_staff, state))]
async fn update(
    OwnerPage(_staff): OwnerPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ClientForm>,
) -> Result<impl IntoResponse, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let phone = form.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());

    ClientRepository::new(state.pool())
        .update(ClientId::new(id), name, phone)
        .await?;

    Ok(Redirect::to(&format!("/clients/{id}")))
}

/// Remove a client record.
///
/// POST /clients/{id}/delete
#[instrument(skip(_staff, state))]
async fn delete(
    OwnerPage(_staff): OwnerPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match ClientRepository::new(state.pool())
        .delete(ClientId::new(id))
        .await
    {
        Ok(()) => Ok(Redirect::to("/clients")),
        Err(RepositoryError::Conflict(_)) => Err(AppError::BadRequest(
            "client still has orders; cancel or deliver them first".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
