//! Staff management route handlers (owner only).
//!
//! Accounts are created through the CLI, which issues the initial
//! password; the page only lists and removes them.

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use tracing::instrument;

use fournil_core::StaffUserId;

use crate::db::StaffUserRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::OwnerPage;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One staff member in the listing.
struct StaffLineView {
    id: i32,
    name: String,
    email: String,
    role: String,
}

/// Staff listing template.
#[derive(Template)]
#[template(path = "staff/index.html")]
struct StaffIndexTemplate {
    staff: StaffView,
    current_path: String,
    members: Vec<StaffLineView>,
}

/// Build the staff router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/staff", get(index))
        .route("/staff/{id}/delete", post(delete))
}

/// Staff listing.
///
/// GET /staff
#[instrument(skip(staff, state))]
async fn index(
    OwnerPage(staff): OwnerPage,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let members = StaffUserRepository::new(state.pool()).list_all().await?;

    let html = StaffIndexTemplate {
        staff: StaffView::from(&staff),
        current_path: "/staff".to_string(),
        members: members
            .iter()
            .map(|m| StaffLineView {
                id: m.id.as_i32(),
                name: m.name.clone(),
                email: m.email.to_string(),
                role: m.role.to_string(),
            })
            .collect(),
    }
    .render()?;

    Ok(Html(html))
}

/// Remove a staff account.
///
/// POST /staff/{id}/delete
#[instrument(skip(staff, state))]
async fn delete(
    OwnerPage(staff): OwnerPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let target = StaffUserId::new(id);
    if target == staff.id {
        return Err(AppError::BadRequest(
            "you cannot remove your own account".to_string(),
        ));
    }

    StaffUserRepository::new(state.pool()).delete(target).await?;
    tracing::info!(removed = id, by = %staff.email, "staff account removed");

    Ok(Redirect::to("/staff"))
}
