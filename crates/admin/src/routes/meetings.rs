//! Meeting scheduling route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use fournil_core::MeetingId;

use crate::db::MeetingRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::StaffPage;
use crate::models::NewMeeting;
use crate::state::AppState;

use super::dashboard::StaffView;

/// One meeting in the listing.
struct MeetingLineView {
    id: i32,
    title: String,
    starts_at: String,
    duration_minutes: i32,
    notes: Option<String>,
}

/// Meetings page template.
#[derive(Template)]
#[template(path = "meetings/index.html")]
struct MeetingsTemplate {
    staff: StaffView,
    current_path: String,
    meetings: Vec<MeetingLineView>,
}

/// Build the meetings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meetings", get(index).post(create))
        .route("/meetings/{id}/cancel", post(cancel))
}

/// Upcoming meetings.
///
/// GET /meetings
#[instrument(skip(staff, state))]
async fn index(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let meetings = MeetingRepository::new(state.pool())
        .upcoming(Utc::now())
        .await?;

    let html = MeetingsTemplate {
        staff: StaffView::from(&staff),
        current_path: "/meetings".to_string(),
        meetings: meetings
            .iter()
            .map(|m| MeetingLineView {
                id: m.id.as_i32(),
                title: m.title.clone(),
                starts_at: m.starts_at.format("%d/%m/%Y %H:%M").to_string(),
                duration_minutes: m.duration_minutes,
                notes: m.notes.clone(),
            })
            .collect(),
    }
    .render()?;

    Ok(Html(html))
}

/// New meeting form data.
#[derive(Debug, Deserialize)]
struct MeetingForm {
    title: String,
    /// From an `<input type="datetime-local">`: `YYYY-MM-DDTHH:MM`.
    starts_at: String,
    duration_minutes: i32,
    notes: Option<String>,
}

/// Schedule a meeting.
///
/// POST /meetings
#[instrument(skip(staff, state))]
async fn create(
    StaffPage(staff): StaffPage,
    State(state): State<AppState>,
    Form(form): Form<MeetingForm>,
) -> Result<impl IntoResponse, AppError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title cannot be empty".to_string()));
    }
    if form.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "duration must be positive".to_string(),
        ));
    }

    let starts_at = NaiveDateTime::parse_from_str(&form.starts_at, "%Y-%m-%dT%H:%M")
        .map_err(|e| AppError::BadRequest(format!("invalid start time: {e}")))?
        .and_utc();

    let notes = form.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());

    MeetingRepository::new(state.pool())
        .create(&NewMeeting {
            title: title.to_string(),
            starts_at,
            duration_minutes: form.duration_minutes,
            notes: notes.map(ToString::to_string),
            created_by: staff.id,
        })
        .await?;

    Ok(Redirect::to("/meetings"))
}

/// Cancel a meeting.
///
/// POST /meetings/{id}/cancel
#[instrument(skip(_staff, state))]
async fn cancel(
    StaffPage(_staff): StaffPage,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    MeetingRepository::new(state.pool())
        .delete(MeetingId::new(id))
        .await?;

    Ok(Redirect::to("/meetings"))
}
