//! Authentication route handlers for the back-office.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{clear_current_staff, set_current_staff};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /login
async fn login_page() -> Result<Html<String>, AppError> {
    let html = LoginTemplate { error: None }.render()?;
    Ok(Html(html))
}

/// Login form data.
#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

/// Verify credentials and open a session.
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<axum::response::Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(staff) => {
            // Rotate the session ID so a pre-login cookie cannot be reused
            session.cycle_id().await.map_err(|e| {
                AppError::Internal(format!("session cycle failed: {e}"))
            })?;
            set_current_staff(&session, &staff)
                .await
                .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

            tracing::info!(staff = %staff.email, role = %staff.role, "staff login");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            let html = LoginTemplate {
                error: Some("Invalid email or password".to_string()),
            }
            .render()?;
            Ok(Html(html).into_response())
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
    }
}

/// Logout and clear session.
///
/// POST /logout
async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_current_staff(&session).await;
    Redirect::to("/login")
}
