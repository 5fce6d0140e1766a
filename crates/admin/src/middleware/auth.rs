//! Authentication extractors for the back-office.
//!
//! These are the transport adapters for [`crate::guard`]: they pull the
//! staff identity out of the session cookie and hand it to the pure guard
//! functions. Route handlers pick the extractor matching their policy and
//! never re-implement the check.
//!
//! A session store failure resolves to "no identity" and therefore to a
//! denial - never to access.

use axum::{
    Json,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::guard::{self, ANY_STAFF, OWNER_ONLY, PageOutcome};
use crate::models::{CurrentStaff, session_keys};

/// Fallback page for staff denied an owner-only page.
const OWNER_PAGE_FALLBACK: &str = "/orders";

/// Read the current staff identity from the session, if any.
async fn current_staff(parts: &Parts) -> Option<CurrentStaff> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
}

/// A redirect produced by page gating.
pub struct PageRedirect(&'static str);

impl IntoResponse for PageRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Shared body of the page extractors.
async fn page_identity(
    parts: &Parts,
    allowed: &[fournil_core::StaffRole],
    fallback: &'static str,
) -> Result<CurrentStaff, PageRedirect> {
    let staff = current_staff(parts).await;
    match guard::authorize_page(staff.as_ref(), allowed, fallback) {
        // authorize_page only allows when an identity is present
        PageOutcome::Allow(_) => staff.ok_or(PageRedirect(guard::LOGIN_PATH)),
        PageOutcome::RedirectTo(path) => Err(PageRedirect(path)),
    }
}

/// Extractor for pages any authenticated staff member may see.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders_page(StaffPage(staff): StaffPage) -> impl IntoResponse {
///     format!("Hello, {}!", staff.name)
/// }
/// ```
pub struct StaffPage(pub CurrentStaff);

impl<S> FromRequestParts<S> for StaffPage
where
    S: Send + Sync,
{
    type Rejection = PageRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        page_identity(parts, ANY_STAFF, guard::LOGIN_PATH).await.map(Self)
    }
}

/// Extractor for owner-only pages.
///
/// Unauthenticated callers go to the login page; authenticated non-owners
/// go to the orders listing, which every role may see.
pub struct OwnerPage(pub CurrentStaff);

impl<S> FromRequestParts<S> for OwnerPage
where
    S: Send + Sync,
{
    type Rejection = PageRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        page_identity(parts, OWNER_ONLY, OWNER_PAGE_FALLBACK).await.map(Self)
    }
}

/// A denied API call, rendered as a status plus `{"error": ...}` JSON.
pub struct ApiRejection(guard::ApiDenial);

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        (self.0.status, Json(json!({ "error": self.0.message }))).into_response()
    }
}

/// Shared body of the API extractors.
async fn api_identity(
    parts: &Parts,
    allowed: &[fournil_core::StaffRole],
) -> Result<CurrentStaff, ApiRejection> {
    let staff = current_staff(parts).await;
    guard::authorize_api(staff.as_ref(), allowed).map_err(ApiRejection)?;
    // authorize_api only succeeds when an identity is present
    staff.ok_or(ApiRejection(guard::ApiDenial {
        status: axum::http::StatusCode::UNAUTHORIZED,
        message: "authentication required",
    }))
}

/// Extractor for API routes any authenticated staff member may call.
pub struct StaffApi(pub CurrentStaff);

impl<S> FromRequestParts<S> for StaffApi
where
    S: Send + Sync,
{
    type Rejection = ApiRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        api_identity(parts, ANY_STAFF).await.map(Self)
    }
}

/// Extractor for owner-only API routes.
pub struct OwnerApi(pub CurrentStaff);

impl<S> FromRequestParts<S> for OwnerApi
where
    S: Send + Sync,
{
    type Rejection = ApiRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        api_identity(parts, OWNER_ONLY).await.map(Self)
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
