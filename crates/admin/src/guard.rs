//! Role-based access guard for admin pages and APIs.
//!
//! Every protected surface runs the same two-step check: is there a valid
//! session, and is the session's role in the route's allowed set. The two
//! flavors only differ in how a denial is rendered - pages redirect a
//! browsing human, APIs answer with `401`/`403` JSON. Keeping one
//! [`authorize`] underneath both prevents the page and API surfaces from
//! drifting apart as routes get added.
//!
//! The guard takes the caller identity as an explicit argument. It never
//! reads ambient request state; the HTTP extractors in
//! [`crate::middleware::auth`] pull the identity out of the session cookie
//! and pass it in. That keeps this module pure and testable.
//!
//! Checks are re-run on every request. There is no caching of outcomes and
//! no retry: a session that cannot be read counts as no session at all.

use axum::http::StatusCode;

use fournil_core::StaffRole;

use crate::models::CurrentStaff;

/// Path of the login page, where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "/login";

/// Every staff role; policy for pages any authenticated staff may see.
pub const ANY_STAFF: &[StaffRole] = &[StaffRole::Owner, StaffRole::Cook];

/// Policy for owner-only pages (clients, accounting, staff management).
pub const OWNER_ONLY: &[StaffRole] = &[StaffRole::Owner];

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No session, or the session could not be resolved to a staff member.
    Unauthenticated,
    /// Valid session, but the role is not in the route's allowed set.
    Unauthorized(StaffRole),
}

/// The shared validate-then-authorize check.
///
/// Step 1: a missing identity is `Unauthenticated`, regardless of which
/// roles the route allows. Step 2: a resolved role outside `allowed` is
/// `Unauthorized`. On success the resolved role is returned so handlers
/// can apply role-specific filtering.
///
/// # Errors
///
/// Returns [`Denial`] describing which step failed.
pub fn authorize(
    identity: Option<&CurrentStaff>,
    allowed: &[StaffRole],
) -> Result<StaffRole, Denial> {
    let staff = identity.ok_or(Denial::Unauthenticated)?;
    if allowed.contains(&staff.role) {
        Ok(staff.role)
    } else {
        Err(Denial::Unauthorized(staff.role))
    }
}

/// Outcome of gating a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Render the page; the resolved role flows into role-aware templates.
    Allow(StaffRole),
    /// Send the browser elsewhere.
    RedirectTo(&'static str),
}

/// Page-gating flavor of the guard.
///
/// Unauthenticated callers go to the login page. Authenticated callers
/// with a disallowed role go to `fallback` - a page that role is allowed
/// to see, chosen per route (usually the orders or production listing),
/// not a single global target.
#[must_use]
pub fn authorize_page(
    identity: Option<&CurrentStaff>,
    allowed: &[StaffRole],
    fallback: &'static str,
) -> PageOutcome {
    match authorize(identity, allowed) {
        Ok(role) => PageOutcome::Allow(role),
        Err(Denial::Unauthenticated) => PageOutcome::RedirectTo(LOGIN_PATH),
        Err(Denial::Unauthorized(_)) => PageOutcome::RedirectTo(fallback),
    }
}

/// A denied API call, ready to render as a status plus `{"error": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiDenial {
    /// `401` for missing sessions, `403` for disallowed roles.
    pub status: StatusCode,
    /// Goes into the `error` field of the JSON body.
    pub message: &'static str,
}

/// API-gating flavor of the guard.
///
/// # Errors
///
/// Returns an [`ApiDenial`] with `401 Unauthorized` when there is no valid
/// session and `403 Forbidden` when the role is not allowed.
pub fn authorize_api(
    identity: Option<&CurrentStaff>,
    allowed: &[StaffRole],
) -> Result<StaffRole, ApiDenial> {
    authorize(identity, allowed).map_err(|denial| match denial {
        Denial::Unauthenticated => ApiDenial {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required",
        },
        Denial::Unauthorized(_) => ApiDenial {
            status: StatusCode::FORBIDDEN,
            message: "insufficient role",
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use fournil_core::{Email, StaffUserId};

    fn staff(role: StaffRole) -> CurrentStaff {
        CurrentStaff {
            id: StaffUserId::new(1),
            email: Email::parse("staff@fournil.example").unwrap(),
            name: "Staff".to_string(),
            role,
        }
    }

    #[test]
    fn test_no_session_is_unauthenticated_regardless_of_policy() {
        assert_eq!(
            authorize(None, ANY_STAFF),
            Err(Denial::Unauthenticated)
        );
        assert_eq!(
            authorize(None, OWNER_ONLY),
            Err(Denial::Unauthenticated)
        );
    }

    #[test]
    fn test_allowed_role_resolves() {
        let cook = staff(StaffRole::Cook);
        assert_eq!(authorize(Some(&cook), ANY_STAFF), Ok(StaffRole::Cook));

        let owner = staff(StaffRole::Owner);
        assert_eq!(authorize(Some(&owner), OWNER_ONLY), Ok(StaffRole::Owner));
    }

    #[test]
    fn test_disallowed_role_is_unauthorized() {
        let cook = staff(StaffRole::Cook);
        assert_eq!(
            authorize(Some(&cook), OWNER_ONLY),
            Err(Denial::Unauthorized(StaffRole::Cook))
        );
    }

    #[test]
    fn test_allow_set_monotonicity() {
        // A role denied by the wider set is denied by every subset of it.
        let cook = staff(StaffRole::Cook);
        let wide: &[StaffRole] = &[StaffRole::Owner];
        let narrow: &[StaffRole] = &[];
        assert!(authorize(Some(&cook), wide).is_err());
        assert!(authorize(Some(&cook), narrow).is_err());
    }

    #[test]
    fn test_page_outcomes() {
        let cook = staff(StaffRole::Cook);

        assert_eq!(
            authorize_page(None, ANY_STAFF, "/orders"),
            PageOutcome::RedirectTo(LOGIN_PATH)
        );
        assert_eq!(
            authorize_page(Some(&cook), OWNER_ONLY, "/orders"),
            PageOutcome::RedirectTo("/orders")
        );
        assert_eq!(
            authorize_page(Some(&cook), ANY_STAFF, "/orders"),
            PageOutcome::Allow(StaffRole::Cook)
        );
    }

    #[test]
    fn test_api_status_codes() {
        let cook = staff(StaffRole::Cook);

        let denial = authorize_api(None, ANY_STAFF).unwrap_err();
        assert_eq!(denial.status, StatusCode::UNAUTHORIZED);

        let denial = authorize_api(Some(&cook), OWNER_ONLY).unwrap_err();
        assert_eq!(denial.status, StatusCode::FORBIDDEN);

        assert_eq!(
            authorize_api(Some(&cook), ANY_STAFF),
            Ok(StaffRole::Cook)
        );
    }

    #[test]
    fn test_unauthenticated_wins_over_role() {
        // 401 depends only on the session check, never on the allow set.
        let denial = authorize_api(None, OWNER_ONLY).unwrap_err();
        assert_eq!(denial.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_idempotent_for_unchanged_state() {
        let owner = staff(StaffRole::Owner);
        let first = authorize(Some(&owner), OWNER_ONLY);
        let second = authorize(Some(&owner), OWNER_ONLY);
        assert_eq!(first, second);

        let page_first = authorize_page(Some(&owner), OWNER_ONLY, "/orders");
        let page_second = authorize_page(Some(&owner), OWNER_ONLY, "/orders");
        assert_eq!(page_first, page_second);
    }
}
