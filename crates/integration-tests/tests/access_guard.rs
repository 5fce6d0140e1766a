//! Cross-crate tests of the admin access guard.
//!
//! The guard is pure, so these run without a database or server. They pin
//! down the contract both the page and API surfaces rely on: validate the
//! session first, then the role, identically everywhere.

use fournil_admin::guard::{
    ANY_STAFF, Denial, LOGIN_PATH, OWNER_ONLY, PageOutcome, authorize, authorize_api,
    authorize_page,
};
use fournil_admin::models::CurrentStaff;
use fournil_core::{Email, StaffRole, StaffUserId};

fn staff(role: StaffRole) -> CurrentStaff {
    CurrentStaff {
        id: StaffUserId::new(7),
        email: Email::parse("staff@fournil.example").expect("valid email"),
        name: "Staff".to_string(),
        role,
    }
}

#[test]
fn missing_session_returns_401_for_every_policy() {
    for allowed in [ANY_STAFF, OWNER_ONLY] {
        let denial = authorize_api(None, allowed).expect_err("must deny");
        assert_eq!(denial.status.as_u16(), 401);
    }
}

#[test]
fn disallowed_role_returns_403_never_401() {
    let cook = staff(StaffRole::Cook);
    let denial = authorize_api(Some(&cook), OWNER_ONLY).expect_err("must deny");
    assert_eq!(denial.status.as_u16(), 403);
}

#[test]
fn allowed_role_is_returned_to_the_caller() {
    let owner = staff(StaffRole::Owner);
    assert_eq!(
        authorize_api(Some(&owner), OWNER_ONLY),
        Ok(StaffRole::Owner)
    );
    assert_eq!(authorize_api(Some(&owner), ANY_STAFF), Ok(StaffRole::Owner));
}

#[test]
fn page_and_api_flavors_agree_on_the_underlying_decision() {
    // Same identity, same policy: if the API flavor denies, the page
    // flavor must redirect, and vice versa.
    let cook = staff(StaffRole::Cook);
    let cases: [(Option<&CurrentStaff>, &[StaffRole]); 3] = [
        (None, ANY_STAFF),
        (Some(&cook), OWNER_ONLY),
        (Some(&cook), ANY_STAFF),
    ];

    for (identity, allowed) in cases {
        let api = authorize_api(identity, allowed);
        let page = authorize_page(identity, allowed, "/orders");
        match (api, page) {
            (Ok(api_role), PageOutcome::Allow(page_role)) => assert_eq!(api_role, page_role),
            (Err(_), PageOutcome::RedirectTo(_)) => {}
            (api, page) => panic!("surfaces disagree: {api:?} vs {page:?}"),
        }
    }
}

#[test]
fn unauthenticated_pages_redirect_to_login_not_fallback() {
    assert_eq!(
        authorize_page(None, OWNER_ONLY, "/orders"),
        PageOutcome::RedirectTo(LOGIN_PATH)
    );
}

#[test]
fn unauthorized_pages_redirect_to_the_per_page_fallback() {
    let cook = staff(StaffRole::Cook);
    assert_eq!(
        authorize_page(Some(&cook), OWNER_ONLY, "/production"),
        PageOutcome::RedirectTo("/production")
    );
}

#[test]
fn monotonicity_of_the_allow_set() {
    // Denied by a superset implies denied by every subset.
    let cook = staff(StaffRole::Cook);
    assert_eq!(
        authorize(Some(&cook), OWNER_ONLY),
        Err(Denial::Unauthorized(StaffRole::Cook))
    );
    assert_eq!(
        authorize(Some(&cook), &[]),
        Err(Denial::Unauthorized(StaffRole::Cook))
    );
}

#[test]
fn repeated_checks_are_idempotent() {
    let owner = staff(StaffRole::Owner);
    let outcomes: Vec<_> = (0..5)
        .map(|_| authorize_api(Some(&owner), OWNER_ONLY))
        .collect();
    assert!(outcomes.windows(2).all(|w| w.first() == w.last()));
}
