//! Live-server HTTP tests for the back-office.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The back-office running (cargo run -p fournil-admin)
//!
//! Run with: cargo test -p fournil-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::Value;

/// Base URL for the back-office (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A client that does not follow redirects, so page-gating redirects are
/// observable.
fn bare_client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running back-office and database"]
async fn anonymous_page_request_redirects_to_login() {
    let client = bare_client();
    let resp = client
        .get(format!("{}/orders", admin_base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");
}

#[tokio::test]
#[ignore = "Requires running back-office and database"]
async fn anonymous_api_request_gets_401_json() {
    let client = bare_client();
    let resp = client
        .get(format!("{}/api/orders/search?q=01", admin_base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("JSON body");
    assert!(body.get("error").is_some());
}

#[tokio::test]
#[ignore = "Requires running back-office and database"]
async fn health_endpoints_respond() {
    let client = bare_client();
    let resp = client
        .get(format!("{}/health", admin_base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}
