//! Checkout route handlers.
//!
//! Flow: the checkout page collects the delivery date and contact details;
//! the browser asks `/api/checkout/intent` for a payment intent and runs
//! the provider's card flow; `/checkout/complete` then re-verifies the
//! intent server-side, persists the client and the order (allocating its
//! number), and sends the confirmation email.
//!
//! The delivery date travels as a `YYYY-MM-DD` string end to end and is
//! validated by [`DeliveryDate::parse`]; it never goes through a date-time
//! type.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use fournil_core::{DeliveryDate, Email, OrderNumber, Price};

use crate::db::{ClientRepository, OrderRepository};
use crate::error::AppError;
use crate::filters;
use crate::models::{NewOrder, OrderItem, session_keys};
use crate::state::AppState;

use super::cart::{CartView, price_cart, read_cart};

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/index.html")]
struct CheckoutTemplate {
    cart: CartView,
    publishable_key: String,
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
struct ConfirmationTemplate {
    number: String,
    delivery_date: String,
    total_cents: i64,
}

/// Build the checkout router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", get(index))
        .route("/api/checkout/intent", post(create_intent))
        .route("/checkout/complete", post(complete))
        .route("/checkout/confirmation/{number}", get(confirmation))
}

/// Checkout page.
///
/// GET /checkout
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<axum::response::Response, AppError> {
    let cart = read_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let view = price_cart(state.cms(), state.cms().default_locale(), &cart).await?;

    Ok(CheckoutTemplate {
        cart: view,
        publishable_key: state.config().payment.publishable_key.clone(),
    }
    .into_response())
}

/// Response for intent creation.
#[derive(Debug, Serialize)]
struct IntentResponse {
    client_secret: String,
}

/// Create the payment intent for the current cart.
///
/// POST /api/checkout/intent
#[instrument(skip(state, session))]
async fn create_intent(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<IntentResponse>, AppError> {
    let cart = read_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    // Price server-side; the browser never supplies an amount
    let view = price_cart(state.cms(), state.cms().default_locale(), &cart).await?;
    if view.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let intent = state
        .payment()
        .create_intent(Price::from_cents(view.total_cents))
        .await?;

    session
        .insert(session_keys::PAYMENT_INTENT, &intent.id)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    let client_secret = intent.client_secret.ok_or_else(|| {
        AppError::Internal("payment provider returned no client secret".to_string())
    })?;

    Ok(Json(IntentResponse { client_secret }))
}

/// Completion form data.
#[derive(Debug, Deserialize)]
struct CompleteForm {
    name: String,
    email: String,
    phone: Option<String>,
    /// Delivery date as `YYYY-MM-DD`.
    delivery_date: String,
    note: Option<String>,
}

/// Verify payment and persist the order.
///
/// POST /checkout/complete
#[instrument(skip(state, session, form))]
async fn complete(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CompleteForm>,
) -> Result<impl IntoResponse, AppError> {
    let delivery = DeliveryDate::parse(&form.delivery_date)
        .map_err(|e| AppError::BadRequest(format!("invalid delivery date: {e}")))?;

    let email = Email::parse(form.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let intent_id: String = session
        .get(session_keys::PAYMENT_INTENT)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::BadRequest("no payment in progress".to_string()))?;

    let orders = OrderRepository::new(state.pool());

    // A double-submitted form lands on the already-created order
    if let Some(existing) = orders.find_by_payment_intent(&intent_id).await? {
        return Ok(Redirect::to(&format!(
            "/checkout/confirmation/{}",
            existing.number
        )));
    }

    let cart = read_cart(&session).await;
    let view = price_cart(state.cms(), state.cms().default_locale(), &cart).await?;
    if view.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    let total = Price::from_cents(view.total_cents);

    // Never trust the browser's word that the payment went through
    let intent = state.payment().retrieve_intent(&intent_id).await?;
    if !intent.is_paid(total) {
        tracing::warn!(intent = %intent_id, status = ?intent.status, "completion with unpaid intent");
        return Err(AppError::BadRequest("payment not completed".to_string()));
    }

    let phone = form.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let client = ClientRepository::new(state.pool())
        .find_or_create(&email, name, phone)
        .await?;

    let items: Vec<OrderItem> = view
        .lines
        .iter()
        .map(|line| OrderItem {
            product_slug: line.slug.clone(),
            name: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
        })
        .collect();

    let note = form.note.as_deref().map(str::trim).filter(|n| !n.is_empty());

    let order = orders
        .create(&NewOrder {
            delivery,
            client_id: client.id,
            items,
            total,
            payment_intent_id: intent_id,
            note: note.map(ToString::to_string),
        })
        .await?;

    tracing::info!(number = %order.number, total = %order.total, "order placed");

    // The order is placed; a failed confirmation email is logged, not fatal
    if let Err(e) = state
        .email()
        .send_order_confirmation(email.as_str(), name, &order)
        .await
    {
        tracing::error!(number = %order.number, "confirmation email failed: {e}");
        sentry::capture_error(&e);
    }

    let _ = session.remove::<crate::models::Cart>(session_keys::CART).await;
    let _ = session.remove::<String>(session_keys::PAYMENT_INTENT).await;

    Ok(Redirect::to(&format!(
        "/checkout/confirmation/{}",
        order.number
    )))
}

/// Confirmation page.
///
/// GET /checkout/confirmation/{number}
#[instrument(skip(state))]
async fn confirmation(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<ConfirmationTemplate, AppError> {
    let number = OrderNumber::parse(&number)
        .map_err(|e| AppError::BadRequest(format!("invalid order number: {e}")))?;

    let order = OrderRepository::new(state.pool())
        .get_by_number(&number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {number}")))?;

    Ok(ConfirmationTemplate {
        number: order.number.to_string(),
        delivery_date: order.delivery.to_string(),
        total_cents: order.total.cents(),
    })
}
