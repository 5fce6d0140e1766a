//! Cart route handlers.
//!
//! The cart lives in the session as slug/quantity pairs; names and prices
//! are re-read from the CMS on every render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fournil_core::Price;

use crate::cms::CmsClient;
use crate::error::AppError;
use crate::filters;
use crate::models::{Cart, session_keys};
use crate::state::AppState;

/// One cart line for templates.
pub struct CartLineView {
    pub slug: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Cart display data for templates, with totals computed server-side.
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_cents: i64,
}

impl CartView {
    /// Whether the cart renders empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/index.html")]
struct CartTemplate {
    cart: CartView,
}

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(index))
        .route("/cart/add", post(add))
        .route("/cart/update", post(update))
        .route("/cart/remove", post(remove))
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart from the session.
pub async fn read_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
pub async fn write_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))
}

/// Price the cart against the CMS catalog.
///
/// Lines whose product has disappeared from the catalog are dropped
/// rather than priced at zero.
pub async fn price_cart(cms: &CmsClient, locale: &str, cart: &Cart) -> Result<CartView, AppError> {
    let mut lines = Vec::with_capacity(cart.items.len());

    for item in &cart.items {
        let Some(product) = cms.product(locale, &item.slug).await? else {
            tracing::warn!(slug = %item.slug, "cart line no longer in catalog, dropping");
            continue;
        };

        lines.push(CartLineView {
            slug: product.slug,
            name: product.name,
            quantity: item.quantity,
            unit_price_cents: product.price_cents,
            line_total_cents: Price::from_cents(product.price_cents)
                .times(item.quantity)
                .cents(),
        });
    }

    let total_cents = lines.iter().map(|line| line.line_total_cents).sum();

    Ok(CartView { lines, total_cents })
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart page.
///
/// GET /cart
#[instrument(skip(state, session))]
async fn index(State(state): State<AppState>, session: Session) -> Result<CartTemplate, AppError> {
    let cart = read_cart(&session).await;
    let view = price_cart(state.cms(), state.cms().default_locale(), &cart).await?;

    Ok(CartTemplate { cart: view })
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
struct AddForm {
    slug: String,
    quantity: Option<u32>,
}

/// Add a product to the cart.
///
/// POST /cart/add
#[instrument(skip(state, session))]
async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddForm>,
) -> Result<impl IntoResponse, AppError> {
    // Only catalog products can enter the cart
    let product = state
        .cms()
        .product(state.cms().default_locale(), &form.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.slug)))?;

    let mut cart = read_cart(&session).await;
    cart.add(&product.slug, form.quantity.unwrap_or(1));
    write_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
struct UpdateForm {
    slug: String,
    quantity: u32,
}

/// Change a line quantity; zero removes the line.
///
/// POST /cart/update
#[instrument(skip(session))]
async fn update(
    session: Session,
    Form(form): Form<UpdateForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = read_cart(&session).await;
    cart.set_quantity(&form.slug, form.quantity);
    write_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove form data.
#[derive(Debug, Deserialize)]
struct RemoveForm {
    slug: String,
}

/// Remove a line from the cart.
///
/// POST /cart/remove
#[instrument(skip(session))]
async fn remove(
    session: Session,
    Form(form): Form<RemoveForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = read_cart(&session).await;
    cart.remove(&form.slug);
    write_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}
