//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use tracing::instrument;

use crate::cms::{Category, Product};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

use super::LocaleQuery;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub slug: String,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.name.clone(),
        }
    }
}

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            price_cents: product.price_cents,
            image_url: product.image_url.clone(),
        }
    }
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/category.html")]
struct CategoryTemplate {
    category: CategoryView,
    products: Vec<ProductCardView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/product.html")]
struct ProductTemplate {
    name: String,
    slug: String,
    description: String,
    price_cents: i64,
    image_url: Option<String>,
}

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog/{category}", get(category_page))
        .route("/products/{slug}", get(product_page))
}

/// Products of one category.
///
/// GET /catalog/{category}
#[instrument(skip(state))]
async fn category_page(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<CategoryTemplate, AppError> {
    let locale = query.locale_or(state.cms().default_locale());

    let categories = state.cms().categories(locale).await?;
    let category = categories
        .iter()
        .find(|c| c.slug == category_slug)
        .ok_or_else(|| AppError::NotFound(format!("category {category_slug}")))?;

    let products = state
        .cms()
        .products_in_category(locale, &category_slug)
        .await?;

    Ok(CategoryTemplate {
        category: CategoryView::from(category),
        products: products.iter().map(ProductCardView::from).collect(),
    })
}

/// Product detail.
///
/// GET /products/{slug}
#[instrument(skip(state))]
async fn product_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<ProductTemplate, AppError> {
    let locale = query.locale_or(state.cms().default_locale());

    let product = state
        .cms()
        .product(locale, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    Ok(ProductTemplate {
        name: product.name,
        slug: product.slug,
        description: product.description,
        price_cents: product.price_cents,
        image_url: product.image_url,
    })
}
