//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

use super::LocaleQuery;
use super::catalog::{CategoryView, ProductCardView};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    categories: Vec<CategoryView>,
    featured: Vec<ProductCardView>,
}

/// Build the home router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Home page: categories and featured products.
///
/// GET /
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<HomeTemplate, AppError> {
    let locale = query.locale_or(state.cms().default_locale());

    let categories = state.cms().categories(locale).await?;
    let featured = state.cms().featured_products(locale).await?;

    Ok(HomeTemplate {
        categories: categories.iter().map(CategoryView::from).collect(),
        featured: featured.iter().map(ProductCardView::from).collect(),
    })
}
