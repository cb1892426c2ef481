//! Product catalog route handlers.
//!
//! The page URL carries the whole filter state. Full page loads render the
//! catalog panel inside the layout; HTMX requests get only the panel plus an
//! `HX-Push-Url` header with the canonical URL for the new state. The panel
//! holds the sidebar too, so every link in it reflects the state shown.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use sweet_delights_core::Product;
use sweet_delights_core::catalog::{
    CATEGORIES, Category, FilterState, PRICE_CEILING, PRICE_FLOOR, PRICE_STEP, RATING_OPTIONS,
    SearchParams, SortKey, keys,
};

use crate::filters;
use crate::routes::is_htmx;
use crate::state::AppState;
use crate::views::{CatalogView, ViewScope};

/// Query key for the grid/list toggle. Not a filter.
pub const VIEW_KEY: &str = "view";

// =============================================================================
// Product Card
// =============================================================================

/// Product display data for the product card partial.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: String,
    /// Plain decimal price for the add-to-cart form.
    pub price_value: String,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub is_bestseller: bool,
    pub in_stock: bool,
    pub rating: String,
    /// CSS class for each of the five stars.
    pub stars: Vec<&'static str>,
}

const STAR_FILLED: &str = "star star-filled";
const STAR_EMPTY: &str = "star star-empty";

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let filled = usize::from(product.filled_stars());
        let stars = (0..usize::from(sweet_delights_core::MAX_RATING))
            .map(|i| if i < filled { STAR_FILLED } else { STAR_EMPTY })
            .collect();

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price().display(),
            price_value: product.price.normalize().to_string(),
            // Only show the struck-through price when there is a saving
            original_price: product
                .discount()
                .and(product.original_price())
                .map(|p| p.display()),
            discount: product.discount().map(|p| p.display()),
            is_bestseller: product.is_bestseller(),
            in_stock: product.in_stock,
            rating: format!("{:.1}", product.rating),
            stars,
        }
    }
}

// =============================================================================
// Sidebar Options
// =============================================================================

/// A link in one of the sidebar option lists.
#[derive(Clone)]
pub struct FilterLink {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

/// The results area of the catalog panel.
pub struct CatalogResults {
    pub products: Vec<ProductCardView>,
    pub count_label: String,
    pub is_list: bool,
    pub grid_href: String,
    pub list_href: String,
    pub clear_href: String,
}

/// Hidden inputs that carry the rest of the state through the price form.
#[derive(Clone)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

fn category_links(filter: &FilterState, params: &SearchParams) -> Vec<FilterLink> {
    CATEGORIES
        .iter()
        .map(|(value, label)| {
            let category = Category::parse(value);
            let mut next = filter.clone();
            let mut next_params = params.clone();
            let selected = filter.category == category;
            next.select_category(category, &mut next_params);
            FilterLink {
                label: (*label).to_string(),
                href: next_params.href("/products"),
                selected,
            }
        })
        .collect()
}

fn rating_links(filter: &FilterState, params: &SearchParams) -> Vec<FilterLink> {
    RATING_OPTIONS
        .iter()
        .map(|&rating| {
            let mut next = filter.clone();
            let mut next_params = params.clone();
            next.set_min_rating(rating, &mut next_params);
            FilterLink {
                label: rating_label(rating),
                href: next_params.href("/products"),
                selected: filter.min_rating == rating,
            }
        })
        .collect()
}

fn rating_label(rating: u8) -> String {
    if rating == 0 {
        "All Ratings".to_string()
    } else {
        format!("{rating}+ Stars")
    }
}

fn sort_links(filter: &FilterState, params: &SearchParams) -> Vec<FilterLink> {
    SortKey::ALL
        .iter()
        .map(|&sort| {
            let mut next = filter.clone();
            let mut next_params = params.clone();
            next.set_sort(sort, &mut next_params);
            FilterLink {
                label: sort.label().to_string(),
                href: next_params.href("/products"),
                selected: filter.sort == sort,
            }
        })
        .collect()
}

/// Everything except the price bounds, so the price form keeps it.
fn hidden_fields(params: &SearchParams) -> Vec<HiddenField> {
    params
        .iter()
        .filter(|(key, _)| *key != keys::MIN_PRICE && *key != keys::MAX_PRICE)
        .map(|(name, value)| HiddenField {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

fn results(view: &CatalogView, params: &SearchParams) -> CatalogResults {
    let mut grid = params.clone();
    grid.delete(VIEW_KEY);
    let mut list = params.clone();
    list.set(VIEW_KEY, "list");

    CatalogResults {
        products: view.products.iter().map(ProductCardView::from).collect(),
        count_label: view.result_count_label(),
        is_list: params.get(VIEW_KEY) == Some("list"),
        grid_href: grid.href("/products"),
        list_href: list.href("/products"),
        clear_href: params.href("/products/clear"),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Sidebar and results, rendered on its own for HTMX requests.
pub struct CatalogPanel {
    pub categories: Vec<FilterLink>,
    pub ratings: Vec<FilterLink>,
    pub sorts: Vec<FilterLink>,
    pub hidden_fields: Vec<HiddenField>,
    pub price_min: u32,
    pub price_max: u32,
    pub price_floor: u32,
    pub price_ceiling: u32,
    pub price_step: u32,
    pub results: CatalogResults,
}

impl CatalogPanel {
    fn new(view: &CatalogView, params: &SearchParams) -> Self {
        Self {
            categories: category_links(&view.filter, params),
            ratings: rating_links(&view.filter, params),
            sorts: sort_links(&view.filter, params),
            hidden_fields: hidden_fields(params),
            price_min: view.filter.price_range.min,
            price_max: view.filter.price_range.max,
            price_floor: PRICE_FLOOR,
            price_ceiling: PRICE_CEILING,
            price_step: PRICE_STEP,
            results: results(view, params),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub catalog: CatalogPanel,
}

/// Catalog panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog.html")]
pub struct CatalogPanelTemplate {
    pub catalog: CatalogPanel,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product catalog.
#[instrument(skip(state, headers))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let mut params = SearchParams::parse(query.as_deref().unwrap_or_default());

    if let Some(sort) = params.get(keys::SORT)
        && let Err(e) = sort.parse::<SortKey>()
    {
        tracing::warn!("Ignoring sort parameter: {e}");
    }

    let filter = FilterState::from_params(&params);
    // Rewrite the URL so it holds exactly the state being shown
    filter.sync_to_params(&mut params);

    let (scope, _guard) = ViewScope::new();
    let mut view = CatalogView::new(filter);
    view.refresh(state.api(), &scope).await;

    let catalog = CatalogPanel::new(&view, &params);

    if is_htmx(&headers) {
        return (
            AppendHeaders([("HX-Push-Url", params.href("/products"))]),
            CatalogPanelTemplate { catalog },
        )
            .into_response();
    }

    ProductsIndexTemplate { catalog }.into_response()
}

/// Reset every filter and go back to the catalog, keeping the view mode.
#[instrument]
pub async fn clear(RawQuery(query): RawQuery) -> Redirect {
    let mut params = SearchParams::parse(query.as_deref().unwrap_or_default());
    let mut filter = FilterState::from_params(&params);
    filter.clear(&mut params);
    Redirect::to(&params.href("/products"))
}
