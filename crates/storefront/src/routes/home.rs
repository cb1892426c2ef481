//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use sweet_delights_core::catalog::{Category, FilterState, SearchParams};

use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;
use crate::views::{HomeView, ViewScope};

// =============================================================================
// Static Content
// =============================================================================

/// A selling point in the "Why Choose Sweet Delights?" row.
#[derive(Clone)]
pub struct Feature {
    /// Symbol id in `icons.svg`.
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        icon: "award",
        title: "Premium Quality",
        description: "Only the finest ingredients for exceptional taste",
    },
    Feature {
        icon: "truck",
        title: "Fast Delivery",
        description: "Fresh cakes delivered to your doorstep in 2-4 hours",
    },
    Feature {
        icon: "shield",
        title: "Secure Payment",
        description: "100% secure transactions with multiple payment options",
    },
    Feature {
        icon: "heart",
        title: "5-Star Reviews",
        description: "Loved by thousands of satisfied customers",
    },
];

/// A "Shop by Category" tile.
#[derive(Clone)]
pub struct CategoryTile {
    pub name: &'static str,
    pub image: &'static str,
    pub href: String,
}

/// Category, tile label and tile image.
const CATEGORY_TILES: [(&str, &str, &str); 4] = [
    (
        "chocolate",
        "Chocolate Cakes",
        "https://images.pexels.com/photos/291528/pexels-photo-291528.jpeg",
    ),
    (
        "vanilla",
        "Vanilla Cakes",
        "https://images.pexels.com/photos/1126359/pexels-photo-1126359.jpeg",
    ),
    (
        "red-velvet",
        "Red Velvet",
        "https://images.pexels.com/photos/1721932/pexels-photo-1721932.jpeg",
    ),
    (
        "fruit",
        "Fruit Cakes",
        "https://images.pexels.com/photos/1070850/pexels-photo-1070850.jpeg",
    ),
];

fn category_tiles() -> Vec<CategoryTile> {
    CATEGORY_TILES
        .iter()
        .map(|&(category, name, image)| {
            let mut params = SearchParams::new();
            FilterState::default().select_category(Category::parse(category), &mut params);
            CategoryTile {
                name,
                image,
                href: params.href("/products"),
            }
        })
        .collect()
}

// =============================================================================
// Handler
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub features: Vec<Feature>,
    pub categories: Vec<CategoryTile>,
    /// Highest rated products, at most six.
    pub featured: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (scope, _guard) = ViewScope::new();
    let mut view = HomeView::default();
    view.refresh(state.api(), &scope).await;

    HomeTemplate {
        features: FEATURES.to_vec(),
        categories: category_tiles(),
        featured: view.featured.iter().map(ProductCardView::from).collect(),
    }
}
