//! Projection of a catalog onto the page surfaces.
//!
//! [`render_catalog`] decides *what* the table, the carousel and the status
//! line show; a [`CatalogSurface`] decides *how*. The HTML page
//! ([`crate::generate::HtmlSurface`]) is the production surface.

use crate::detail::DetailView;
use crate::format::{format_price, rating_short};
use crate::types::{CatalogState, Product};

pub const TABLE_EMPTY: &str = "No products found.";
pub const TABLE_FAILED: &str = "Failed to load products.";
pub const CAROUSEL_EMPTY: &str = "No product images found.";
pub const CAROUSEL_FAILED: &str = "Failed to load product images.";
pub const STATUS_EMPTY: &str = "No data returned from API";
pub const STATUS_FAILED: &str = "Error loading data";
pub const CARD_HINT: &str = "Click to view product details";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub image: String,
    pub alt: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    /// Opened in the popup when the row is activated.
    pub detail: DetailView,
}

/// One carousel card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub image: String,
    pub alt: String,
    pub caption: String,
    pub hint: &'static str,
    pub detail: DetailView,
}

impl ProductRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.display_id(),
            image: product.image.clone(),
            alt: product.display_title().to_string(),
            title: product.display_title().to_string(),
            category: product.category.clone(),
            price: format_price(product.price),
            rating: rating_short(product),
            detail: DetailView::from_product(product),
        }
    }
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            image: product.image.clone(),
            alt: product.display_title().to_string(),
            caption: product.display_title().to_string(),
            hint: CARD_HINT,
            detail: DetailView::from_product(product),
        }
    }
}

/// The display surface the renderer writes to.
pub trait CatalogSurface {
    fn show_rows(&mut self, rows: &[ProductRow]);
    fn show_table_placeholder(&mut self, message: &str);
    fn show_cards(&mut self, cards: &[ProductCard]);
    fn show_carousel_placeholder(&mut self, message: &str);
    fn set_status(&mut self, text: &str);
}

/// Status line for a successful load.
pub fn loaded_status(count: usize) -> String {
    format!("{count} products loaded")
}

/// Populate every surface from one fetch result.
pub fn render_catalog(state: &CatalogState, surface: &mut impl CatalogSurface) {
    match state {
        CatalogState::Loaded { products } if !products.is_empty() => {
            let rows: Vec<ProductRow> = products.iter().map(ProductRow::from_product).collect();
            let cards: Vec<ProductCard> =
                products.iter().map(ProductCard::from_product).collect();
            surface.show_rows(&rows);
            surface.show_cards(&cards);
            surface.set_status(&loaded_status(products.len()));
        }
        CatalogState::Loaded { .. } | CatalogState::NoData => {
            surface.show_table_placeholder(TABLE_EMPTY);
            surface.show_carousel_placeholder(CAROUSEL_EMPTY);
            surface.set_status(STATUS_EMPTY);
        }
        CatalogState::Failed { .. } => {
            surface.show_table_placeholder(TABLE_FAILED);
            surface.show_carousel_placeholder(CAROUSEL_FAILED);
            surface.set_status(STATUS_FAILED);
        }
    }
}
