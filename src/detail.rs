//! Product detail popup.
//!
//! [`DetailViewer`] holds the two-valued popup state (hidden, or showing one
//! record) and forwards every transition to a [`DetailSurface`]. The generated
//! page implements the same transitions in its embedded script; the terminal
//! `show` command and the tests drive this type directly.

use crate::format::{format_price, rating_detail};
use crate::types::Product;

/// Field values written into the popup for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub image: String,
    pub alt: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub description: String,
}

impl DetailView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            image: product.image.clone(),
            alt: product.display_title().to_string(),
            title: product.display_title().to_string(),
            category: product.category.clone(),
            price: format_price(product.price),
            rating: rating_detail(product),
            description: product.description.clone(),
        }
    }
}

/// Where the popup is drawn.
pub trait DetailSurface {
    /// Populate the popup fields and make it visible.
    fn show(&mut self, detail: &DetailView);
    /// Hide the popup and its backdrop.
    fn hide(&mut self);
}

/// User input that affects the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// A table row or carousel card at this position was clicked.
    Activate(usize),
    CloseControl,
    Backdrop,
    /// A key was pressed anywhere on the page.
    Key(String),
}

pub struct DetailViewer<S: DetailSurface> {
    surface: S,
    current: Option<DetailView>,
}

impl<S: DetailSurface> DetailViewer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
        }
    }

    /// Show `product`, replacing whatever was displayed.
    pub fn open(&mut self, product: &Product) {
        let detail = DetailView::from_product(product);
        self.surface.show(&detail);
        self.current = Some(detail);
    }

    /// Hide the popup. Safe to call when already hidden.
    pub fn close(&mut self) {
        self.surface.hide();
        self.current = None;
    }

    pub fn handle(&mut self, event: ViewerEvent, products: &[Product]) {
        match event {
            ViewerEvent::Activate(index) => match products.get(index) {
                Some(product) => self.open(product),
                None => tracing::debug!(index, "activation outside rendered range ignored"),
            },
            ViewerEvent::CloseControl | ViewerEvent::Backdrop => self.close(),
            ViewerEvent::Key(key) if key == "Escape" => self.close(),
            ViewerEvent::Key(_) => {}
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&DetailView> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
