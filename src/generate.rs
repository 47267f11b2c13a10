//! HTML page generation.
//!
//! Takes one [`CatalogState`] and writes a single self-contained page:
//!
//! ```text
//! dist/
//! ├── index.html     # Status line, product table, image carousel, popup
//! └── logo.png       # Trimmed logo (or the original file if trimming failed)
//! ```
//!
//! ## Surfaces
//!
//! [`HtmlSurface`] is the [`CatalogSurface`] for the page: the renderer
//! decides what goes in the table, the carousel and the status line, and the
//! surface turns that into markup. Each row and card carries its popup fields
//! as `data-*` attributes so the embedded script can open the popup without
//! any further lookup.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/catalog.js`: Popup open/close (click, close button, backdrop, Escape)
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Product text from the API is auto-escaped.

use crate::config::{self, SiteConfig};
use crate::imaging::{ImageBackend, TrimOutcome, TrimParams, is_same_file, trim_logo};
use crate::render::{CatalogSurface, ProductCard, ProductRow, render_catalog};
use crate::types::CatalogState;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/catalog.js");

/// File name of the trimmed logo inside the output directory.
pub const TRIMMED_LOGO: &str = "logo.png";

/// What was written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub page: PathBuf,
    pub status: String,
    pub rows: usize,
    pub logo: Option<String>,
}

/// Markup collected from the renderer.
#[derive(Default)]
pub struct HtmlSurface {
    table: Option<Markup>,
    carousel: Option<Markup>,
    status: String,
    rows: usize,
}

impl HtmlSurface {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl CatalogSurface for HtmlSurface {
    fn show_rows(&mut self, rows: &[ProductRow]) {
        self.rows = rows.len();
        self.table = Some(html! {
            @for row in rows {
                tr.product-row tabindex="0"
                    data-image=(row.detail.image)
                    data-alt=(row.detail.alt)
                    data-title=(row.detail.title)
                    data-category=(row.detail.category)
                    data-price=(row.detail.price)
                    data-rating=(row.detail.rating)
                    data-description=(row.detail.description) {
                    td { (row.id) }
                    td {
                        img.table-image src=(row.image) alt=(row.alt) loading="lazy";
                    }
                    td { (row.title) }
                    td { (row.category) }
                    td.price { (row.price) }
                    td { (row.rating) }
                }
            }
        });
    }

    fn show_table_placeholder(&mut self, message: &str) {
        self.rows = 0;
        self.table = Some(html! {
            tr {
                td.placeholder colspan="6" { (message) }
            }
        });
    }

    fn show_cards(&mut self, cards: &[ProductCard]) {
        self.carousel = Some(html! {
            @for card in cards {
                article.image-card tabindex="0" title=(card.hint)
                    data-image=(card.detail.image)
                    data-alt=(card.detail.alt)
                    data-title=(card.detail.title)
                    data-category=(card.detail.category)
                    data-price=(card.detail.price)
                    data-rating=(card.detail.rating)
                    data-description=(card.detail.description) {
                    img src=(card.image) alt=(card.alt) loading="lazy";
                    p { (card.caption) }
                }
            }
        });
    }

    fn show_carousel_placeholder(&mut self, message: &str) {
        self.carousel = Some(html! {
            div.image-placeholder { (message) }
        });
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
}

/// Render the catalog and write `index.html` into `output_dir`.
pub fn generate(
    state: &CatalogState,
    config: &SiteConfig,
    logo: Option<&str>,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut surface = HtmlSurface::default();
    render_catalog(state, &mut surface);

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let page = render_page(&config.page.title, &css, logo, &surface);
    let page_path = output_dir.join("index.html");
    fs::write(&page_path, page.into_string())?;
    tracing::info!(path = %page_path.display(), status = surface.status(), "page written");

    Ok(GenerateSummary {
        page: page_path,
        status: surface.status.clone(),
        rows: surface.row_count(),
        logo: logo.map(str::to_string),
    })
}

/// Write a fetched catalog so later stages can render it without refetching.
pub fn save_catalog(state: &CatalogState, path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

/// Read a catalog written by [`save_catalog`].
pub fn load_catalog(path: &Path) -> Result<CatalogState, GenerateError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Decide which logo file the page shows.
///
/// A successful trim has already written [`TRIMMED_LOGO`] into `output_dir`.
/// Otherwise the original is copied next to the page unchanged, unless it
/// already lives there.
pub fn publish_logo(
    source: &Path,
    outcome: &TrimOutcome,
    output_dir: &Path,
) -> Result<String, GenerateError> {
    match outcome {
        TrimOutcome::Trimmed { .. } => Ok(TRIMMED_LOGO.to_string()),
        TrimOutcome::Unchanged { .. } => {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "logo".to_string());
            // Never let the fallback overwrite a name reserved for the trim.
            let name = if name == TRIMMED_LOGO {
                format!("original-{name}")
            } else {
                name
            };
            fs::create_dir_all(output_dir)?;
            let target = output_dir.join(&name);
            // A source already in place must not be copied onto itself.
            if !is_same_file(source, &target) {
                fs::copy(source, &target)?;
            }
            Ok(name)
        }
    }
}

/// Trim the configured logo into `output_dir` and pick the file to show.
///
/// Never fails: if even the fallback copy cannot be made, the page is
/// rendered without a logo.
pub fn prepare_logo(
    backend: &impl ImageBackend,
    source: &Path,
    params: &TrimParams,
    output_dir: &Path,
) -> (TrimOutcome, Option<String>) {
    let outcome = trim_logo(backend, source, &output_dir.join(TRIMMED_LOGO), params);
    match publish_logo(source, &outcome, output_dir) {
        Ok(href) => (outcome, Some(href)),
        Err(e) => {
            tracing::warn!(source = %source.display(), error = %e, "logo left out of the page");
            (outcome, None)
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the page header with logo, heading and status line
fn page_header(title: &str, logo: Option<&str>, status: &str) -> Markup {
    html! {
        header.page-header {
            @if let Some(src) = logo {
                img class="logo" src=(src) alt="";
            }
            div {
                h1 { (title) }
                p id="statusText" { (status) }
            }
        }
    }
}

/// Renders the popup and its backdrop, hidden until a product is activated
fn detail_popup() -> Markup {
    html! {
        div id="overlay" class="overlay hidden" {}
        div id="popup" class="popup hidden" role="dialog" aria-modal="true" aria-labelledby="popupTitle" {
            button id="closePopup" class="close-button" type="button" aria-label="Close" { "×" }
            img id="popupImage" src="" alt="";
            div.popup-body {
                h2 id="popupTitle" {}
                p id="popupCategory" class="category" {}
                p id="popupPrice" class="price" {}
                p id="popupRating" {}
                p id="popupDescription" {}
            }
        }
    }
}

fn render_page(title: &str, css: &str, logo: Option<&str>, surface: &HtmlSurface) -> Markup {
    let content = html! {
        (page_header(title, logo, &surface.status))
        main {
            section.carousel-section {
                div id="imageScroller" class="image-scroller" {
                    @if let Some(cards) = &surface.carousel {
                        (cards)
                    }
                }
            }
            section.table-section {
                table.products {
                    thead {
                        tr {
                            th { "ID" }
                            th { "Image" }
                            th { "Title" }
                            th { "Category" }
                            th { "Price" }
                            th { "Rating" }
                        }
                    }
                    tbody id="productsBody" {
                        @if let Some(rows) = &surface.table {
                            (rows)
                        }
                    }
                }
            }
        }
        (detail_popup())
    };

    base_document(title, css, content)
}
