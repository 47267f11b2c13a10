//! # Shopwindow
//!
//! A product catalog page builder. One request to a JSON product API feeds a
//! static page with a product table, a horizontally scrolling image carousel,
//! a status line and a detail popup. A brand logo is trimmed of its black
//! background and cropped before it is placed in the page header.
//!
//! # Architecture
//!
//! ```text
//! 1. Fetch     API endpoint  →  .shopwindow-temp/catalog.json   (CatalogState)
//! 2. Trim      logo source   →  dist/logo.png                   (best effort)
//! 3. Generate  catalog.json  →  dist/index.html                 (table, carousel, popup)
//! ```
//!
//! Fetch and trim are independent and run side by side in `build`; generate
//! waits for both. The fetch result is folded into a single [`types::CatalogState`]
//! value (loaded, no data, or failed) and every surface is rendered from that
//! one value, so the table, the carousel and the status line always agree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | One HTTP GET, body parsing, error folding into `CatalogState` |
//! | [`render`] | Decides what the table, carousel and status line show |
//! | [`detail`] | Popup state machine: open, close, close controls |
//! | [`generate`] | Writes `index.html` with Maud, publishes the logo |
//! | [`imaging`] | Black-background removal and crop for the logo |
//! | [`config`] | `shopwindow.toml` loading, validation, merging, CSS generation |
//! | [`format`] | Price and rating text |
//! | [`types`] | `Product` and `CatalogState`, shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Display Surfaces Behind Traits
//!
//! Rendering and the popup never touch markup directly. [`render::CatalogSurface`]
//! and [`detail::DetailSurface`] receive display-ready rows, cards and detail
//! views; the HTML page and the terminal are just two implementations. Unit
//! tests use recording surfaces and never parse HTML.
//!
//! ## Failures Stay On The Page
//!
//! A failed fetch or a failed trim never aborts a build. The page always gets
//! written: with placeholders and an error status if the catalog could not be
//! loaded, and with the untouched original logo if trimming did not work out.

pub mod config;
pub mod detail;
pub mod fetch;
pub mod format;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
